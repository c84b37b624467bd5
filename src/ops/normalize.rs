use chrono::{DateTime, Days, FixedOffset, NaiveDate};

use crate::model::item::{DateSpan, ItemSource, PlanningItem};
use crate::model::source::{AggregatedData, HostIssue, TicketIssue};
use crate::model::status::{
    HOST_DONE_STATE, HOST_STATUS_TABLE, PlanningStatus, StatusTable, TICKET_DONE_STATUSES,
    TICKET_STATUS_TABLE,
};

/// Placeholder duration for open work with no planned end date.
pub const IN_FLIGHT_DAYS: u64 = 14;

/// Normalize every ticket issue, then every host issue, in input order.
///
/// Pull requests are never normalized.
pub fn normalize_all(data: &AggregatedData) -> Vec<PlanningItem<'_>> {
    let tickets = data
        .ticket_issues
        .iter()
        .enumerate()
        .map(|(i, issue)| normalize_ticket(issue, i));
    let hosts = data
        .host_issues
        .iter()
        .enumerate()
        .map(|(i, issue)| normalize_host(issue, i));
    tickets.chain(hosts).collect()
}

pub fn normalize_ticket(issue: &TicketIssue, index: usize) -> PlanningItem<'_> {
    let done = TICKET_DONE_STATUSES.contains(&issue.status.as_str());
    let span = infer_span(
        issue.planned_start_date,
        issue.planned_end_date,
        issue.created_date,
        issue.updated_date,
        done,
    );
    if span.is_inverted() {
        tracing::warn!(key = %issue.key, start = %span.start, end = %span.end, "planned end precedes start");
    }

    PlanningItem {
        source: ItemSource::Ticket(issue),
        source_index: index,
        status: resolve_status(&issue.roadmap_status, &issue.status, &TICKET_STATUS_TABLE),
        span,
        dependencies: issue.dependencies.clone(),
    }
}

pub fn normalize_host(issue: &HostIssue, index: usize) -> PlanningItem<'_> {
    let done = issue.state == HOST_DONE_STATE;
    let span = infer_span(
        issue.planned_start_date,
        issue.planned_end_date,
        issue.created_date,
        issue.updated_date,
        done,
    );
    if span.is_inverted() {
        tracing::warn!(
            repository = %issue.repository,
            number = issue.number,
            start = %span.start,
            end = %span.end,
            "planned end precedes start"
        );
    }

    PlanningItem {
        source: ItemSource::Host(issue),
        source_index: index,
        status: resolve_status(&issue.roadmap_status, &issue.state, &HOST_STATUS_TABLE),
        span,
        dependencies: issue.dependencies.clone(),
    }
}

/// Infer a planning span from whatever dates the source provides.
///
/// - start: planned start, else creation time
/// - end: planned end, else last update for finished work, else start + 14 days
///
/// Calendar dates are taken in each timestamp's own offset.
pub fn infer_span(
    planned_start: Option<DateTime<FixedOffset>>,
    planned_end: Option<DateTime<FixedOffset>>,
    created: DateTime<FixedOffset>,
    updated: DateTime<FixedOffset>,
    done: bool,
) -> DateSpan {
    let start = planned_start.unwrap_or(created).date_naive();
    let end = match planned_end {
        Some(end) => end.date_naive(),
        None if done => updated.date_naive(),
        None => in_flight_end(start),
    };
    DateSpan::new(start, end)
}

fn in_flight_end(start: NaiveDate) -> NaiveDate {
    start.checked_add_days(Days::new(IN_FLIGHT_DAYS)).unwrap_or(start)
}

/// An explicit planning status wins; otherwise map the native status.
fn resolve_status(explicit: &str, native: &str, table: &StatusTable) -> PlanningStatus {
    if !explicit.is_empty() {
        if let Some(status) = PlanningStatus::parse_label(explicit) {
            return status;
        }
        tracing::debug!(status = explicit, "unrecognized planning status, deriving from source");
    }
    table.derive(native)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::quarter::Quarter;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap().fixed_offset()
    }

    fn offset_ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ticket(key: &str, status: &str) -> TicketIssue {
        TicketIssue {
            key: key.into(),
            summary: format!("{} summary", key),
            status: status.into(),
            created_date: ts(2025, 1, 10),
            updated_date: ts(2025, 1, 20),
            ..Default::default()
        }
    }

    fn host(number: u64, state: &str) -> HostIssue {
        HostIssue {
            title: format!("Issue {}", number),
            number,
            state: state.into(),
            repository: "acme/api".into(),
            created_date: ts(2025, 1, 10),
            updated_date: ts(2025, 1, 20),
            ..Default::default()
        }
    }

    #[test]
    fn test_done_ticket_derives_completed() {
        let issue = ticket("PROJ-1", "Done");
        let item = normalize_ticket(&issue, 0);
        assert_eq!(item.status, PlanningStatus::Completed);
        // Finished work ends at its last update
        assert_eq!(item.span, DateSpan::new(date(2025, 1, 10), date(2025, 1, 20)));
    }

    #[test]
    fn test_open_host_issue_gets_in_flight_end() {
        let issue = host(7, "open");
        let item = normalize_host(&issue, 0);
        assert_eq!(item.status, PlanningStatus::InProgress);
        assert_eq!(item.span.start, date(2025, 1, 10));
        assert_eq!(item.span.end, date(2025, 1, 24));
    }

    #[test]
    fn test_closed_host_issue_ends_at_update() {
        let issue = host(8, "closed");
        let item = normalize_host(&issue, 0);
        assert_eq!(item.status, PlanningStatus::Completed);
        assert_eq!(item.span.end, date(2025, 1, 20));
    }

    #[test]
    fn test_explicit_dates_win() {
        let mut issue = ticket("PROJ-2", "Done");
        issue.planned_start_date = Some(ts(2025, 4, 1));
        issue.planned_end_date = Some(ts(2025, 9, 30));
        let item = normalize_ticket(&issue, 0);
        assert_eq!(item.span, DateSpan::new(date(2025, 4, 1), date(2025, 9, 30)));
    }

    #[test]
    fn test_offset_dates_read_in_their_own_zone() {
        let mut issue = ticket("PROJ-8", "In Progress");
        // 2025-03-31T14:00Z, but April 1st where it was written
        issue.planned_start_date = Some(offset_ts("2025-04-01T00:00:00+10:00"));
        issue.planned_end_date = Some(offset_ts("2025-06-30T23:30:00-05:00"));
        let item = normalize_ticket(&issue, 0);
        assert_eq!(item.span, DateSpan::new(date(2025, 4, 1), date(2025, 6, 30)));
        assert_eq!(Quarter::from_date(&item.span.start).to_string(), "Q2 2025");
        assert_eq!(Quarter::from_date(&item.span.end).to_string(), "Q2 2025");
    }

    #[test]
    fn test_offset_created_date_without_plan() {
        let mut issue = host(10, "open");
        issue.created_date = offset_ts("2025-07-01T06:00:00+09:00");
        let item = normalize_host(&issue, 0);
        assert_eq!(item.span.start, date(2025, 7, 1));
        assert_eq!(item.span.end, date(2025, 7, 15));
    }

    #[test]
    fn test_planned_start_drives_in_flight_end() {
        let mut issue = ticket("PROJ-3", "In Progress");
        issue.planned_start_date = Some(ts(2025, 6, 1));
        let item = normalize_ticket(&issue, 0);
        assert_eq!(item.span, DateSpan::new(date(2025, 6, 1), date(2025, 6, 15)));
    }

    #[test]
    fn test_inverted_explicit_dates_are_kept() {
        let mut issue = ticket("PROJ-4", "To Do");
        issue.planned_start_date = Some(ts(2025, 9, 1));
        issue.planned_end_date = Some(ts(2025, 2, 1));
        let item = normalize_ticket(&issue, 0);
        assert!(item.span.is_inverted());
    }

    #[test]
    fn test_explicit_status_wins() {
        let mut issue = ticket("PROJ-5", "Done");
        issue.roadmap_status = "At Risk".into();
        assert_eq!(normalize_ticket(&issue, 0).status, PlanningStatus::AtRisk);
    }

    #[test]
    fn test_unrecognized_explicit_status_falls_back() {
        let mut issue = host(9, "closed");
        issue.roadmap_status = "Someday".into();
        assert_eq!(normalize_host(&issue, 0).status, PlanningStatus::Completed);
    }

    #[test]
    fn test_normalize_all_keeps_every_issue() {
        let data = AggregatedData {
            ticket_issues: vec![ticket("PROJ-1", "Open"), ticket("PROJ-2", "Weird")],
            host_issues: vec![host(1, "open")],
            ..Default::default()
        };
        let items = normalize_all(&data);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].key(), "PROJ-1");
        assert_eq!(items[1].key(), "PROJ-2");
        assert_eq!(items[1].status, PlanningStatus::Planned);
        assert_eq!(items[2].key(), "acme/api #1");
        assert_eq!(items[2].source_index, 0);
    }

    #[test]
    fn test_dependencies_copied() {
        let mut issue = ticket("PROJ-6", "Open");
        issue.dependencies = vec!["PROJ-1".into(), "PROJ-2".into()];
        let item = normalize_ticket(&issue, 0);
        assert_eq!(item.dependencies, vec!["PROJ-1", "PROJ-2"]);
    }
}
