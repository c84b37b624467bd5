use indexmap::IndexMap;

use crate::model::item::{ItemSource, PlanningItem};
use crate::model::quarter::Quarter;

pub const NO_EPIC: &str = "No Epic";
pub const NO_THEME: &str = "No Theme";
pub const NO_TEAM: &str = "No Team";
pub const ALL_ITEMS: &str = "All Items";

/// Attribute used to partition items before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingKey {
    Epic,
    Theme,
    Team,
    Quarter,
    /// Any unrecognized key: one group holding everything
    All,
}

impl GroupingKey {
    /// Case-sensitive match; anything unrecognized groups everything together.
    pub fn parse(s: &str) -> GroupingKey {
        match s {
            "epic" => GroupingKey::Epic,
            "theme" => GroupingKey::Theme,
            "team" => GroupingKey::Team,
            "quarter" => GroupingKey::Quarter,
            other => {
                tracing::debug!(grouping = other, "unrecognized grouping key, using a single group");
                GroupingKey::All
            }
        }
    }
}

/// A labelled bucket of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub label: String,
    pub items: Vec<PlanningItem<'a>>,
}

/// Partition items by `key`.
///
/// Every item lands in exactly one group. Groups appear in the order their
/// label was first seen and items keep their input order within a group.
pub fn partition<'a>(items: &[PlanningItem<'a>], key: GroupingKey) -> Vec<Group<'a>> {
    if key == GroupingKey::All {
        return vec![Group {
            label: ALL_ITEMS.to_string(),
            items: items.to_vec(),
        }];
    }

    items
        .iter()
        .fold(
            IndexMap::<String, Vec<PlanningItem<'a>>>::new(),
            |mut buckets, item| {
                buckets
                    .entry(group_label(item, key))
                    .or_default()
                    .push(item.clone());
                buckets
            },
        )
        .into_iter()
        .map(|(label, items)| Group { label, items })
        .collect()
}

/// The group an item belongs to under `key`.
pub fn group_label(item: &PlanningItem<'_>, key: GroupingKey) -> String {
    match key {
        GroupingKey::Epic => item.epic_link().unwrap_or(NO_EPIC).to_string(),
        GroupingKey::Theme => theme_label(item).to_string(),
        GroupingKey::Team => item.team().unwrap_or(NO_TEAM).to_string(),
        GroupingKey::Quarter => match item.quarter_label() {
            Some(q) => q.to_string(),
            None => Quarter::from_date(&item.span.start).to_string(),
        },
        GroupingKey::All => ALL_ITEMS.to_string(),
    }
}

/// Explicit theme, else the ticket's issue type or the host issue's first
/// label.
fn theme_label<'a>(item: &PlanningItem<'a>) -> &'a str {
    if let Some(theme) = item.theme() {
        return theme;
    }
    let fallback = match item.source {
        ItemSource::Ticket(_) => item.issue_type(),
        ItemSource::Host(h) => h.labels.first().map(String::as_str).filter(|l| !l.is_empty()),
    };
    fallback.unwrap_or(NO_THEME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::DateSpan;
    use crate::model::source::{HostIssue, TicketIssue};
    use crate::model::status::PlanningStatus;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ticket_item(issue: &TicketIssue) -> PlanningItem<'_> {
        PlanningItem {
            source: ItemSource::Ticket(issue),
            source_index: 0,
            status: PlanningStatus::Planned,
            span: DateSpan::new(date(2025, 2, 1), date(2025, 2, 15)),
            dependencies: Vec::new(),
        }
    }

    fn host_item(issue: &HostIssue) -> PlanningItem<'_> {
        PlanningItem {
            source: ItemSource::Host(issue),
            source_index: 0,
            status: PlanningStatus::InProgress,
            span: DateSpan::new(date(2025, 5, 1), date(2025, 5, 15)),
            dependencies: Vec::new(),
        }
    }

    fn labels(groups: &[Group<'_>]) -> Vec<String> {
        groups.iter().map(|g| g.label.clone()).collect()
    }

    fn keys(group: &Group<'_>) -> Vec<String> {
        group.items.iter().map(PlanningItem::key).collect()
    }

    fn fixtures() -> (Vec<TicketIssue>, Vec<HostIssue>) {
        let tickets = vec![
            TicketIssue {
                key: "PROJ-2".into(),
                issue_type: "Story".into(),
                epic_link: "PROJ-1".into(),
                team: "Web".into(),
                theme: "Growth".into(),
                ..Default::default()
            },
            TicketIssue {
                key: "PROJ-3".into(),
                issue_type: "Bug".into(),
                quarter: "Q3 2025".into(),
                ..Default::default()
            },
            TicketIssue {
                key: "PROJ-4".into(),
                epic_link: "PROJ-1".into(),
                team: "Web".into(),
                ..Default::default()
            },
        ];
        let hosts = vec![
            HostIssue {
                number: 1,
                repository: "acme/api".into(),
                labels: vec!["infra".into(), "ci".into()],
                ..Default::default()
            },
            HostIssue {
                number: 2,
                repository: "acme/api".into(),
                ..Default::default()
            },
        ];
        (tickets, hosts)
    }

    fn all_items<'a>(tickets: &'a [TicketIssue], hosts: &'a [HostIssue]) -> Vec<PlanningItem<'a>> {
        tickets
            .iter()
            .map(ticket_item)
            .chain(hosts.iter().map(host_item))
            .collect()
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(GroupingKey::parse("epic"), GroupingKey::Epic);
        assert_eq!(GroupingKey::parse("quarter"), GroupingKey::Quarter);
        assert_eq!(GroupingKey::parse("Epic"), GroupingKey::All);
        assert_eq!(GroupingKey::parse("owner"), GroupingKey::All);
    }

    #[test]
    fn test_epic_grouping_example() {
        let ticket = TicketIssue {
            key: "PROJ-9".into(),
            epic_link: "PROJ-1".into(),
            ..Default::default()
        };
        let host = HostIssue {
            number: 5,
            repository: "acme/web".into(),
            ..Default::default()
        };
        let items = vec![ticket_item(&ticket), host_item(&host)];
        let groups = partition(&items, GroupingKey::Epic);
        assert_eq!(labels(&groups), vec!["PROJ-1", NO_EPIC]);
        assert_eq!(keys(&groups[0]), vec!["PROJ-9"]);
        assert_eq!(keys(&groups[1]), vec!["acme/web #5"]);
    }

    #[test]
    fn test_theme_fallbacks() {
        let (tickets, hosts) = fixtures();
        let items = all_items(&tickets, &hosts);
        let groups = partition(&items, GroupingKey::Theme);
        assert_eq!(labels(&groups), vec!["Growth", "Bug", NO_THEME, "infra"]);
        // PROJ-4 has no issue type and host #2 has no labels
        assert_eq!(keys(&groups[2]), vec!["PROJ-4", "acme/api #2"]);
    }

    #[test]
    fn test_team_grouping() {
        let (tickets, hosts) = fixtures();
        let items = all_items(&tickets, &hosts);
        let groups = partition(&items, GroupingKey::Team);
        assert_eq!(labels(&groups), vec!["Web", NO_TEAM]);
        assert_eq!(keys(&groups[0]), vec!["PROJ-2", "PROJ-4"]);
        assert_eq!(groups[1].items.len(), 3);
    }

    #[test]
    fn test_quarter_grouping_prefers_explicit_label() {
        let (tickets, hosts) = fixtures();
        let items = all_items(&tickets, &hosts);
        let groups = partition(&items, GroupingKey::Quarter);
        assert_eq!(labels(&groups), vec!["Q1 2025", "Q3 2025", "Q2 2025"]);
        assert_eq!(keys(&groups[0]), vec!["PROJ-2", "PROJ-4"]);
    }

    #[test]
    fn test_unrecognized_key_single_group() {
        let (tickets, hosts) = fixtures();
        let items = all_items(&tickets, &hosts);
        let groups = partition(&items, GroupingKey::parse("milestone"));
        assert_eq!(labels(&groups), vec![ALL_ITEMS]);
        assert_eq!(groups[0].items, items);
    }

    #[test]
    fn test_every_key_is_a_partition() {
        let (tickets, hosts) = fixtures();
        let items = all_items(&tickets, &hosts);
        let input: Vec<String> = items.iter().map(PlanningItem::key).collect();

        for key in [
            GroupingKey::Epic,
            GroupingKey::Theme,
            GroupingKey::Team,
            GroupingKey::Quarter,
            GroupingKey::All,
        ] {
            let groups = partition(&items, key);
            let mut seen: Vec<String> = groups.iter().flat_map(keys).collect();
            let mut expected = input.clone();
            seen.sort();
            expected.sort();
            assert_eq!(seen, expected, "partition broken for {:?}", key);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(partition(&[], GroupingKey::Epic).is_empty());
        let all = partition(&[], GroupingKey::All);
        assert_eq!(all.len(), 1);
        assert!(all[0].items.is_empty());
    }
}
