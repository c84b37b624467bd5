use chrono::NaiveDate;
use serde::Serialize;

use crate::model::source::{HostIssue, TicketIssue};
use crate::model::status::PlanningStatus;

/// Which source produced a planning item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    TicketIssue,
    HostIssue,
}

/// The source record behind a planning item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSource<'a> {
    Ticket(&'a TicketIssue),
    Host(&'a HostIssue),
}

/// A planning date range.
///
/// `start <= end` is not enforced: explicit planning dates come straight from
/// the sources and may be inverted. A span is kept exactly as the source gave
/// it, and [`is_inverted`](DateSpan::is_inverted) reports the violation.
/// Clamping belongs to [`place`](crate::ops::placement::place), which pulls
/// an inverted start column back to the end column so every placement is
/// non-empty and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateSpan { start, end }
    }

    /// True when the end date falls before the start date.
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}

/// One source issue projected onto the roadmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningItem<'a> {
    pub source: ItemSource<'a>,
    /// Position of the source record within its input collection
    pub source_index: usize,
    pub status: PlanningStatus,
    pub span: DateSpan,
    /// References to other items; not validated
    pub dependencies: Vec<String>,
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

impl<'a> PlanningItem<'a> {
    pub fn kind(&self) -> ItemKind {
        match self.source {
            ItemSource::Ticket(_) => ItemKind::TicketIssue,
            ItemSource::Host(_) => ItemKind::HostIssue,
        }
    }

    pub fn ticket(&self) -> Option<&'a TicketIssue> {
        match self.source {
            ItemSource::Ticket(t) => Some(t),
            ItemSource::Host(_) => None,
        }
    }

    pub fn host(&self) -> Option<&'a HostIssue> {
        match self.source {
            ItemSource::Host(h) => Some(h),
            ItemSource::Ticket(_) => None,
        }
    }

    /// Display key: `PROJ-12` for tickets, `owner/repo #34` for host issues.
    pub fn key(&self) -> String {
        match self.source {
            ItemSource::Ticket(t) => t.key.clone(),
            ItemSource::Host(h) => format!("{} #{}", h.repository, h.number),
        }
    }

    pub fn title(&self) -> &'a str {
        match self.source {
            ItemSource::Ticket(t) => &t.summary,
            ItemSource::Host(h) => &h.title,
        }
    }

    pub fn url(&self) -> &'a str {
        match self.source {
            ItemSource::Ticket(t) => &t.url,
            ItemSource::Host(h) => &h.url,
        }
    }

    /// Assignee list as displayed under the item.
    pub fn assignees(&self) -> String {
        match self.source {
            ItemSource::Ticket(t) => t.assignee.clone(),
            ItemSource::Host(h) => h.assignees.join(", "),
        }
    }

    pub fn theme(&self) -> Option<&'a str> {
        match self.source {
            ItemSource::Ticket(t) => non_empty(&t.theme),
            ItemSource::Host(h) => non_empty(&h.theme),
        }
    }

    pub fn initiative(&self) -> Option<&'a str> {
        match self.source {
            ItemSource::Ticket(t) => non_empty(&t.initiative),
            ItemSource::Host(h) => non_empty(&h.initiative),
        }
    }

    pub fn milestone(&self) -> Option<&'a str> {
        match self.source {
            ItemSource::Ticket(t) => non_empty(&t.milestone),
            ItemSource::Host(h) => non_empty(&h.milestone),
        }
    }

    /// Explicit quarter label as supplied by the source.
    pub fn quarter_label(&self) -> Option<&'a str> {
        match self.source {
            ItemSource::Ticket(t) => non_empty(&t.quarter),
            ItemSource::Host(h) => non_empty(&h.quarter),
        }
    }

    /// Team attribute; host issues carry none.
    pub fn team(&self) -> Option<&'a str> {
        self.ticket().and_then(|t| non_empty(&t.team))
    }

    /// Epic link; host issues carry none.
    pub fn epic_link(&self) -> Option<&'a str> {
        self.ticket().and_then(|t| non_empty(&t.epic_link))
    }

    /// Ticket issue type such as `Story` or `Epic`.
    pub fn issue_type(&self) -> Option<&'a str> {
        self.ticket().and_then(|t| non_empty(&t.issue_type))
    }

    pub fn is_epic(&self) -> bool {
        self.issue_type() == Some("Epic")
    }

    pub fn labels(&self) -> &'a [String] {
        match self.source {
            ItemSource::Ticket(t) => &t.labels,
            ItemSource::Host(h) => &h.labels,
        }
    }
}
