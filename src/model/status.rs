use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical planning status shared by both sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningStatus {
    Planned,
    InProgress,
    AtRisk,
    Blocked,
    Completed,
}

impl PlanningStatus {
    /// Every status, in legend order.
    pub const ALL: [PlanningStatus; 5] = [
        PlanningStatus::Planned,
        PlanningStatus::InProgress,
        PlanningStatus::AtRisk,
        PlanningStatus::Blocked,
        PlanningStatus::Completed,
    ];

    /// Human-readable label used in rendered output
    pub fn label(self) -> &'static str {
        match self {
            PlanningStatus::Planned => "Planned",
            PlanningStatus::InProgress => "In Progress",
            PlanningStatus::AtRisk => "At Risk",
            PlanningStatus::Blocked => "Blocked",
            PlanningStatus::Completed => "Completed",
        }
    }

    /// Aggregation priority: the higher value wins a rollup.
    pub fn priority(self) -> u8 {
        match self {
            PlanningStatus::Blocked => 5,
            PlanningStatus::AtRisk => 4,
            PlanningStatus::InProgress => 3,
            PlanningStatus::Planned => 2,
            PlanningStatus::Completed => 1,
        }
    }

    /// Badge background color
    pub fn color(self) -> &'static str {
        match self {
            PlanningStatus::Planned => "#0052CC",
            PlanningStatus::InProgress => "#36B37E",
            PlanningStatus::AtRisk => "#FF8B00",
            PlanningStatus::Blocked => "#FF5630",
            PlanningStatus::Completed => "#6554C0",
        }
    }

    /// Badge text color; dark backgrounds get white text.
    pub fn text_color(self) -> &'static str {
        match self {
            PlanningStatus::AtRisk | PlanningStatus::Blocked => "#FFFFFF",
            _ => "#000000",
        }
    }

    /// Combine two statuses, keeping the higher-priority one.
    pub fn aggregate(self, other: PlanningStatus) -> PlanningStatus {
        if other.priority() > self.priority() {
            other
        } else {
            self
        }
    }

    /// Parse an explicitly supplied planning status.
    ///
    /// Case, spaces, `-` and `_` are ignored, so `At Risk`, `at_risk` and
    /// `AT-RISK` all parse. Returns `None` for anything else.
    pub fn parse_label(s: &str) -> Option<PlanningStatus> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "planned" => Some(PlanningStatus::Planned),
            "inprogress" => Some(PlanningStatus::InProgress),
            "atrisk" => Some(PlanningStatus::AtRisk),
            "blocked" => Some(PlanningStatus::Blocked),
            "completed" => Some(PlanningStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for PlanningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate a collection of statuses. `None` for an empty collection.
pub fn aggregate_all<I>(statuses: I) -> Option<PlanningStatus>
where
    I: IntoIterator<Item = PlanningStatus>,
{
    statuses.into_iter().reduce(PlanningStatus::aggregate)
}

// ---------------------------------------------------------------------------
// Source status lookup tables
// ---------------------------------------------------------------------------

/// A finite mapping from a source's native status string to a planning
/// status, with the status used for anything not listed.
#[derive(Debug, Clone, Copy)]
pub struct StatusTable {
    pub entries: &'static [(&'static str, PlanningStatus)],
    pub fallback: PlanningStatus,
}

impl StatusTable {
    /// Exact, case-sensitive lookup.
    pub fn derive(&self, native: &str) -> PlanningStatus {
        self.entries
            .iter()
            .find(|(name, _)| *name == native)
            .map(|(_, status)| *status)
            .unwrap_or(self.fallback)
    }
}

/// Ticketing-system workflow statuses.
pub const TICKET_STATUS_TABLE: StatusTable = StatusTable {
    entries: &[
        ("To Do", PlanningStatus::Planned),
        ("Open", PlanningStatus::Planned),
        ("Backlog", PlanningStatus::Planned),
        ("In Progress", PlanningStatus::InProgress),
        ("In Review", PlanningStatus::InProgress),
        ("Blocked", PlanningStatus::Blocked),
        ("Impediment", PlanningStatus::Blocked),
        ("Done", PlanningStatus::Completed),
        ("Closed", PlanningStatus::Completed),
        ("Resolved", PlanningStatus::Completed),
    ],
    fallback: PlanningStatus::Planned,
};

/// Code-host issue states.
pub const HOST_STATUS_TABLE: StatusTable = StatusTable {
    entries: &[
        ("open", PlanningStatus::InProgress),
        ("closed", PlanningStatus::Completed),
    ],
    fallback: PlanningStatus::Planned,
};

/// Ticket statuses that mean the work is finished.
pub const TICKET_DONE_STATUSES: &[&str] = &["Done", "Closed", "Resolved"];

/// Code-host state that means the work is finished.
pub const HOST_DONE_STATE: &str = "closed";
