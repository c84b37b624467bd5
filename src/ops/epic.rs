use indexmap::IndexMap;

use crate::model::item::{ItemSource, PlanningItem};
use crate::model::source::HostIssue;
use crate::ops::group::NO_EPIC;

/// An epic registered as a section header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpicRef<'a> {
    pub key: &'a str,
    pub name: &'a str,
}

/// Decides which epic, if any, a code-host issue belongs to.
///
/// Host issues carry no epic field, so any association is a guess. Keeping
/// it behind a trait lets an exact cross-reference replace the guess without
/// touching the renderers.
pub trait EpicAssociator {
    /// Index into `epics` of the epic `issue` belongs to.
    fn associate(&self, issue: &HostIssue, epics: &[EpicRef<'_>]) -> Option<usize>;
}

/// Best-effort association: the first registered epic whose key appears
/// anywhere in the issue title.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleSubstringAssociator;

impl EpicAssociator for TitleSubstringAssociator {
    fn associate(&self, issue: &HostIssue, epics: &[EpicRef<'_>]) -> Option<usize> {
        epics
            .iter()
            .position(|epic| !epic.key.is_empty() && issue.title.contains(epic.key))
    }
}

/// One header row of the epic view and the items under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpicSection<'a> {
    pub key: String,
    /// Header text
    pub name: String,
    pub items: Vec<PlanningItem<'a>>,
}

/// Organize items under their epics.
///
/// Ticket items of type `Epic` become headers in input order and are not
/// listed as rows themselves. Other tickets go under their epic link; links
/// to epics that are not in the data get a header of their own after the
/// registered epics. Host issues are matched by `associator`. Everything
/// else lands in the trailing `No Epic` section, which is always present.
/// Registered epics without children are omitted.
pub fn epic_sections<'a>(
    items: &[PlanningItem<'a>],
    associator: &dyn EpicAssociator,
) -> Vec<EpicSection<'a>> {
    let mut epics: Vec<EpicRef<'a>> = Vec::new();
    for item in items.iter().filter(|i| i.is_epic()) {
        if let Some(ticket) = item.ticket() {
            if !epics.iter().any(|e| e.key == ticket.key) {
                let name = if ticket.summary.is_empty() {
                    ticket.key.as_str()
                } else {
                    ticket.summary.as_str()
                };
                epics.push(EpicRef {
                    key: &ticket.key,
                    name,
                });
            }
        }
    }

    let mut sections: IndexMap<String, EpicSection<'a>> = epics
        .iter()
        .map(|e| {
            (
                e.key.to_string(),
                EpicSection {
                    key: e.key.to_string(),
                    name: e.name.to_string(),
                    items: Vec::new(),
                },
            )
        })
        .collect();
    let mut unassigned = Vec::new();

    for item in items {
        let epic_key = match item.source {
            ItemSource::Ticket(_) if item.is_epic() => continue,
            ItemSource::Ticket(_) => item.epic_link(),
            ItemSource::Host(issue) => associator
                .associate(issue, &epics)
                .and_then(|idx| epics.get(idx))
                .map(|e| e.key),
        };

        match epic_key {
            Some(key) => sections
                .entry(key.to_string())
                .or_insert_with(|| EpicSection {
                    key: key.to_string(),
                    name: key.to_string(),
                    items: Vec::new(),
                })
                .items
                .push(item.clone()),
            None => unassigned.push(item.clone()),
        }
    }

    let mut result: Vec<EpicSection<'a>> = sections
        .into_values()
        .filter(|s| !s.items.is_empty())
        .collect();
    result.push(EpicSection {
        key: NO_EPIC.to_string(),
        name: NO_EPIC.to_string(),
        items: unassigned,
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::source::{AggregatedData, TicketIssue};
    use crate::ops::normalize::normalize_all;
    use pretty_assertions::assert_eq;

    fn epic(key: &str, summary: &str) -> TicketIssue {
        TicketIssue {
            key: key.into(),
            summary: summary.into(),
            issue_type: "Epic".into(),
            ..Default::default()
        }
    }

    fn story(key: &str, epic_link: &str) -> TicketIssue {
        TicketIssue {
            key: key.into(),
            issue_type: "Story".into(),
            epic_link: epic_link.into(),
            ..Default::default()
        }
    }

    fn host(number: u64, title: &str) -> HostIssue {
        HostIssue {
            number,
            title: title.into(),
            repository: "acme/app".into(),
            ..Default::default()
        }
    }

    fn section_keys(sections: &[EpicSection<'_>]) -> Vec<(String, Vec<String>)> {
        sections
            .iter()
            .map(|s| (s.key.clone(), s.items.iter().map(PlanningItem::key).collect()))
            .collect()
    }

    #[test]
    fn test_empty_input_yields_no_epic_only() {
        let data = AggregatedData::default();
        let items = normalize_all(&data);
        let sections = epic_sections(&items, &TitleSubstringAssociator);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, NO_EPIC);
        assert!(sections[0].items.is_empty());
    }

    #[test]
    fn test_sections() {
        let data = AggregatedData {
            ticket_issues: vec![
                epic("PROJ-1", "Checkout"),
                epic("PROJ-9", "Empty epic"),
                story("PROJ-2", "PROJ-1"),
                story("PROJ-3", ""),
                story("PROJ-4", "OTHER-5"),
                epic("SRCH-7", "Search"),
            ],
            host_issues: vec![
                host(1, "SRCH-7: index rebuild"),
                host(2, "Unrelated cleanup"),
                host(3, "Follow-up for PROJ-1"),
            ],
            ..Default::default()
        };
        let items = normalize_all(&data);
        let sections = epic_sections(&items, &TitleSubstringAssociator);

        assert_eq!(
            section_keys(&sections),
            vec![
                ("PROJ-1".to_string(), vec!["PROJ-2".to_string(), "acme/app #3".to_string()]),
                ("SRCH-7".to_string(), vec!["acme/app #1".to_string()]),
                ("OTHER-5".to_string(), vec!["PROJ-4".to_string()]),
                (
                    NO_EPIC.to_string(),
                    vec!["PROJ-3".to_string(), "acme/app #2".to_string()]
                ),
            ]
        );
        assert_eq!(sections[0].name, "Checkout");
        assert_eq!(sections[2].name, "OTHER-5");
    }

    #[test]
    fn test_first_registered_epic_wins_substring_match() {
        let epics = [
            EpicRef { key: "PROJ-1", name: "One" },
            EpicRef { key: "PROJ-10", name: "Ten" },
        ];
        // "PROJ-10" contains "PROJ-1", so the earlier epic is chosen
        let issue = host(4, "Work for PROJ-10");
        assert_eq!(TitleSubstringAssociator.associate(&issue, &epics), Some(0));
        assert_eq!(TitleSubstringAssociator.associate(&host(5, "nothing"), &epics), None);
    }

    struct NeverAssociate;

    impl EpicAssociator for NeverAssociate {
        fn associate(&self, _: &HostIssue, _: &[EpicRef<'_>]) -> Option<usize> {
            None
        }
    }

    #[test]
    fn test_custom_associator() {
        let data = AggregatedData {
            ticket_issues: vec![epic("PROJ-1", "Checkout"), story("PROJ-2", "PROJ-1")],
            host_issues: vec![host(1, "PROJ-1 polish")],
            ..Default::default()
        };
        let items = normalize_all(&data);
        let sections = epic_sections(&items, &NeverAssociate);
        assert_eq!(sections[0].items.len(), 1);
        assert_eq!(sections[1].key, NO_EPIC);
        assert_eq!(sections[1].items.len(), 1);
    }
}
