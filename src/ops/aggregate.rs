use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::model::item::{DateSpan, PlanningItem};
use crate::model::quarter::QuarterAxis;
use crate::model::status::{PlanningStatus, aggregate_all};
use crate::ops::placement::{Placement, place};

/// A release or milestone with the items scheduled into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone<'a> {
    pub name: String,
    /// End date of the first item seen for this milestone
    pub target_date: NaiveDate,
    pub status: PlanningStatus,
    pub items: Vec<PlanningItem<'a>>,
}

/// A strategic theme and its initiatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: String,
    pub initiatives: Vec<Initiative>,
}

/// A named initiative rolled up from its member items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Initiative {
    pub name: String,
    pub status: PlanningStatus,
    pub placement: Placement,
    pub item_count: usize,
}

/// Collect items carrying a milestone name into milestones, in first-seen
/// order.
pub fn extract_milestones<'a>(items: &[PlanningItem<'a>]) -> Vec<Milestone<'a>> {
    let buckets = items.iter().fold(
        IndexMap::<&str, Vec<PlanningItem<'a>>>::new(),
        |mut acc, item| {
            if let Some(name) = item.milestone() {
                acc.entry(name).or_default().push(item.clone());
            }
            acc
        },
    );

    buckets
        .into_iter()
        .filter_map(|(name, items)| {
            let first = items.first()?;
            Some(Milestone {
                name: name.to_string(),
                target_date: first.span.end,
                status: aggregate_all(items.iter().map(|i| i.status))?,
                items,
            })
        })
        .collect()
}

/// Collect items carrying both a theme and an initiative into themes.
///
/// Each initiative is built once from all of its members: its status is the
/// aggregate of theirs and its placement runs from the earliest member start
/// to the latest member end.
pub fn extract_themes(items: &[PlanningItem<'_>], axis: &QuarterAxis) -> Vec<Theme> {
    let mut themes: IndexMap<&str, IndexMap<&str, Vec<&PlanningItem<'_>>>> = IndexMap::new();
    for item in items {
        if let (Some(theme), Some(initiative)) = (item.theme(), item.initiative()) {
            themes
                .entry(theme)
                .or_default()
                .entry(initiative)
                .or_default()
                .push(item);
        }
    }

    themes
        .into_iter()
        .map(|(name, initiatives)| Theme {
            name: name.to_string(),
            initiatives: initiatives
                .into_iter()
                .filter_map(|(name, members)| build_initiative(name, &members, axis))
                .collect(),
        })
        .collect()
}

fn build_initiative(
    name: &str,
    members: &[&PlanningItem<'_>],
    axis: &QuarterAxis,
) -> Option<Initiative> {
    let status = aggregate_all(members.iter().map(|i| i.status))?;
    let earliest = members.iter().map(|i| i.span.start).min()?;
    let latest = members.iter().map(|i| i.span.end).max()?;
    Some(Initiative {
        name: name.to_string(),
        status,
        placement: place(&DateSpan::new(earliest, latest), axis),
        item_count: members.len(),
    })
}

/// Item counts per status, in legend order, omitting statuses with no items.
pub fn status_counts<'i, 'a: 'i, I>(items: I) -> Vec<(PlanningStatus, usize)>
where
    I: IntoIterator<Item = &'i PlanningItem<'a>>,
{
    let mut counts = [0usize; PlanningStatus::ALL.len()];
    for item in items {
        if let Some(slot) = PlanningStatus::ALL.iter().position(|s| *s == item.status) {
            counts[slot] += 1;
        }
    }
    PlanningStatus::ALL
        .into_iter()
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .collect()
}
