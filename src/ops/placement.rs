use serde::Serialize;

use crate::model::item::DateSpan;
use crate::model::quarter::{Quarter, QuarterAxis};

/// Inclusive column bounds of an item on the quarter axis.
///
/// Always `start <= end <= axis.last_index()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub start: usize,
    pub end: usize,
}

/// How a single axis cell relates to a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMarker {
    /// Item starts and ends in this quarter
    Single,
    Start,
    Interior,
    End,
}

impl Placement {
    /// The marker for column `index`, or `None` when the item does not cover it.
    pub fn marker(&self, index: usize) -> Option<CellMarker> {
        if index < self.start || index > self.end {
            return None;
        }
        Some(if self.start == self.end {
            CellMarker::Single
        } else if index == self.start {
            CellMarker::Start
        } else if index == self.end {
            CellMarker::End
        } else {
            CellMarker::Interior
        })
    }

    pub fn covers(&self, index: usize) -> bool {
        self.marker(index).is_some()
    }
}

/// Place a date span on the axis.
///
/// The quarter of each endpoint is looked up in the axis. A start quarter
/// that is not on the axis clamps to the first column, an end quarter that
/// is not on the axis clamps to the last one. A start that lands after the
/// end is pulled back to the end.
pub fn place(span: &DateSpan, axis: &QuarterAxis) -> Placement {
    let end = axis
        .position(Quarter::from_date(&span.end))
        .unwrap_or(axis.last_index());
    let start = axis
        .position(Quarter::from_date(&span.start))
        .unwrap_or(0)
        .min(end);
    Placement { start, end }
}
