use chrono::NaiveDate;
use serde::Serialize;

use crate::model::item::{ItemKind, PlanningItem};
use crate::model::quarter::QuarterAxis;
use crate::model::status::PlanningStatus;
use crate::ops::deps::DependencyGraph;
use crate::ops::placement::Placement;
use crate::ops::timeframe::Timeframe;
use crate::util::unicode::{pad_to_width, truncate_to_width};

/// Width of the title column in item listings.
const TITLE_WIDTH: usize = 40;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    pub key: String,
    pub kind: ItemKind,
    pub title: String,
    pub status: PlanningStatus,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub start_quarter: String,
    pub end_quarter: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

#[derive(Serialize)]
pub struct GroupJson {
    pub label: String,
    pub items: Vec<ItemJson>,
}

#[derive(Serialize)]
pub struct QuartersJson {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub quarters: Vec<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn item_to_json(item: &PlanningItem<'_>, placement: Placement, axis: &QuarterAxis) -> ItemJson {
    ItemJson {
        key: item.key(),
        kind: item.kind(),
        title: item.title().to_string(),
        status: item.status,
        start: item.span.start,
        end: item.span.end,
        start_quarter: quarter_label(axis, placement.start),
        end_quarter: quarter_label(axis, placement.end),
        url: item.url().to_string(),
        dependencies: item.dependencies.clone(),
    }
}

pub fn quarters_to_json(timeframe: &Timeframe, axis: &QuarterAxis) -> QuartersJson {
    QuartersJson {
        start: timeframe.start,
        end: timeframe.end,
        quarters: axis.labels(),
    }
}

fn quarter_label(axis: &QuarterAxis, index: usize) -> String {
    axis.get(index).map(|q| q.to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a group listing header
pub fn format_group_header(label: &str, count: usize) -> String {
    format!("== {} ({}) ==", label, count)
}

/// Format one item as a fixed-column line
pub fn format_item_line(
    item: &PlanningItem<'_>,
    placement: Placement,
    axis: &QuarterAxis,
    key_width: usize,
) -> String {
    let start_q = quarter_label(axis, placement.start);
    let end_q = quarter_label(axis, placement.end);
    let quarters = if placement.start == placement.end {
        start_q
    } else {
        format!("{} → {}", start_q, end_q)
    };
    format!(
        "  {}  {}  {}  {} .. {}  {}",
        pad_to_width(&item.key(), key_width),
        pad_to_width(&truncate_to_width(item.title(), TITLE_WIDTH), TITLE_WIDTH),
        pad_to_width(item.status.label(), 11),
        item.span.start,
        item.span.end,
        quarters
    )
}

/// Format the resolved window and its axis
pub fn format_quarters(timeframe: &Timeframe, axis: &QuarterAxis) -> Vec<String> {
    let mut lines = vec![format!("window: {} .. {}", timeframe.start, timeframe.end)];
    lines.extend(axis.iter().map(|q| format!("  {}", q)));
    lines
}

/// Format the dependency graph as node and edge listings
pub fn format_dependency_graph(graph: &DependencyGraph) -> Vec<String> {
    if graph.is_empty() {
        return vec!["no dependencies".to_string()];
    }
    let mut lines = vec!["nodes:".to_string()];
    for node in &graph.nodes {
        lines.push(format!("  {}  {}", node.id, node.title));
    }
    if !graph.edges.is_empty() {
        lines.push("edges:".to_string());
        for edge in &graph.edges {
            lines.push(format!("  {} -> {}", edge.from, edge.to));
        }
    }
    lines
}
