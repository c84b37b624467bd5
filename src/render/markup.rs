//! Storage-format building blocks shared by the roadmap views.

use crate::model::item::{ItemSource, PlanningItem};
use crate::model::quarter::QuarterAxis;
use crate::model::status::PlanningStatus;
use crate::ops::placement::{CellMarker, Placement};

const TH_STYLE: &str =
    "padding: 10px; text-align: center; border: 1px solid #ddd; background-color: #f2f2f2;";
const EMPTY_CELL_STYLE: &str = "border: 1px solid #ddd; padding: 10px;";
const GROUP_ROW_STYLE: &str = "padding: 10px; background-color:#e9f0f7; font-weight:bold; \
                               border: 1px solid #ddd; border-bottom: 2px solid #4a6785;";

/// Line-oriented output buffer.
#[derive(Debug, Default)]
pub struct Markup {
    buf: String,
}

impl Markup {
    pub fn new() -> Self {
        Markup::default()
    }

    /// Append `s` followed by a newline.
    pub fn line(&mut self, s: impl AsRef<str>) {
        self.buf.push_str(s.as_ref());
        self.buf.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Escape text for inclusion in element content or attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inline colored status badge.
pub fn status_badge(status: PlanningStatus) -> String {
    format!(
        "<span style=\"display: inline-block; padding: 3px 8px; border-radius: 3px; \
         background-color:{}; color:{}; font-size: 12px; margin-right: 5px;\">{}</span>",
        status.color(),
        status.text_color(),
        status.label()
    )
}

/// Inline badge for a native source status such as `In Review` or `closed`.
pub fn native_status_badge(status: &str) -> String {
    let (background, color) = match status.to_lowercase().as_str() {
        "done" | "closed" | "resolved" | "complete" | "completed" | "ready for deployment" => {
            ("#36B37E", "#FFFFFF")
        }
        "in progress" | "review" | "reviewing" => ("#FFAB00", "#000000"),
        "blocked" | "impediment" => ("#FF5630", "#FFFFFF"),
        _ => ("#6554C0", "#FFFFFF"),
    };
    format!(
        "<span style=\"display:inline-block; padding:2px 5px; background-color:{}; color:{}; \
         border-radius:3px; font-size:11px; text-align:center;\">{}</span>",
        background,
        color,
        escape(status)
    )
}

/// Stable palette slot for a record: a 31-multiplier string hash of `seed`
/// plus `offset`, modulo `len`.
pub fn palette_index(seed: &str, offset: u64, len: usize) -> usize {
    let hash = seed
        .chars()
        .fold(0u64, |h, c| h.wrapping_mul(31).wrapping_add(u64::from(c)))
        .wrapping_add(offset);
    (hash % len.max(1) as u64) as usize
}

/// Link to the item's source page, labelled with its key.
pub fn item_link(item: &PlanningItem<'_>) -> String {
    format!(
        "<a href=\"{}\">{}</a>: {}",
        escape(item.url()),
        escape(&item.key()),
        escape(item.title())
    )
}

/// Opening `<table>` plus the header row: one label column then a column
/// per quarter.
pub fn open_axis_table(out: &mut Markup, first_column: &str, axis: &QuarterAxis) {
    out.line(
        "<table class=\"confluenceTable\" style=\"width: 100%; border-collapse: collapse; margin-top: 20px;\">",
    );
    out.line("<thead>");
    out.line("<tr>");
    out.line(format!(
        "<th class=\"confluenceTh\" style=\"padding: 10px; text-align: left; border: 1px solid #ddd; \
         background-color: #f2f2f2; width: 25%;\">{}</th>",
        escape(first_column)
    ));
    for quarter in axis.iter() {
        out.line(format!(
            "<th class=\"confluenceTh\" style=\"{}\">{}</th>",
            TH_STYLE, quarter
        ));
    }
    out.line("</tr>");
    out.line("</thead>");
    out.line("<tbody>");
}

pub fn close_table(out: &mut Markup) {
    out.line("</tbody>");
    out.line("</table>");
}

/// A full-width group header row.
pub fn group_row(out: &mut Markup, label: &str, axis: &QuarterAxis) {
    out.line("<tr>");
    out.line(format!(
        "<td class=\"confluenceTd\" colspan=\"{}\" style=\"{}\">{}</td>",
        axis.len() + 1,
        GROUP_ROW_STYLE,
        escape(label)
    ));
    out.line("</tr>");
}

/// A group header row drawn as a label cell plus one shaded cell per quarter.
pub fn banded_group_row(out: &mut Markup, label: &str, axis: &QuarterAxis) {
    out.line("<tr>");
    out.line(format!(
        "<td class=\"confluenceTd\" style=\"{}\">{}</td>",
        GROUP_ROW_STYLE,
        escape(label)
    ));
    for _ in axis.iter() {
        out.line(
            "<td class=\"confluenceTd\" style=\"padding: 10px; border: 1px solid #ddd; background-color:#e9f0f7;\"></td>",
        );
    }
    out.line("</tr>");
}

/// One item row: a details cell followed by its timeline cells.
pub fn item_row(out: &mut Markup, item: &PlanningItem<'_>, placement: Placement, axis: &QuarterAxis) {
    out.line("<tr>");
    item_details_cell(out, item);
    for index in 0..axis.len() {
        out.line(timeline_cell(placement.marker(index), item.status));
    }
    out.line("</tr>");
}

fn item_details_cell(out: &mut Markup, item: &PlanningItem<'_>) {
    out.line("<td class=\"confluenceTd\" style=\"vertical-align:top; padding: 10px; border: 1px solid #ddd;\">");
    out.line(format!(
        "<strong><a href=\"{}\" style=\"text-decoration: none;\">{}</a></strong>: {}<br/>",
        escape(item.url()),
        escape(&item.key()),
        escape(item.title())
    ));
    out.line("<div style=\"margin-top: 5px;\">");
    out.line(status_badge(item.status));
    let assignee_label = match item.source {
        ItemSource::Ticket(_) => "Assignee",
        ItemSource::Host(_) => "Assignees",
    };
    out.line(format!(
        "<small>{}: {}</small>",
        assignee_label,
        escape(&item.assignees())
    ));
    out.line("</div>");
    out.line("</td>");
}

/// Glyph shown in a covered cell.
pub fn marker_glyph(marker: CellMarker) -> &'static str {
    match marker {
        CellMarker::Single => "●",
        CellMarker::Start => "▶",
        CellMarker::Interior => "━",
        CellMarker::End => "◀",
    }
}

/// A single quarter cell of an item row.
pub fn timeline_cell(marker: Option<CellMarker>, status: PlanningStatus) -> String {
    let Some(marker) = marker else {
        return format!("<td class=\"confluenceTd\" style=\"{}\"></td>", EMPTY_CELL_STYLE);
    };
    let color = status.color();
    let border = match marker {
        CellMarker::Single => "border: 1px solid #ddd; border-radius: 4px;".to_string(),
        CellMarker::Start => format!(
            "border: 1px solid #ddd; border-left: 3px solid {c}; border-top: 1px solid {c}; border-bottom: 1px solid {c};",
            c = color
        ),
        CellMarker::End => format!(
            "border: 1px solid #ddd; border-right: 3px solid {c}; border-top: 1px solid {c}; border-bottom: 1px solid {c};",
            c = color
        ),
        CellMarker::Interior => format!(
            "border: 1px solid #ddd; border-top: 1px solid {c}; border-bottom: 1px solid {c};",
            c = color
        ),
    };
    format!(
        "<td class=\"confluenceTd\" style=\"text-align: center; padding: 10px; background-color:{}; color:{}; {}\">\
         <span style=\"font-weight: bold;\">{}</span></td>",
        color,
        status.text_color(),
        border,
        marker_glyph(marker)
    )
}

/// Status colors and timeline glyphs, shown under the grid views.
pub fn grid_legend(out: &mut Markup) {
    out.line("<div style=\"margin-top: 20px; margin-bottom: 20px;\">");
    out.line("<h4>Legend</h4>");
    out.line("<table style=\"width: auto; border-collapse: collapse; margin-bottom: 15px;\">");
    out.line("<tr>");
    for status in PlanningStatus::ALL {
        out.line(format!(
            "<td style=\"padding: 5px 10px; margin-right: 10px; background-color:{}; color:{}; \
             border-radius: 3px; font-size: 12px;\">{}</td>",
            status.color(),
            status.text_color(),
            status.label()
        ));
        out.line("<td style=\"padding-right: 15px;\"></td>");
    }
    out.line("</tr>");
    out.line("</table>");

    out.line("<table style=\"width: auto; border-collapse: collapse; margin-bottom: 15px;\">");
    out.line("<tr>");
    for (marker, text) in [
        (CellMarker::Single, "Single quarter item"),
        (CellMarker::Start, "Start of multi-quarter item"),
        (CellMarker::Interior, "Middle of timeline"),
        (CellMarker::End, "End of multi-quarter item"),
    ] {
        out.line(format!(
            "<td style=\"padding: 5px 10px; font-weight: bold;\">{}</td>",
            marker_glyph(marker)
        ));
        out.line(format!("<td style=\"padding-right: 15px;\">{}</td>", text));
    }
    out.line("</tr>");
    out.line("</table>");
    out.line("</div>");
}

/// The closing legend panel of every roadmap page.
pub fn legend_panel(out: &mut Markup) {
    out.line("<ac:structured-macro ac:name=\"info\">");
    out.line("<ac:rich-text-body>");
    out.line("<p><strong>Legend</strong></p>");
    out.line("<ul>");
    for status in PlanningStatus::ALL {
        out.line(format!(
            "<li><span style=\"display:inline-block; width:20px; height:10px; background-color:{}; \
             margin-right:5px;\"></span>{}</li>",
            status.color(),
            status.label()
        ));
    }
    out.line("</ul>");
    out.line("<p><small>This roadmap shows planned work items with their expected timeframes.</small></p>");
    out.line("</ac:rich-text-body>");
    out.line("</ac:structured-macro>");
}
