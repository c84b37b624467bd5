use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate};

use crate::model::source::AggregatedData;
use crate::render::markup::{Markup, escape, palette_index};

const BAR_COLORS: [&str; 10] = [
    "#0052CC", "#6554C0", "#00875A", "#FF5630", "#FF8B00", "#36B37E", "#00B8D9", "#6554C0",
    "#4C9AFF", "#172B4D",
];
const CELL: &str = "text-align:center; padding:8px; border:1px solid #ddd;";

/// One chart row, active from creation to last update.
#[derive(Debug, Clone, PartialEq, Eq)]
struct GanttRow {
    /// Pre-escaped label markup
    label: String,
    color: &'static str,
    created: NaiveDate,
    updated: NaiveDate,
}

/// Month-by-month activity chart across all source records. Records with
/// no creation time are left off the chart.
pub fn render_gantt(out: &mut Markup, data: &AggregatedData) {
    let rows = gantt_rows(data);
    out.line("<h2>Gantt Chart</h2>");

    let (Some(earliest), Some(latest)) = (
        rows.iter().map(|r| r.created).min(),
        rows.iter().map(|r| r.updated).max(),
    ) else {
        out.line("<p>No data available to generate a Gantt chart.</p>");
        return;
    };

    let first = earliest.with_day(1).unwrap_or(earliest);
    let months = month_offset(first, latest).max(0) as usize + 1;

    out.line("<ac:layout>");
    out.line("<ac:layout-section ac:type=\"single\">");
    out.line("<ac:layout-cell>");
    out.line("<table style=\"width:100%; border-collapse:collapse;\">");
    out.line("<tbody>");
    out.line("<tr>");
    out.line(
        "<th style=\"background-color:#f4f5f7; text-align:left; padding:8px; border:1px solid #ddd; width:250px;\">Item</th>",
    );
    for k in 0..months {
        let month = first.checked_add_months(Months::new(k as u32)).unwrap_or(first);
        out.line(format!(
            "<th style=\"background-color:#f4f5f7; {}\">{}</th>",
            CELL,
            month.format("%b %Y")
        ));
    }
    out.line("</tr>");

    for row in &rows {
        let (start, end) = bar_bounds(first, months, row.created, row.updated);
        out.line("<tr>");
        out.line(format!(
            "<td style=\"text-align:left; padding:8px; border:1px solid #ddd;\">{}</td>",
            row.label
        ));
        for k in 0..months {
            if (start..=end).contains(&k) {
                out.line(format!(
                    "<td style=\"{} background-color:{}; color:white;\">•</td>",
                    CELL, row.color
                ));
            } else {
                out.line(format!("<td style=\"{}\"></td>", CELL));
            }
        }
        out.line("</tr>");
    }

    out.line("</tbody>");
    out.line("</table>");
    out.line("</ac:layout-cell>");
    out.line("</ac:layout-section>");
    out.line("</ac:layout>");

    out.line("<ac:structured-macro ac:name=\"info\">");
    out.line("<ac:rich-text-body>");
    out.line("<p><strong>Legend</strong></p>");
    out.line("<ul>");
    out.line("<li>Each row is a ticket, a code-host issue or a pull request</li>");
    out.line("<li>Colored cells mark the months from creation to last update</li>");
    out.line("</ul>");
    out.line("</ac:rich-text-body>");
    out.line("</ac:structured-macro>");
}

fn gantt_rows(data: &AggregatedData) -> Vec<GanttRow> {
    let tickets = data
        .ticket_issues
        .iter()
        .filter(|i| dated(&i.created_date))
        .map(|issue| GanttRow {
            label: link(&issue.url, &issue.key, &issue.summary),
            color: BAR_COLORS[palette_index(&issue.key, 0, BAR_COLORS.len())],
            created: issue.created_date.date_naive(),
            updated: issue.updated_date.date_naive(),
        });
    let hosts = data
        .host_issues
        .iter()
        .filter(|i| dated(&i.created_date))
        .map(|issue| GanttRow {
            label: link(
                &issue.url,
                &format!("{} #{}", issue.repository, issue.number),
                &issue.title,
            ),
            color: BAR_COLORS[palette_index(&issue.repository, issue.number, BAR_COLORS.len())],
            created: issue.created_date.date_naive(),
            updated: issue.updated_date.date_naive(),
        });
    let prs = data
        .host_pull_requests
        .iter()
        .filter(|p| dated(&p.created_date))
        .map(|pr| GanttRow {
            label: link(&pr.url, &format!("{} #{}", pr.repository, pr.number), &pr.title),
            color: BAR_COLORS[palette_index(&pr.repository, pr.number, BAR_COLORS.len())],
            created: pr.created_date.date_naive(),
            updated: pr.updated_date.date_naive(),
        });
    tickets.chain(hosts).chain(prs).collect()
}

/// False for the zero value and the epoch.
fn dated(created: &DateTime<FixedOffset>) -> bool {
    created.timestamp() > 0
}

fn link(url: &str, label: &str, title: &str) -> String {
    format!(
        "<a href=\"{}\">{}</a>: {}",
        escape(url),
        escape(label),
        escape(title)
    )
}

/// Whole months from the month of `from` to the month of `to`.
fn month_offset(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month())
}

/// Inclusive month columns covered by a bar, clamped into `0..months`.
fn bar_bounds(
    first: NaiveDate,
    months: usize,
    created: NaiveDate,
    updated: NaiveDate,
) -> (usize, usize) {
    let last = months.saturating_sub(1) as i64;
    let end = month_offset(first, updated).clamp(0, last);
    let start = month_offset(first, created).clamp(0, last).min(end);
    (start as usize, end as usize)
}
