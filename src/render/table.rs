use crate::model::source::AggregatedData;
use crate::render::markup::{Markup, escape, native_status_badge};

const TH: &str = "style=\"background-color: #f4f5f7; text-align: center; border: 1px solid #c1c7d0;\"";

/// One table per source collection, skipping empty collections.
pub fn render_table(out: &mut Markup, data: &AggregatedData) {
    if !data.ticket_issues.is_empty() {
        open_table(
            out,
            "Tickets",
            &["Key", "Summary", "Status", "Assignee", "Priority", "Updated"],
        );
        for (i, issue) in data.ticket_issues.iter().enumerate() {
            row(
                out,
                i,
                &[
                    link(&issue.url, &issue.key),
                    escape(&issue.summary),
                    native_status_badge(&issue.status),
                    escape(&issue.assignee),
                    escape(&issue.priority),
                    issue.updated_date.format("%Y-%m-%d").to_string(),
                ],
            );
        }
        close_table(out);
    }

    if !data.host_issues.is_empty() {
        open_table(
            out,
            "Code-Host Issues",
            &["Repository", "Number", "Title", "State", "Assignees", "Updated"],
        );
        for (i, issue) in data.host_issues.iter().enumerate() {
            row(
                out,
                i,
                &[
                    escape(&issue.repository),
                    link(&issue.url, &format!("#{}", issue.number)),
                    escape(&issue.title),
                    native_status_badge(&issue.state),
                    escape(&issue.assignees.join(", ")),
                    issue.updated_date.format("%Y-%m-%d").to_string(),
                ],
            );
        }
        close_table(out);
    }

    if !data.host_pull_requests.is_empty() {
        open_table(
            out,
            "Pull Requests",
            &["Repository", "Number", "Title", "State", "Assignees", "Updated"],
        );
        for (i, pr) in data.host_pull_requests.iter().enumerate() {
            let state = if pr.is_draft {
                format!("{} (Draft)", pr.state)
            } else {
                pr.state.clone()
            };
            row(
                out,
                i,
                &[
                    escape(&pr.repository),
                    link(&pr.url, &format!("#{}", pr.number)),
                    escape(&pr.title),
                    native_status_badge(&state),
                    escape(&pr.assignees.join(", ")),
                    pr.updated_date.format("%Y-%m-%d").to_string(),
                ],
            );
        }
        close_table(out);
    }
}

fn link(url: &str, text: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(url), escape(text))
}

fn open_table(out: &mut Markup, heading: &str, columns: &[&str]) {
    out.line(format!("<h2>{}</h2>", heading));
    out.line("<table>");
    out.line("<tbody>");
    out.line("<tr>");
    for column in columns {
        out.line(format!("<th {}>{}</th>", TH, column));
    }
    out.line("</tr>");
}

/// A data row; even rows are shaded.
fn row(out: &mut Markup, index: usize, cells: &[String]) {
    let shade = if index % 2 == 0 { " background-color: #f8f9fa;" } else { "" };
    out.line("<tr>");
    for cell in cells {
        out.line(format!(
            "<td style=\"border: 1px solid #c1c7d0;{}\">{}</td>",
            shade, cell
        ));
    }
    out.line("</tr>");
}

fn close_table(out: &mut Markup) {
    out.line("</tbody>");
    out.line("</table>");
}
