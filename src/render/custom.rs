use indexmap::IndexMap;

use crate::model::source::{AggregatedData, TicketIssue};
use crate::render::markup::{Markup, escape};

/// Tickets listed under their team, teams in first-seen order. Tickets
/// without a team are left out.
pub fn render_custom(out: &mut Markup, data: &AggregatedData) {
    let mut teams: IndexMap<&str, Vec<&TicketIssue>> = IndexMap::new();
    for issue in data.ticket_issues.iter().filter(|i| !i.team.is_empty()) {
        teams.entry(issue.team.as_str()).or_default().push(issue);
    }

    out.line("<h2>Custom Format</h2>");
    out.line("<h3>By Team</h3>");
    if teams.is_empty() {
        out.line("<p><em>No tickets have a team.</em></p>");
        return;
    }
    for (team, issues) in teams {
        out.line(format!("<h4>{}</h4>", escape(team)));
        out.line("<ul>");
        for issue in issues {
            out.line(format!(
                "<li><a href=\"{}\">{}</a>: {} ({})</li>",
                escape(&issue.url),
                escape(&issue.key),
                escape(&issue.summary),
                escape(&issue.status)
            ));
        }
        out.line("</ul>");
    }
}
