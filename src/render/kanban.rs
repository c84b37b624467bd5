use crate::model::source::{AggregatedData, HostIssue, HostPullRequest, TicketIssue};
use crate::render::markup::{Markup, escape, palette_index};

const BORDER_COLORS: [&str; 10] = [
    "#0052CC", "#6554C0", "#00875A", "#FF5630", "#FF8B00", "#36B37E", "#00B8D9", "#4C9AFF",
    "#172B4D", "#403294",
];
const BACKGROUND_COLORS: [&str; 10] = [
    "#DEEBFF", "#EAE6FF", "#E3FCEF", "#FFEBE6", "#FFF0B3", "#ABF5D1", "#E6FCFF", "#B3D4FF",
    "#F4F5F7", "#EAE6FF",
];

/// Board columns, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KanbanColumn {
    ToDo,
    InProgress,
    Review,
    Done,
}

impl KanbanColumn {
    pub const ALL: [KanbanColumn; 4] = [
        KanbanColumn::ToDo,
        KanbanColumn::InProgress,
        KanbanColumn::Review,
        KanbanColumn::Done,
    ];

    pub fn label(self) -> &'static str {
        match self {
            KanbanColumn::ToDo => "To Do",
            KanbanColumn::InProgress => "In Progress",
            KanbanColumn::Review => "Review",
            KanbanColumn::Done => "Done",
        }
    }

    /// Column for a ticket status, by case-insensitive substring. Unknown
    /// statuses land in To Do.
    pub fn for_ticket(status: &str) -> KanbanColumn {
        let status = status.to_lowercase();
        if contains_any(&status, &["to do", "backlog", "open"]) {
            KanbanColumn::ToDo
        } else if contains_any(&status, &["in progress", "doing"]) {
            KanbanColumn::InProgress
        } else if contains_any(&status, &["review", "testing", "qa"]) {
            KanbanColumn::Review
        } else if contains_any(&status, &["done", "closed", "resolved"]) {
            KanbanColumn::Done
        } else {
            KanbanColumn::ToDo
        }
    }

    pub fn for_host_issue(state: &str) -> KanbanColumn {
        if state == "open" {
            KanbanColumn::ToDo
        } else {
            KanbanColumn::Done
        }
    }

    /// Open pull requests that can merge are in review.
    pub fn for_pull_request(state: &str, merge_status: &str) -> KanbanColumn {
        match state {
            "open" if matches!(merge_status, "clean" | "unstable") => KanbanColumn::Review,
            "closed" => KanbanColumn::Done,
            _ => KanbanColumn::InProgress,
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// A four-column board laid out with page layout cells.
pub fn render_kanban(out: &mut Markup, data: &AggregatedData) {
    out.line("<h2>Kanban Board</h2>");
    out.line("<ac:layout>");
    out.line("<ac:layout-section ac:type=\"four_equal\">");
    for column in KanbanColumn::ALL {
        out.line("<ac:layout-cell>");
        out.line(format!(
            "<h3 style=\"text-align:center;background-color:#f4f5f7;padding:8px;margin-bottom:10px;border-radius:3px;\">{}</h3>",
            column.label()
        ));
        for issue in &data.ticket_issues {
            if KanbanColumn::for_ticket(&issue.status) == column {
                ticket_card(out, issue);
            }
        }
        for issue in &data.host_issues {
            if KanbanColumn::for_host_issue(&issue.state) == column {
                host_issue_card(out, issue);
            }
        }
        for pr in &data.host_pull_requests {
            if KanbanColumn::for_pull_request(&pr.state, &pr.merge_status) == column {
                pull_request_card(out, pr);
            }
        }
        out.line("</ac:layout-cell>");
    }
    out.line("</ac:layout-section>");
    out.line("</ac:layout>");
}

fn ticket_card(out: &mut Markup, issue: &TicketIssue) {
    let slot = palette_index(&issue.key, 0, BORDER_COLORS.len());
    let assignee = (!issue.assignee.is_empty()).then_some(issue.assignee.as_str());
    card(out, slot, &issue.url, &issue.key, &issue.summary, assignee, false);
}

fn host_issue_card(out: &mut Markup, issue: &HostIssue) {
    let slot = palette_index(&issue.repository, issue.number, BORDER_COLORS.len());
    let label = format!("{} #{}", issue.repository, issue.number);
    let assignees = issue.assignees.join(", ");
    let assignee = (!assignees.is_empty()).then_some(assignees.as_str());
    card(out, slot, &issue.url, &label, &issue.title, assignee, false);
}

fn pull_request_card(out: &mut Markup, pr: &HostPullRequest) {
    let slot = palette_index(&pr.repository, pr.number, BORDER_COLORS.len());
    let label = format!("{} #{}", pr.repository, pr.number);
    let assignees = pr.assignees.join(", ");
    let assignee = (!assignees.is_empty()).then_some(assignees.as_str());
    card(out, slot, &pr.url, &label, &pr.title, assignee, pr.is_draft);
}

fn card(
    out: &mut Markup,
    slot: usize,
    url: &str,
    label: &str,
    title: &str,
    assignee: Option<&str>,
    draft: bool,
) {
    out.line("<ac:structured-macro ac:name=\"panel\">");
    out.line("<ac:parameter ac:name=\"borderStyle\">solid</ac:parameter>");
    out.line(format!(
        "<ac:parameter ac:name=\"borderColor\">{}</ac:parameter>",
        BORDER_COLORS[slot]
    ));
    out.line("<ac:parameter ac:name=\"borderWidth\">1</ac:parameter>");
    out.line(format!(
        "<ac:parameter ac:name=\"backgroundColor\">{}</ac:parameter>",
        BACKGROUND_COLORS[slot]
    ));
    out.line("<ac:rich-text-body>");
    out.line(format!(
        "<p><strong><a href=\"{}\">{}</a></strong></p>",
        escape(url),
        escape(label)
    ));
    out.line(format!("<p>{}</p>", escape(title)));
    if let Some(assignee) = assignee {
        out.line(format!("<p><em>Assignee: {}</em></p>", escape(assignee)));
    }
    if draft {
        out.line("<p><em>Draft</em></p>");
    }
    out.line("</ac:rich-text-body>");
    out.line("</ac:structured-macro>");
}
