use crate::model::item::PlanningItem;
use crate::ops::aggregate::{Milestone, extract_milestones};
use crate::render::markup::{self, Markup};

/// Milestones as a flat table: target date, status and deliverables.
pub fn render_release(out: &mut Markup, items: &[PlanningItem<'_>], timeframe: &str) {
    out.line("<h3>Release Planning</h3>");
    out.line("<p>This view shows releases and milestones with their key deliverables.</p>");
    if !timeframe.is_empty() {
        out.line(format!(
            "<p><em>Timeframe: {}</em></p>",
            markup::escape(timeframe)
        ));
    }

    out.line(
        "<table class=\"confluenceTable\" style=\"width: 100%; border-collapse: collapse; margin-top: 20px;\">",
    );
    out.line("<thead>");
    out.line("<tr>");
    for heading in ["Release/Milestone", "Target Date", "Status", "Key Deliverables"] {
        out.line(format!(
            "<th class=\"confluenceTh\" style=\"padding: 10px; text-align: left; border: 1px solid #ddd; \
             background-color: #f2f2f2;\">{}</th>",
            heading
        ));
    }
    out.line("</tr>");
    out.line("</thead>");
    out.line("<tbody>");
    for milestone in extract_milestones(items) {
        milestone_row(out, &milestone);
    }
    markup::close_table(out);
}

fn milestone_row(out: &mut Markup, milestone: &Milestone<'_>) {
    const TD: &str = "class=\"confluenceTd\" style=\"vertical-align: top; padding: 10px; border: 1px solid #ddd;\"";
    let status = milestone.status;

    out.line("<tr>");
    out.line(format!("<td {}><strong>{}</strong></td>", TD, markup::escape(&milestone.name)));
    out.line(format!("<td {}>{}</td>", TD, milestone.target_date.format("%b %Y")));
    out.line(format!(
        "<td class=\"confluenceTd\" style=\"vertical-align: top; padding: 10px; border: 1px solid #ddd; \
         background-color:{}; color:{};\">{}</td>",
        status.color(),
        status.text_color(),
        status.label()
    ));
    out.line(format!("<td {}>", TD));
    out.line("<ul>");
    for item in &milestone.items {
        out.line(format!("<li>{}</li>", markup::item_link(item)));
    }
    out.line("</ul>");
    out.line("</td>");
    out.line("</tr>");
}
