use crate::model::item::PlanningItem;
use crate::model::quarter::QuarterAxis;
use crate::ops::aggregate::{Initiative, extract_themes};
use crate::render::markup::{self, Markup};

/// Themes with their initiatives drawn as bars across the quarter axis.
pub fn render_strategic(out: &mut Markup, items: &[PlanningItem<'_>], axis: &QuarterAxis) {
    out.line("<h3>Strategic Roadmap</h3>");
    out.line("<p>This view shows strategic themes and initiatives across quarters.</p>");

    markup::open_axis_table(out, "Theme / Initiative", axis);
    for theme in extract_themes(items, axis) {
        markup::group_row(out, &theme.name, axis);
        for initiative in &theme.initiatives {
            initiative_row(out, initiative, axis);
        }
    }
    markup::close_table(out);
}

fn initiative_row(out: &mut Markup, initiative: &Initiative, axis: &QuarterAxis) {
    let status = initiative.status;
    out.line("<tr>");
    out.line(format!(
        "<td class=\"confluenceTd\" style=\"padding: 10px; padding-left: 20px; border: 1px solid #ddd;\">\
         {}<br/>{} <small>{} item(s)</small></td>",
        markup::escape(&initiative.name),
        markup::status_badge(status),
        initiative.item_count
    ));
    for index in 0..axis.len() {
        if initiative.placement.covers(index) {
            out.line(format!(
                "<td class=\"confluenceTd\" style=\"text-align: center; padding: 10px; border: 1px solid #ddd; \
                 background-color:{}; color:{};\">•</td>",
                status.color(),
                status.text_color()
            ));
        } else {
            out.line("<td class=\"confluenceTd\" style=\"border: 1px solid #ddd; padding: 10px;\"></td>");
        }
    }
    out.line("</tr>");
}
