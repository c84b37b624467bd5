use crate::model::item::PlanningItem;
use crate::model::quarter::QuarterAxis;
use crate::ops::aggregate::status_counts;
use crate::ops::group::{GroupingKey, partition};
use crate::ops::placement::place;
use crate::render::markup::{self, Markup};

/// Grouped item rows over the quarter axis, preceded by a status summary.
pub fn render_timeline(
    out: &mut Markup,
    items: &[PlanningItem<'_>],
    axis: &QuarterAxis,
    grouping: GroupingKey,
) {
    out.line("<h3>Timeline View</h3>");
    out.line("<p>This view shows all items organized chronologically by quarter.</p>");

    status_summary(out, items);

    markup::open_axis_table(out, "Item", axis);
    for group in partition(items, grouping) {
        markup::group_row(out, &group.label, axis);
        for item in &group.items {
            markup::item_row(out, item, place(&item.span, axis), axis);
        }
    }
    markup::close_table(out);

    markup::grid_legend(out);
}

fn status_summary(out: &mut Markup, items: &[PlanningItem<'_>]) {
    let counts = status_counts(items);
    if counts.is_empty() {
        return;
    }
    out.line("<table class=\"confluenceTable\" style=\"width: auto; border-collapse: collapse;\">");
    out.line("<tbody>");
    out.line("<tr>");
    out.line("<th class=\"confluenceTh\" style=\"padding: 5px 10px; border: 1px solid #ddd;\">Status</th>");
    out.line("<th class=\"confluenceTh\" style=\"padding: 5px 10px; border: 1px solid #ddd;\">Items</th>");
    out.line("</tr>");
    for (status, count) in counts {
        out.line("<tr>");
        out.line(format!(
            "<td class=\"confluenceTd\" style=\"padding: 5px 10px; border: 1px solid #ddd;\">{}</td>",
            markup::status_badge(status)
        ));
        out.line(format!(
            "<td class=\"confluenceTd\" style=\"padding: 5px 10px; border: 1px solid #ddd; text-align: right;\">{}</td>",
            count
        ));
        out.line("</tr>");
    }
    out.line("</tbody>");
    out.line("</table>");
}
