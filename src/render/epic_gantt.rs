use crate::model::item::PlanningItem;
use crate::model::quarter::QuarterAxis;
use crate::ops::epic::{EpicAssociator, epic_sections};
use crate::ops::placement::place;
use crate::render::markup::{self, Markup};

/// Items under their epics, drawn across the quarter axis.
pub fn render_epic_gantt(
    out: &mut Markup,
    items: &[PlanningItem<'_>],
    axis: &QuarterAxis,
    associator: &dyn EpicAssociator,
) {
    out.line("<h3>Epic Timeline</h3>");
    out.line("<p>This view shows epics and their related issues across quarters.</p>");

    markup::open_axis_table(out, "Epic", axis);
    for section in epic_sections(items, associator) {
        markup::banded_group_row(out, &section.name, axis);
        for item in &section.items {
            markup::item_row(out, item, place(&item.span, axis), axis);
        }
    }
    markup::close_table(out);

    markup::grid_legend(out);
}
