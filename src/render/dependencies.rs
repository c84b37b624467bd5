use crate::ops::deps::DependencyGraph;
use crate::render::markup::Markup;

/// Append the dependency section: a heading, then the diagram as a
/// PlantUML macro, or a short note when there is nothing to draw.
pub fn render_dependencies(out: &mut Markup, graph: &DependencyGraph) {
    out.line("<h3>Dependencies</h3>");
    if graph.is_empty() {
        out.line("<p><em>No dependencies between items.</em></p>");
        return;
    }

    out.line("<p>This diagram shows dependencies between work items.</p>");
    out.line("<ac:structured-macro ac:name=\"plantuml\">");
    out.line("<ac:plain-text-body><![CDATA[");
    out.line("@startuml");
    out.line("skinparam backgroundColor transparent");
    out.line("skinparam rectangle {");
    out.line("  BorderColor #4a6785");
    out.line("  BackgroundColor #f4f5f7");
    out.line("}");
    out.line("");

    for node in &graph.nodes {
        out.line(format!(
            "rectangle \"{}\\n{}\" as {}",
            diagram_text(&node.key),
            diagram_text(&node.title),
            diagram_alias(&node.id)
        ));
    }
    out.line("");
    for edge in &graph.edges {
        out.line(format!(
            "{} --> {}",
            diagram_alias(&edge.from),
            diagram_alias(&edge.to)
        ));
    }

    out.line("@enduml");
    out.line("]]></ac:plain-text-body>");
    out.line("</ac:structured-macro>");
}

/// Quote-safe label text. `]]>` would end the CDATA section early.
fn diagram_text(s: &str) -> String {
    s.replace('"', "'").replace("]]>", "]] >")
}

/// Node alias with anything outside `[A-Za-z0-9_.-]` replaced by `_`.
fn diagram_alias(id: &str) -> String {
    let alias: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if alias.is_empty() { "_".to_string() } else { alias }
}
