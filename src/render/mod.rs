//! Page rendering into storage-format markup.
//!
//! `render` produces a full page in any [`Format`]: a header, a summary, the
//! format's body and an optional metadata footer. `render_document` is the
//! roadmap page and `render_roadmap` the roadmap section alone. All are
//! pure: the clock is passed in.

pub mod custom;
pub mod dependencies;
pub mod epic_gantt;
pub mod gantt;
pub mod kanban;
pub mod markup;
pub mod release;
pub mod strategic;
pub mod table;
pub mod timeline;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::model::config::RoadmapConfig;
use crate::model::source::{AggregatedData, SourceMetadata};
use crate::ops::deps::extract_dependencies;
use crate::ops::epic::TitleSubstringAssociator;
use crate::ops::group::GroupingKey;
use crate::ops::normalize::normalize_all;
use crate::ops::timeframe::{build_axis, resolve_or_default};

use markup::{Markup, escape};

/// Error type for render requests
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown view: {0} (expected timeline, strategic, release or epicgantt)")]
    UnknownView(String),
    #[error("unsupported format: {0} (expected table, kanban, custom, gantt or roadmap)")]
    UnsupportedFormat(String),
}

// ---------------------------------------------------------------------------
// View and format names
// ---------------------------------------------------------------------------

/// Layout of the roadmap section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadmapView {
    Timeline,
    Strategic,
    Release,
    EpicGantt,
}

impl RoadmapView {
    pub fn name(self) -> &'static str {
        match self {
            RoadmapView::Timeline => "timeline",
            RoadmapView::Strategic => "strategic",
            RoadmapView::Release => "release",
            RoadmapView::EpicGantt => "epicgantt",
        }
    }
}

impl fmt::Display for RoadmapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoadmapView {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timeline" => Ok(RoadmapView::Timeline),
            "strategic" => Ok(RoadmapView::Strategic),
            "release" => Ok(RoadmapView::Release),
            "epicgantt" => Ok(RoadmapView::EpicGantt),
            other => Err(RenderError::UnknownView(other.to_string())),
        }
    }
}

/// Page body layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One table per source collection
    Table,
    /// Four-column board
    Kanban,
    /// Tickets by team
    Custom,
    /// Monthly activity chart
    Gantt,
    /// Quarter-indexed roadmap in one of the [`RoadmapView`]s
    Roadmap,
}

impl Format {
    pub fn name(self) -> &'static str {
        match self {
            Format::Table => "table",
            Format::Kanban => "kanban",
            Format::Custom => "custom",
            Format::Gantt => "gantt",
            Format::Roadmap => "roadmap",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Format::Table),
            "kanban" => Ok(Format::Kanban),
            "custom" => Ok(Format::Custom),
            "gantt" => Ok(Format::Gantt),
            "roadmap" => Ok(Format::Roadmap),
            other => Err(RenderError::UnsupportedFormat(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Raw timeframe expression; unparseable values fall back to the
    /// default window
    pub timeframe: String,
    pub grouping: GroupingKey,
    pub view: RoadmapView,
    pub include_dependencies: bool,
    pub symmetric_host_edges: bool,
    pub include_metadata: bool,
    pub version_label: Option<String>,
}

impl RenderOptions {
    /// Options from a loaded config. Fails on an unknown view name.
    pub fn from_config(config: &RoadmapConfig) -> Result<Self, RenderError> {
        Ok(RenderOptions {
            timeframe: config.roadmap.timeframe.clone(),
            grouping: parse_grouping(&config.roadmap.grouping),
            view: config.roadmap.view.parse()?,
            include_dependencies: config.roadmap.include_dependencies,
            symmetric_host_edges: config.roadmap.symmetric_host_edges,
            include_metadata: config.output.include_metadata,
            version_label: config.output.version_label.clone(),
        })
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            timeframe: String::new(),
            grouping: GroupingKey::Theme,
            view: RoadmapView::Timeline,
            include_dependencies: false,
            symmetric_host_edges: false,
            include_metadata: false,
            version_label: None,
        }
    }
}

/// Grouping key name, where an empty name means the theme default.
pub fn parse_grouping(name: &str) -> GroupingKey {
    if name.is_empty() {
        GroupingKey::Theme
    } else {
        GroupingKey::parse(name)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render a complete page in `format`.
pub fn render(
    data: &AggregatedData,
    format: Format,
    options: &RenderOptions,
    generated_at: DateTime<Utc>,
) -> String {
    let title = match format {
        Format::Roadmap => "Project Roadmap",
        _ => "Project Status Dashboard",
    };

    let mut out = Markup::new();
    page_header(&mut out, title, data, options, generated_at);
    match format {
        Format::Table => table::render_table(&mut out, data),
        Format::Kanban => kanban::render_kanban(&mut out, data),
        Format::Custom => custom::render_custom(&mut out, data),
        Format::Gantt => gantt::render_gantt(&mut out, data),
        Format::Roadmap => out.line(render_roadmap(data, options, generated_at.date_naive())),
    }
    if options.include_metadata {
        metadata_footer(&mut out, &data.metadata);
    }

    tracing::info!(format = %format, "rendered page");
    out.into_string()
}

/// The roadmap page: header, summary panel, roadmap section and optional
/// metadata footer.
pub fn render_document(
    data: &AggregatedData,
    options: &RenderOptions,
    generated_at: DateTime<Utc>,
) -> String {
    render(data, Format::Roadmap, options, generated_at)
}

/// Title, version, generation time and the source summary panel.
fn page_header(
    out: &mut Markup,
    title: &str,
    data: &AggregatedData,
    options: &RenderOptions,
    generated_at: DateTime<Utc>,
) {
    out.line(format!("<h1>{}</h1>", title));
    let version = options
        .version_label
        .as_deref()
        .filter(|v| !v.is_empty())
        .or(Some(data.metadata.version_label.as_str()).filter(|v| !v.is_empty()));
    if let Some(version) = version {
        out.line(format!("<p><strong>Version:</strong> {}</p>", escape(version)));
    }
    out.line(format!(
        "<p><strong>Generated:</strong> {}</p>",
        generated_at.format("%a, %d %b %Y %H:%M:%S UTC")
    ));

    out.line("<ac:structured-macro ac:name=\"info\">");
    out.line("<ac:rich-text-body>");
    out.line("<p><strong>Summary</strong></p>");
    out.line("<ul>");
    out.line(format!("<li>Tickets: {}</li>", data.ticket_issues.len()));
    out.line(format!("<li>Code-host issues: {}</li>", data.host_issues.len()));
    out.line(format!("<li>Pull requests: {}</li>", data.host_pull_requests.len()));
    out.line("</ul>");
    out.line("</ac:rich-text-body>");
    out.line("</ac:structured-macro>");
}

/// The roadmap section: period preamble, the selected view, the optional
/// dependency diagram and the legend panel.
pub fn render_roadmap(data: &AggregatedData, options: &RenderOptions, today: NaiveDate) -> String {
    let timeframe = resolve_or_default(&options.timeframe, today);
    let axis = build_axis(&timeframe);
    let items = normalize_all(data);

    let mut out = Markup::new();
    out.line("<h2>Roadmap</h2>");
    out.line(format!(
        "<p>This roadmap shows planned work for the period <strong>{}</strong> to <strong>{}</strong>.</p>",
        timeframe.start.format("%B %Y"),
        timeframe.end.format("%B %Y")
    ));

    let deps_after_view = matches!(options.view, RoadmapView::Strategic | RoadmapView::Release);
    if options.include_dependencies && deps_after_view {
        out.line("<p><em>Dependencies between items are shown at the end of this view.</em></p>");
    }

    match options.view {
        RoadmapView::Timeline => timeline::render_timeline(&mut out, &items, &axis, options.grouping),
        RoadmapView::Strategic => strategic::render_strategic(&mut out, &items, &axis),
        RoadmapView::Release => release::render_release(&mut out, &items, &options.timeframe),
        RoadmapView::EpicGantt => {
            epic_gantt::render_epic_gantt(&mut out, &items, &axis, &TitleSubstringAssociator)
        }
    }

    if options.include_dependencies {
        let graph = extract_dependencies(&items, options.symmetric_host_edges);
        dependencies::render_dependencies(&mut out, &graph);
    }

    markup::legend_panel(&mut out);

    tracing::info!(
        view = %options.view,
        items = items.len(),
        quarters = axis.len(),
        "rendered roadmap"
    );
    out.into_string()
}

fn metadata_footer(out: &mut Markup, metadata: &SourceMetadata) {
    const TD: &str = "class=\"confluenceTd\" style=\"padding: 5px 10px; border: 1px solid #ddd;\"";

    let fetch_time = if metadata.fetch_time_unset() {
        "unknown".to_string()
    } else {
        metadata.fetch_time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    };
    let mut rows = vec![
        ("Fetch Time", fetch_time),
        ("Ticket Projects", metadata.ticket_projects.join(", ")),
        ("Repositories", metadata.host_repos.join(", ")),
    ];
    if !metadata.ticket_query.is_empty() {
        rows.push(("Ticket Query", metadata.ticket_query.clone()));
    }
    if !metadata.host_labels.is_empty() {
        rows.push(("Labels", metadata.host_labels.join(", ")));
    }

    out.line("<ac:structured-macro ac:name=\"expand\">");
    out.line("<ac:parameter ac:name=\"title\">Data Collection Metadata</ac:parameter>");
    out.line("<ac:rich-text-body>");
    out.line("<table class=\"confluenceTable\">");
    out.line("<tbody>");
    for (name, value) in rows {
        out.line(format!(
            "<tr><th {td}>{}</th><td {td}>{}</td></tr>",
            name,
            escape(&value),
            td = TD
        ));
    }
    out.line("</tbody>");
    out.line("</table>");
    out.line("</ac:rich-text-body>");
    out.line("</ac:structured-macro>");
}
