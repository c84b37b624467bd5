use chrono::{DateTime, NaiveTime, Utc};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{config_io, input_io};
use crate::model::config::RoadmapConfig;
use crate::ops::deps::extract_dependencies;
use crate::ops::group::partition;
use crate::ops::normalize::normalize_all;
use crate::ops::placement::place;
use crate::ops::timeframe::{build_axis, resolve_or_default};
use crate::render::{self, Format, RenderOptions, parse_grouping};
use crate::util::unicode::display_width;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let cwd = std::env::current_dir()?;
    let config = config_io::read_config(cli.config.as_deref(), &cwd)?;
    // --today pins the clock to midnight UTC of that date
    let now = match cli.today {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };

    match cli.command {
        Commands::Generate(args) => cmd_generate(args, &config, now),
        Commands::Items(args) => cmd_items(args, &config, now, json),
        Commands::Quarters(args) => cmd_quarters(args, &config, now, json),
        Commands::Deps(args) => cmd_deps(args, &config, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The timeframe flag, else the configured one.
fn timeframe_expr<'a>(window: &'a WindowArgs, config: &'a RoadmapConfig) -> &'a str {
    window
        .timeframe
        .as_deref()
        .unwrap_or(&config.roadmap.timeframe)
}

/// Config values overridden by any flags given on the command line.
fn render_options(
    args: &GenerateArgs,
    config: &RoadmapConfig,
) -> Result<RenderOptions, Box<dyn std::error::Error>> {
    let mut config = config.clone();
    let roadmap = &mut config.roadmap;
    if let Some(timeframe) = &args.window.timeframe {
        roadmap.timeframe = timeframe.clone();
    }
    if let Some(view) = &args.view {
        roadmap.view = view.clone();
    }
    if let Some(group_by) = &args.group_by {
        roadmap.grouping = group_by.clone();
    }
    roadmap.include_dependencies |= args.deps;
    roadmap.symmetric_host_edges |= args.symmetric_host_edges;
    config.output.include_metadata |= args.metadata;
    if args.version_label.is_some() {
        config.output.version_label = args.version_label.clone();
    }
    Ok(RenderOptions::from_config(&config)?)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_generate(
    args: GenerateArgs,
    config: &RoadmapConfig,
    now: DateTime<Utc>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Names are validated before any input is read
    let format: Format = args
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()?;
    let options = render_options(&args, config)?;
    let data = input_io::load_inputs(&args.input.inputs)?;

    let page = render::render(&data, format, &options, now);

    match &args.output {
        Some(path) => {
            input_io::atomic_write(path, page.as_bytes())?;
            tracing::info!(path = %path.display(), bytes = page.len(), "wrote roadmap");
        }
        None => print!("{}", page),
    }
    Ok(())
}

fn cmd_items(
    args: ItemsArgs,
    config: &RoadmapConfig,
    now: DateTime<Utc>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = input_io::load_inputs(&args.input.inputs)?;
    let items = normalize_all(&data);
    let timeframe = resolve_or_default(timeframe_expr(&args.window, config), now.date_naive());
    let axis = build_axis(&timeframe);
    let grouping = parse_grouping(args.group_by.as_deref().unwrap_or(&config.roadmap.grouping));
    let groups = partition(&items, grouping);

    if json {
        let results: Vec<GroupJson> = groups
            .iter()
            .map(|g| GroupJson {
                label: g.label.clone(),
                items: g
                    .items
                    .iter()
                    .map(|i| item_to_json(i, place(&i.span, &axis), &axis))
                    .collect(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    let key_width = items.iter().map(|i| display_width(&i.key())).max().unwrap_or(0);
    let mut first = true;
    for group in &groups {
        if group.items.is_empty() {
            continue;
        }
        if !first {
            println!();
        }
        first = false;
        println!("{}", format_group_header(&group.label, group.items.len()));
        for item in &group.items {
            println!(
                "{}",
                format_item_line(item, place(&item.span, &axis), &axis, key_width)
            );
        }
    }
    if first {
        println!("no items");
    }
    Ok(())
}

fn cmd_quarters(
    args: QuartersArgs,
    config: &RoadmapConfig,
    now: DateTime<Utc>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let timeframe = resolve_or_default(timeframe_expr(&args.window, config), now.date_naive());
    let axis = build_axis(&timeframe);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&quarters_to_json(&timeframe, &axis))?
        );
    } else {
        for line in format_quarters(&timeframe, &axis) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_deps(
    args: DepsArgs,
    config: &RoadmapConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = input_io::load_inputs(&args.input.inputs)?;
    let items = normalize_all(&data);
    let host_edges = args.symmetric_host_edges || config.roadmap.symmetric_host_edges;
    let graph = extract_dependencies(&items, host_edges);

    if json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    } else {
        for line in format_dependency_graph(&graph) {
            println!("{}", line);
        }
    }
    Ok(())
}
