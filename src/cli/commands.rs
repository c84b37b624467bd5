use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "roadmap", about = concat!("roadmap v", env!("CARGO_PKG_VERSION"), " - project issues onto a quarterly roadmap"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./roadmap.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Evaluate relative timeframes as of this date (default: today)
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the roadmap page
    Generate(GenerateArgs),
    /// List normalized planning items with their placement
    Items(ItemsArgs),
    /// Show the resolved window and quarter axis
    Quarters(QuartersArgs),
    /// List dependency nodes and edges
    Deps(DepsArgs),
}

// ---------------------------------------------------------------------------
// Shared args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InputArgs {
    /// Fetcher output files; several files are merged in order
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,
}

#[derive(Args)]
pub struct WindowArgs {
    /// Timeframe, e.g. 6months, 1year, "Q1-Q4 2025"
    #[arg(long)]
    pub timeframe: Option<String>,
}

// ---------------------------------------------------------------------------
// Command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub window: WindowArgs,
    /// Write the page here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Page format: table, kanban, custom, gantt, roadmap
    #[arg(long)]
    pub format: Option<String>,
    /// View: timeline, strategic, release, epicgantt
    #[arg(long)]
    pub view: Option<String>,
    /// Grouping for the timeline view: epic, theme, team, quarter
    #[arg(long = "group-by")]
    pub group_by: Option<String>,
    /// Append the dependency diagram
    #[arg(long)]
    pub deps: bool,
    /// Emit dependency edges for code-host issues too
    #[arg(long)]
    pub symmetric_host_edges: bool,
    /// Append the data collection metadata footer
    #[arg(long)]
    pub metadata: bool,
    /// Version label shown under the title
    #[arg(long)]
    pub version_label: Option<String>,
}

#[derive(Args)]
pub struct ItemsArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub window: WindowArgs,
    /// Grouping: epic, theme, team, quarter
    #[arg(long = "group-by")]
    pub group_by: Option<String>,
}

#[derive(Args)]
pub struct QuartersArgs {
    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(Args)]
pub struct DepsArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Emit dependency edges for code-host issues too
    #[arg(long)]
    pub symmetric_host_edges: bool,
}
