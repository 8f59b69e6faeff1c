//! # Journey Engine CLI
//!
//! Headless driver for journey timelines.
//!
//! ## Commands
//! - `resolve`: Print where each milestone sits on the path
//! - `simulate`: Replay scheduled selections and print one frame per line
//! - `presets`: List the built-in timelines or dump one as JSON

mod commands;
mod records;


use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::ScheduledSelection;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "journey-engine")]
#[command(about = "Arc-length path progress engine for journey timelines")]
#[command(version)]
struct Cli {
    /// Emit logs as JSON (logs go to stderr)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
#[group(required = true, multiple = false)]
pub struct TimelineSource {
    /// Timeline definition file (.json)
    #[arg(short, long)]
    pub timeline: Option<PathBuf>,

    /// Built-in timeline (home, about)
    #[arg(short, long)]
    pub preset: Option<String>,
}

#[derive(Args, Clone, Copy, Debug)]
pub struct ContainerSize {
    /// Container width in pixels (defaults to the view box width)
    #[arg(long, requires = "height")]
    pub width: Option<f64>,

    /// Container height in pixels (defaults to the view box height)
    #[arg(long, requires = "width")]
    pub height: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve milestone positions
    Resolve {
        #[command(flatten)]
        source: TimelineSource,

        #[command(flatten)]
        size: ContainerSize,
    },

    /// Replay selections and print frames as JSON lines
    Simulate {
        #[command(flatten)]
        source: TimelineSource,

        #[command(flatten)]
        size: ContainerSize,

        /// Selection as INDEX@SECONDS, e.g. 2@0.5 (repeatable)
        #[arg(short, long = "select", value_parser = commands::parse_selection)]
        selections: Vec<ScheduledSelection>,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Last timestamp to render (defaults to the end of the last transition)
        #[arg(long)]
        until: Option<f64>,
    },

    /// List built-in timelines
    Presets {
        /// Print this preset's definition as JSON
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json);

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Resolve { source, size } => commands::resolve(&source, size, &mut stdout),
        Commands::Simulate {
            source,
            size,
            selections,
            fps,
            until,
        } => commands::simulate(&source, size, &selections, fps, until, &mut stdout),
        Commands::Presets { name } => commands::presets(name.as_deref(), &mut stdout),
    }
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("journey_engine=info,journey_core=info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
