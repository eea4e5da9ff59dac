mod commands;
mod parse;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use timeblock_core::TimeblockEditor;
use timeblock_core::config::TimeblockConfig;
use timeblock_core::store::TimeblockStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::parse::{parse_instant, parse_offset_arg};
use crate::render::OutputFormat;

#[derive(Parser)]
#[command(name = "timeblock")]
#[command(about = "Build, merge and clip per-date timeblocks from calendar selections")]
struct Cli {
    /// Timeblock record file (defaults to store_path from the config file)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stored timeblocks grouped by date
    List,
    /// Add the hours between START and END on every day from START to END
    Add {
        /// Selection start (e.g. "2025-03-20T09:00" or RFC 3339)
        start: String,

        /// Selection end; omit to add the single slot at START
        end: Option<String>,
    },
    /// Remove the hours between START and END from every day from START to END
    Remove {
        /// Selection start (e.g. "2025-03-20T09:00" or RFC 3339)
        start: String,

        /// Selection end; omit to remove the single slot at START
        end: Option<String>,

        /// Clip against the selection's day span instead of each day's window
        #[arg(long)]
        by_day: bool,

        /// Offset to write clipped times in (e.g. "+02:00")
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<String>,
    },
    /// Print the timeblocks a selection expands to, without storing them
    Build {
        /// Selection start
        start: String,

        /// Selection end
        end: String,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = TimeblockConfig::load()?;
    let editor = TimeblockEditor::from_config(&config)?;
    let store = TimeblockStore::new(cli.store.unwrap_or_else(|| config.store_path()));
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match cli.command {
        Commands::List => commands::list::run(&store, format),
        Commands::Add { start, end } => {
            let selection = parse_selection(&start, end.as_deref())?;
            commands::add::run(&store, &editor, &selection, format)
        }
        Commands::Remove {
            start,
            end,
            by_day,
            offset,
        } => {
            let selection = parse_selection(&start, end.as_deref())?;
            let offset = offset.as_deref().map(parse_offset_arg).transpose()?;
            commands::remove::run(&store, &editor, &selection, by_day, offset, format)
        }
        Commands::Build { start, end } => {
            let selection = parse_selection(&start, Some(end.as_str()))?;
            commands::build::run(&editor, &selection, format)
        }
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings only by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_selection(
    start: &str,
    end: Option<&str>,
) -> Result<Vec<chrono::DateTime<chrono::FixedOffset>>> {
    let mut selection = vec![parse_instant(start)?];
    if let Some(end) = end {
        selection.push(parse_instant(end)?);
    }
    Ok(selection)
}
