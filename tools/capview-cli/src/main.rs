//! CapView CLI — multi-display capture configuration from the terminal.
//!
//! Usage:
//!   capview validate <MONITORS>     Validate a monitor set or selection
//!   capview defaults <MONITORS>     Show the smart default selection
//!   capview profiles <SUBCOMMAND>   List, apply, export, import profiles
//!   capview preview <MONITORS>      Run live preview sessions (synthetic)
//!
//! Monitor descriptors are read from a JSON file: an array of
//! `{id, name, is_primary, width, height, x, y, scale_factor}` objects,
//! as produced by the platform's display enumeration.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "capview",
    about = "Multi-display capture configuration: validation, smart defaults, profiles, previews",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a monitor set, and optionally a selection against it
    Validate {
        /// Path to the monitor descriptor JSON file
        monitors: PathBuf,

        /// Monitor ids to treat as selected (repeatable)
        #[arg(short, long = "select")]
        select: Vec<String>,

        /// Treat the selection as "use all monitors"
        #[arg(long)]
        use_all: bool,

        /// Apply the deterministic auto-fix pass and show the result
        #[arg(long)]
        fix: bool,
    },

    /// Show the smart default selection with rationale and alternatives
    Defaults {
        /// Path to the monitor descriptor JSON file
        monitors: PathBuf,

        /// Use the laptop + external heuristic instead of the general tree
        #[arg(long)]
        laptop_external: bool,
    },

    /// Work with selection profiles
    Profiles {
        #[command(subcommand)]
        command: commands::profiles::ProfileCommands,
    },

    /// Run preview sessions against the synthetic capture backend
    Preview {
        /// Path to the monitor descriptor JSON file
        monitors: PathBuf,

        /// Monitor ids to preview (repeatable; defaults to all)
        #[arg(short, long = "monitor")]
        monitor_ids: Vec<String>,

        /// Preview frame rate
        #[arg(long, default_value = "2")]
        fps: u32,

        /// How long to run, in seconds
        #[arg(long, default_value = "5")]
        duration: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    capview_common::logging::init_logging(&capview_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
    });

    match cli.command {
        Commands::Validate {
            monitors,
            select,
            use_all,
            fix,
        } => commands::validate::run(monitors, select, use_all, fix),
        Commands::Defaults {
            monitors,
            laptop_external,
        } => commands::defaults::run(monitors, laptop_external),
        Commands::Profiles { command } => commands::profiles::run(command),
        Commands::Preview {
            monitors,
            monitor_ids,
            fps,
            duration,
        } => commands::preview::run(monitors, monitor_ids, fps, duration).await,
    }
}
