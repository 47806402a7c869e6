//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Attendance punch reconciliation.
///
/// Reads raw terminal punch logs and turns them into deduplicated,
/// paired work sessions with per-employee hour and overtime summaries.
#[derive(Debug, Parser)]
#[command(name = "punchcard", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reconcile a punch log into sessions, unpaired punches, and summaries.
    Reconcile {
        /// Read punches from this file instead of stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Emit JSON instead of the human-readable report.
        #[arg(long)]
        json: bool,

        /// Skip malformed input lines instead of aborting.
        #[arg(long)]
        skip_invalid: bool,
    },

    /// List deduplicated punch marks without classifying or pairing them.
    Marks {
        /// Read punches from this file instead of stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Emit JSON instead of the human-readable listing.
        #[arg(long)]
        json: bool,
    },

    /// Show the effective reconciliation thresholds.
    Thresholds {
        /// Emit JSON instead of the human-readable listing.
        #[arg(long)]
        json: bool,
    },
}
