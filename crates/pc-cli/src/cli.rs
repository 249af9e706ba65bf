//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Punch clock for a single worker.
///
/// Records clock-in, clock-out, break and lunch punches and reports worked
/// hours, breaks and overtime per day.
#[derive(Debug, Parser)]
#[command(name = "pc", version, about, long_about = None)]
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
    /// Clock in, or return from a break or lunch.
    In(PunchArgs),

    /// Clock out for the day.
    Out(PunchArgs),

    /// Start a break.
    Break(PunchArgs),

    /// Start lunch.
    Lunch(PunchArgs),

    /// Show current status and today's punches.
    Status,

    /// Show per-day sessions with worked hours, breaks and overtime.
    Report {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show hours as a weekly or monthly chart.
    Chart {
        /// Per-day hours for the most recent week (default).
        #[arg(long, conflicts_with = "monthly")]
        weekly: bool,

        /// Per-week hours for the most recent month.
        #[arg(long)]
        monthly: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Dump stored events as JSONL.
    Events {
        /// Maximum number of events to read.
        #[arg(long)]
        limit: Option<usize>,

        /// Only events at or after this time (ISO 8601 or relative, e.g. '2 hours ago').
        #[arg(long)]
        since: Option<String>,
    },
}

/// Options shared by every punch.
#[derive(Debug, Clone, Default, Args)]
pub struct PunchArgs {
    /// When the punch happened (ISO 8601 or relative, e.g. '15 minutes ago'). Defaults to now.
    #[arg(long)]
    pub at: Option<String>,

    /// Latitude of the location reading.
    #[arg(long, allow_negative_numbers = true, requires_all = ["lon", "accuracy"])]
    pub lat: Option<f64>,

    /// Longitude of the location reading.
    #[arg(long, allow_negative_numbers = true, requires_all = ["lat", "accuracy"])]
    pub lon: Option<f64>,

    /// Accuracy of the location reading in metres.
    #[arg(long, requires_all = ["lat", "lon"])]
    pub accuracy: Option<f64>,

    /// Record the punch even if the current status does not allow it.
    #[arg(long)]
    pub force: bool,
}
