//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use pc_core::DaySelector;

/// Calisthenics program coach.
///
/// Walks through a multi-week bodyweight program one day at a time, runs
/// the work/rest interval timer and remembers which days are done.
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

/// A day within a week, as given on the command line.
#[derive(Debug, Clone, Args)]
pub struct DayArgs {
    /// Week number.
    pub week: u32,

    /// Day position within the week (1-based) or its exact title.
    pub day: DaySelector,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the program overview for a week, with completed days.
    Home {
        /// Week to show. Remembered for next time.
        #[arg(short, long)]
        week: Option<u32>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one day's exercises and completion status.
    Day(DayArgs),

    /// List the timed segments of a day.
    Plan {
        #[command(flatten)]
        day: DayArgs,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Run the interval timer for a day.
    Run(DayArgs),

    /// Mark a day as done.
    Done(DayArgs),

    /// Remove a day's done mark.
    Undone(DayArgs),

    /// Show the database location and completed days.
    Status,

    /// Check the program and exercise library for errors.
    Validate,
}
