//! CLI argument parsing.
//!
//! Kept separate from `commands` so parsing can be tested on its own.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::trace::ProblemKind;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(
    name = "tracestep",
    version,
    about = "Step through Tower of Hanoi and N-Queens algorithm traces"
)]
pub struct Args {
    /// YAML configuration file; command-line flags override it.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Replay the Tower of Hanoi move sequence
    Hanoi {
        /// Number of disks.
        #[arg(short = 'n', long)]
        disks: Option<usize>,
        /// Playback options.
        #[command(flatten)]
        play: PlayArgs,
    },
    /// Replay the N-Queens backtracking search
    #[command(name = "nqueens", alias = "queens")]
    NQueens {
        /// Board width.
        #[arg(short = 'n', long)]
        size: Option<usize>,
        /// Playback options.
        #[command(flatten)]
        play: PlayArgs,
    },
    /// Export a full trace as JSON
    Trace {
        /// Which algorithm.
        #[arg(value_enum)]
        problem: ProblemKind,
        /// Problem size.
        #[arg(short = 'n', long)]
        size: usize,
        /// Write to a file instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Rebuild a trace several times and check it
    Verify {
        /// Which algorithm.
        #[arg(value_enum)]
        problem: ProblemKind,
        /// Problem size.
        #[arg(short = 'n', long)]
        size: usize,
        /// Number of independent builds to compare.
        #[arg(long, default_value_t = 3)]
        runs: usize,
    },
}

/// How far to replay and how to show it.
#[derive(Debug, Clone, Default, PartialEq, clap::Args)]
pub struct PlayArgs {
    /// Consume this many events.
    #[arg(long, conflicts_with = "all")]
    pub steps: Option<usize>,

    /// Consume every event.
    #[arg(long)]
    pub all: bool,

    /// Auto-play to the end, printing every frame.
    #[arg(long, conflicts_with = "steps")]
    pub auto: bool,

    /// Seconds between auto-play frames (0.05 to 2.0).
    #[arg(long, value_name = "SECS")]
    pub delay: Option<f64>,

    /// Number of trace log lines to print.
    #[arg(long, value_name = "LINES")]
    pub tail: Option<usize>,
}

impl Args {
    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::parse()
    }
}
