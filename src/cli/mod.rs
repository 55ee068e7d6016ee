//! CLI module for tracestep.
//!
//! All CLI logic lives here rather than in `main.rs` so it can be tested.
//! `main` parses [`Args`], calls [`init_tracing`], and hands off to
//! [`run_cli`].

mod args;
mod commands;
mod output;

pub use args::{Args, Command, PlayArgs};
pub use commands::{execute, playback_config, report_error, run_cli, verify_trace};
pub use output::{write_frame, write_log_tail, write_verify_report, VerifyReport};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber, logging to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` picks the level
/// (0 warn, 1 info, 2 debug, 3+ trace). Calling this twice is harmless.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tracestep={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
