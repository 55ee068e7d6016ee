//! tracestep CLI - algorithm trace replay
//!
//! Command-line interface for stepping through Hanoi and N-Queens traces.

use std::process::ExitCode;

use tracestep::cli::{init_tracing, run_cli, Args};

fn main() -> ExitCode {
    let args = Args::from_env();
    init_tracing(args.verbose);
    run_cli(args)
}
