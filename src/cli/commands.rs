//! CLI command handlers.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use tracing::{debug, info};

use super::output::{write_frame, write_log_tail, write_verify_report, VerifyReport};
use super::{Args, Command, PlayArgs};
use crate::config::TraceConfig;
use crate::error::{TraceError, TraceResult};
use crate::playback::Autoplay;
use crate::session::Session;
use crate::trace::hanoi::verify_hanoi_trace;
use crate::trace::nqueens::count_solutions;
use crate::trace::ProblemKind;

/// Main CLI entry point.
///
/// Dispatches to the command handler and maps errors to exit code 1.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match execute(&args, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&mut io::stderr(), &e),
    }
}

/// Print `err` once to `err_out` and return the failure exit code.
#[must_use]
pub fn report_error<W: Write>(err_out: &mut W, err: &TraceError) -> ExitCode {
    debug!(error = ?err, "command failed");
    // stderr closed: nothing left to report to
    let _ = writeln!(err_out, "Error: {err}");
    ExitCode::from(1)
}

/// Run the parsed command, writing its output to `out`.
///
/// # Errors
///
/// Returns the first configuration, build, replay or I/O error.
pub fn execute<W: Write>(args: &Args, out: &mut W) -> TraceResult<()> {
    let base = load_config(args.config.as_deref())?;
    match &args.command {
        Command::Hanoi { disks, play } => {
            let config = playback_config(&base, ProblemKind::Hanoi, *disks, play)?;
            play_session(out, &config, play)
        }
        Command::NQueens { size, play } => {
            let config = playback_config(&base, ProblemKind::NQueens, *size, play)?;
            play_session(out, &config, play)
        }
        Command::Trace {
            problem,
            size,
            output,
        } => export_trace(out, *problem, *size, output.as_deref()),
        Command::Verify {
            problem,
            size,
            runs,
        } => {
            let report = verify_trace(*problem, *size, *runs)?;
            write_verify_report(out, &report)?;
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> TraceResult<TraceConfig> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            TraceConfig::load(path)
        }
        None => Ok(TraceConfig::default()),
    }
}

/// Apply command-line overrides for `kind` on top of `base`.
///
/// Without an explicit size, the configured size is used when the config is
/// for the same problem, otherwise that problem's default.
///
/// # Errors
///
/// Returns error if the result fails validation.
pub fn playback_config(
    base: &TraceConfig,
    kind: ProblemKind,
    size: Option<usize>,
    play: &PlayArgs,
) -> TraceResult<TraceConfig> {
    let mut builder = TraceConfig::builder()
        .kind(kind)
        .limits(base.limits)
        .delay_secs(play.delay.unwrap_or(base.playback.delay_secs))
        .display_tail(play.tail.unwrap_or(base.log.display_tail));
    if let Some(size) = size {
        builder = builder.size(size);
    } else if base.problem.kind == kind {
        builder = builder.size(base.problem.size);
    }
    builder.build()
}

fn play_session<W: Write>(out: &mut W, config: &TraceConfig, play: &PlayArgs) -> TraceResult<()> {
    let mut session = Session::from_config(config)?;

    if play.auto {
        let mut autoplay = Autoplay::from_config(&config.playback);
        let mut write_result = Ok(());
        autoplay.run(
            &mut session,
            |s| {
                if write_result.is_ok() {
                    write_result = write_frame(out, s);
                }
            },
            || false,
        )?;
        write_result?;
    } else {
        if play.all {
            session.jump_to_end(|_| {})?;
        } else {
            for _ in 0..play.steps.unwrap_or(0) {
                if !session.step_forward()? {
                    break;
                }
            }
        }
        write_frame(out, &session)?;
    }

    write_log_tail(out, &session, config.log.display_tail)?;
    Ok(())
}

fn export_trace<W: Write>(
    out: &mut W,
    kind: ProblemKind,
    size: usize,
    path: Option<&Path>,
) -> TraceResult<()> {
    let session = Session::new(kind, size)?;
    let json = session.export_json()?;
    match path {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(path = %path.display(), events = session.len(), "trace exported");
            writeln!(out, "Wrote {} events to {}", session.len(), path.display())?;
        }
        None => writeln!(out, "{json}")?,
    }
    Ok(())
}

/// Build the trace `runs` times, require identical checksums, and check it.
///
/// # Errors
///
/// Returns `TraceError::NonDeterministic` if builds differ, or the replay
/// error for an illegal Hanoi trace.
pub fn verify_trace(kind: ProblemKind, size: usize, runs: usize) -> TraceResult<VerifyReport> {
    if runs == 0 {
        return Err(TraceError::config("verify needs at least one run"));
    }

    let first = Session::new(kind, size)?;
    let checksum = first.trace_checksum()?;
    for _ in 1..runs {
        let actual = Session::new(kind, size)?.trace_checksum()?;
        if actual != checksum {
            return Err(TraceError::NonDeterministic {
                problem: kind.name(),
                size,
                expected: checksum,
                actual,
            });
        }
    }

    let mut report = VerifyReport {
        problem: kind,
        size,
        runs,
        events: first.len(),
        checksum,
        solutions: None,
        legal: None,
    };
    if let Some(cursor) = first.hanoi() {
        verify_hanoi_trace(size, cursor.trace())?;
        report.legal = Some(true);
    }
    if let Some(cursor) = first.queens() {
        report.solutions = Some(count_solutions(cursor.trace()));
    }
    info!(problem = %kind, size, runs, "trace verified");
    Ok(report)
}
