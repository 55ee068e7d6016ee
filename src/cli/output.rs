//! CLI output formatting.
//!
//! Everything writes to a caller-supplied `Write` so that output can be
//! captured in tests.

use std::io::{self, Write};

use serde::Serialize;

use crate::renderers::render_frame;
use crate::session::Session;
use crate::trace::ProblemKind;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Current frame of `session`.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn write_frame<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    writeln!(out, "{}", render_frame(session))
}

/// The last `tail` lines of the trace log under a heading.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn write_log_tail<W: Write>(out: &mut W, session: &Session, tail: usize) -> io::Result<()> {
    let log = session.log();
    writeln!(out, "Trace Log ({} of {} lines)", log.tail(tail).len(), log.len())?;
    writeln!(out, "{RULE}")?;
    for line in log.tail(tail) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Result of rebuilding one trace several times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Problem kind.
    pub problem: ProblemKind,
    /// Problem size.
    pub size: usize,
    /// Number of builds compared.
    pub runs: usize,
    /// Trace length.
    pub events: usize,
    /// Checksum shared by every build.
    pub checksum: String,
    /// Number of solutions found (N-Queens).
    pub solutions: Option<usize>,
    /// Whether every move replayed legally and solved the tower (Hanoi).
    pub legal: Option<bool>,
}

/// Human-readable verification report.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn write_verify_report<W: Write>(out: &mut W, report: &VerifyReport) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Problem:  {} (size {})", report.problem, report.size)?;
    writeln!(out, "Events:   {}", report.events)?;
    writeln!(out, "Checksum: {}", report.checksum)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "✓ {} builds produced identical traces", report.runs)?;
    if let Some(solutions) = report.solutions {
        writeln!(out, "✓ {solutions} solutions found")?;
    }
    if let Some(legal) = report.legal {
        let mark = if legal { "✓" } else { "✗" };
        writeln!(out, "{mark} every move legal, tower solved on C")?;
    }
    Ok(())
}
