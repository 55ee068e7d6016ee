//! Caller-owned replay session.
//!
//! A [`Session`] owns everything one demo needs: the problem kind and size,
//! the trace, the cursor over it, and the log. There is no global state.
//! Changing the size or resetting always rebuilds the trace from scratch and
//! discards the old cursor and log; nothing is patched in place.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{SizeLimits, TraceConfig};
use crate::error::TraceResult;
use crate::replay::{HanoiReplay, QueensReplay, QueensSnapshot, ReplayCursor, TraceLog};
use crate::trace::{build_hanoi_trace, build_nqueens_trace, PegState, ProblemKind, SearchStatus};

#[derive(Debug, Clone)]
enum Engine {
    Hanoi(ReplayCursor<HanoiReplay>),
    Queens(ReplayCursor<QueensReplay>),
}

impl Engine {
    fn build(kind: ProblemKind, size: usize) -> TraceResult<Self> {
        Ok(match kind {
            ProblemKind::Hanoi => Self::Hanoi(ReplayCursor::new(
                HanoiReplay { disks: size },
                build_hanoi_trace(size)?,
            )),
            ProblemKind::NQueens => Self::Queens(ReplayCursor::new(
                QueensReplay { size },
                build_nqueens_trace(size)?,
            )),
        })
    }
}

/// Dispatch a cursor method over both engine variants.
macro_rules! with_cursor {
    ($engine:expr, $cursor:ident => $body:expr) => {
        match $engine {
            Engine::Hanoi($cursor) => $body,
            Engine::Queens($cursor) => $body,
        }
    };
}

/// Renderable view of the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// Hanoi pegs.
    Hanoi {
        /// Peg state after the consumed moves.
        pegs: &'a PegState,
        /// Number of disks.
        disks: usize,
    },
    /// N-Queens board.
    Queens {
        /// Board of the latest consumed event.
        board: &'a [Option<usize>],
        /// Status of the latest consumed event.
        status: SearchStatus,
    },
}

/// JSON export of a whole trace.
#[derive(Debug, Serialize)]
pub struct TraceExport<'a, E: Serialize> {
    /// Problem name.
    pub problem: ProblemKind,
    /// Problem size.
    pub size: usize,
    /// BLAKE3 checksum of `events`.
    pub checksum: String,
    /// All events.
    pub events: &'a [E],
}

/// One demo's problem, trace, cursor and log.
#[derive(Debug, Clone)]
pub struct Session {
    kind: ProblemKind,
    size: usize,
    limits: Option<SizeLimits>,
    engine: Engine,
}

impl Session {
    /// Build a session. Only the trace builders' own bounds apply.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::InvalidProblemSize` if the builder rejects `size`.
    pub fn new(kind: ProblemKind, size: usize) -> TraceResult<Self> {
        Self::build(kind, size, None)
    }

    /// Build a session that enforces `limits` on every (re)build.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::SizeOutOfRange` if `size` is outside `limits`.
    pub fn with_limits(kind: ProblemKind, size: usize, limits: SizeLimits) -> TraceResult<Self> {
        Self::build(kind, size, Some(limits))
    }

    /// Build the start-up session described by `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the configured size is rejected.
    pub fn from_config(config: &TraceConfig) -> TraceResult<Self> {
        Self::with_limits(config.problem.kind, config.problem.size, config.limits)
    }

    fn build(kind: ProblemKind, size: usize, limits: Option<SizeLimits>) -> TraceResult<Self> {
        if let Some(limits) = &limits {
            limits.check(kind, size)?;
        }
        let engine = Engine::build(kind, size)?;
        let session = Self {
            kind,
            size,
            limits,
            engine,
        };
        info!(problem = %kind, size, events = session.len(), "session built");
        Ok(session)
    }

    /// Replace the whole session with a fresh one for `size`.
    ///
    /// Always rebuilds, even when `size` equals the current size. On error
    /// the current session is left as it was.
    ///
    /// # Errors
    ///
    /// Returns error if `size` is rejected.
    pub fn set_size(&mut self, size: usize) -> TraceResult<()> {
        self.set_problem(self.kind, size)
    }

    /// Switch problem kind and size, rebuilding everything.
    ///
    /// # Errors
    ///
    /// Returns error if `size` is rejected for `kind`.
    pub fn set_problem(&mut self, kind: ProblemKind, size: usize) -> TraceResult<()> {
        *self = Self::build(kind, size, self.limits)?;
        Ok(())
    }

    /// Rebuild the trace for the current size and start over.
    ///
    /// # Errors
    ///
    /// Returns error if the rebuild fails.
    pub fn reset(&mut self) -> TraceResult<()> {
        debug!(problem = %self.kind, size = self.size, "session reset");
        self.engine = Engine::build(self.kind, self.size)?;
        Ok(())
    }

    /// Consume one event. Returns `false` when already terminal.
    ///
    /// # Errors
    ///
    /// Returns error if the event cannot be replayed.
    pub fn step_forward(&mut self) -> TraceResult<bool> {
        with_cursor!(&mut self.engine, c => Ok(c.step_forward()?.is_some()))
    }

    /// Step to the end, calling `on_frame` after every step.
    ///
    /// Returns the number of steps taken.
    ///
    /// # Errors
    ///
    /// Stops at the first step error.
    pub fn jump_to_end<F>(&mut self, mut on_frame: F) -> TraceResult<usize>
    where
        F: FnMut(&Self),
    {
        let mut steps = 0;
        while self.step_forward()? {
            steps += 1;
            on_frame(self);
        }
        Ok(steps)
    }

    /// Problem kind.
    #[must_use]
    pub const fn kind(&self) -> ProblemKind {
        self.kind
    }

    /// Problem size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Size limits, if enforced.
    #[must_use]
    pub const fn limits(&self) -> Option<&SizeLimits> {
        self.limits.as_ref()
    }

    /// Cursor position.
    #[must_use]
    pub fn position(&self) -> usize {
        with_cursor!(&self.engine, c => c.position())
    }

    /// Trace length.
    #[must_use]
    pub fn len(&self) -> usize {
        with_cursor!(&self.engine, c => c.len())
    }

    /// Whether the trace is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every event has been consumed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        with_cursor!(&self.engine, c => c.is_complete())
    }

    /// Log of consumed events.
    #[must_use]
    pub fn log(&self) -> &TraceLog {
        with_cursor!(&self.engine, c => c.log())
    }

    /// View of the current snapshot.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        match &self.engine {
            Engine::Hanoi(c) => Frame::Hanoi {
                pegs: c.current_snapshot(),
                disks: c.replay().disks,
            },
            Engine::Queens(c) => {
                let QueensSnapshot { board, status } = c.current_snapshot();
                Frame::Queens {
                    board,
                    status: *status,
                }
            }
        }
    }

    /// Hanoi cursor, if this is a Hanoi session.
    #[must_use]
    pub const fn hanoi(&self) -> Option<&ReplayCursor<HanoiReplay>> {
        match &self.engine {
            Engine::Hanoi(c) => Some(c),
            Engine::Queens(_) => None,
        }
    }

    /// N-Queens cursor, if this is an N-Queens session.
    #[must_use]
    pub const fn queens(&self) -> Option<&ReplayCursor<QueensReplay>> {
        match &self.engine {
            Engine::Queens(c) => Some(c),
            Engine::Hanoi(_) => None,
        }
    }

    /// Checksum of the current trace.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn trace_checksum(&self) -> TraceResult<String> {
        with_cursor!(&self.engine, c => c.trace().checksum())
    }

    /// Pretty JSON of the whole trace with problem, size and checksum.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn export_json(&self) -> TraceResult<String> {
        with_cursor!(&self.engine, c => {
            let export = TraceExport {
                problem: self.kind,
                size: self.size,
                checksum: c.trace().checksum()?,
                events: c.trace().events(),
            };
            Ok(serde_json::to_string_pretty(&export)?)
        })
    }
}
