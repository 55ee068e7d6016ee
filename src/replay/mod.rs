//! Replay cursor over a precomputed trace.
//!
//! A [`ReplayCursor`] holds a position `idx` in `[0, len]` into a
//! [`Trace`]. Position 0 is the initial state, `len` is terminal. The
//! snapshot for a position is always the result of applying events
//! `0..idx` to the variant's initial snapshot.
//!
//! Variant-specific behaviour (initial snapshot, how an event changes it,
//! the log line it produces) lives behind the [`Replay`] trait, so both
//! problems share one cursor.

mod log;

pub use log::TraceLog;

use serde::Serialize;
use std::fmt::Debug;
use tracing::trace;

use crate::error::TraceResult;
use crate::trace::{HanoiMove, PegState, QueenEvent, SearchKind, SearchStatus, Trace};

/// Variant-specific replay rules.
pub trait Replay {
    /// Event type stored in the trace.
    type Event: Clone + Debug + Serialize;

    /// Derived state at a cursor position.
    type Snapshot: Clone + Debug + PartialEq;

    /// Snapshot at position 0.
    fn initial_snapshot(&self) -> Self::Snapshot;

    /// Apply `event`, the `step`-th event (1-based), to `snapshot`.
    ///
    /// Implementations must leave `snapshot` unchanged when they fail.
    ///
    /// # Errors
    ///
    /// Returns error if the event cannot be applied to the snapshot.
    fn apply(
        &self,
        snapshot: &mut Self::Snapshot,
        step: usize,
        event: &Self::Event,
    ) -> TraceResult<()>;

    /// Log line for the `step`-th event (1-based).
    fn log_line(&self, step: usize, event: &Self::Event) -> String;
}

/// Hanoi replay: snapshot is the peg state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HanoiReplay {
    /// Number of disks.
    pub disks: usize,
}

impl Replay for HanoiReplay {
    type Event = HanoiMove;
    type Snapshot = PegState;

    fn initial_snapshot(&self) -> PegState {
        PegState::new(self.disks)
    }

    fn apply(&self, snapshot: &mut PegState, step: usize, event: &HanoiMove) -> TraceResult<()> {
        snapshot.apply(event, step)
    }

    fn log_line(&self, step: usize, event: &HanoiMove) -> String {
        format!(
            "Step {step}: Move disk {} {} → {}",
            event.disk, event.from, event.to
        )
    }
}

/// N-Queens snapshot: latest board and status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueensSnapshot {
    /// Board from the latest consumed event (all unset at position 0).
    pub board: Vec<Option<usize>>,
    /// Status derived from the latest consumed event.
    pub status: SearchStatus,
}

/// N-Queens replay: snapshot is the latest event's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueensReplay {
    /// Board width.
    pub size: usize,
}

impl Replay for QueensReplay {
    type Event = QueenEvent;
    type Snapshot = QueensSnapshot;

    fn initial_snapshot(&self) -> QueensSnapshot {
        QueensSnapshot {
            board: vec![None; self.size],
            status: SearchStatus::Start,
        }
    }

    fn apply(
        &self,
        snapshot: &mut QueensSnapshot,
        _step: usize,
        event: &QueenEvent,
    ) -> TraceResult<()> {
        snapshot.board.clone_from(&event.board);
        snapshot.status = event.status();
        Ok(())
    }

    fn log_line(&self, step: usize, event: &QueenEvent) -> String {
        let col = event.col.unwrap_or_default();
        match event.kind {
            SearchKind::Try => format!("{step:>4}: TRY     (row={}, col={col})", event.row),
            SearchKind::Fail => format!("{step:>4}: FAIL    (row={}, col={col})", event.row),
            SearchKind::Backtrack => format!("{step:>4}: BACK    (row={}, col={col})", event.row),
            SearchKind::Solution => format!("{step:>4}: SOLUTION"),
        }
    }
}

/// Position into a trace plus the snapshot and log derived from it.
#[derive(Debug, Clone)]
pub struct ReplayCursor<R: Replay> {
    replay: R,
    trace: Trace<R::Event>,
    idx: usize,
    snapshot: R::Snapshot,
    log: TraceLog,
}

impl<R: Replay> ReplayCursor<R> {
    /// Cursor at position 0 of `trace`.
    #[must_use]
    pub fn new(replay: R, trace: Trace<R::Event>) -> Self {
        let snapshot = replay.initial_snapshot();
        Self {
            replay,
            trace,
            idx: 0,
            snapshot,
            log: TraceLog::new(),
        }
    }

    /// Back to position 0 with an empty log.
    pub fn reset(&mut self) {
        self.idx = 0;
        self.snapshot = self.replay.initial_snapshot();
        self.log.clear();
    }

    /// Consume the next event.
    ///
    /// Returns the consumed event, or `None` when already terminal.
    ///
    /// # Errors
    ///
    /// Returns error if the replay rules reject the event. The cursor does
    /// not move in that case.
    pub fn step_forward(&mut self) -> TraceResult<Option<&R::Event>> {
        let Some(event) = self.trace.get(self.idx) else {
            return Ok(None);
        };
        let step = self.idx + 1;
        self.replay.apply(&mut self.snapshot, step, event)?;
        self.log.push(self.replay.log_line(step, event));
        self.idx = step;
        trace!(step, total = self.trace.len(), "cursor advanced");
        Ok(self.trace.get(step - 1))
    }

    /// Step until terminal, calling `on_frame` after every step.
    ///
    /// Returns the number of steps taken.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first step error.
    pub fn jump_to_end<F>(&mut self, mut on_frame: F) -> TraceResult<usize>
    where
        F: FnMut(&Self),
    {
        let mut steps = 0;
        while self.step_forward()?.is_some() {
            steps += 1;
            on_frame(self);
        }
        Ok(steps)
    }

    /// Snapshot after events `0..position()`.
    #[must_use]
    pub const fn current_snapshot(&self) -> &R::Snapshot {
        &self.snapshot
    }

    /// Latest consumed event.
    #[must_use]
    pub fn current_event(&self) -> Option<&R::Event> {
        self.idx.checked_sub(1).and_then(|i| self.trace.get(i))
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.idx
    }

    /// Trace length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// Whether the trace is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// Events not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.trace.len() - self.idx
    }

    /// Whether every event has been consumed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.idx == self.trace.len()
    }

    /// Log of consumed events.
    #[must_use]
    pub const fn log(&self) -> &TraceLog {
        &self.log
    }

    /// The trace being replayed.
    #[must_use]
    pub const fn trace(&self) -> &Trace<R::Event> {
        &self.trace
    }

    /// Variant rules.
    #[must_use]
    pub const fn replay(&self) -> &R {
        &self.replay
    }
}
