//! Trace construction.
//!
//! A [`Trace`] is the complete, precomputed, immutable list of events from one
//! run of an algorithm at one fixed problem size. Builders run eagerly to
//! completion; nothing is generated lazily during replay.
//!
//! - [`hanoi`]: recursive Tower-of-Hanoi move generation
//! - [`nqueens`]: N-Queens backtracking with try/fail/backtrack/solution events

pub mod hanoi;
pub mod nqueens;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TraceResult;

pub use hanoi::{build_hanoi_trace, HanoiMove, Peg, PegState};
pub use nqueens::{build_nqueens_trace, Board, QueenEvent, SearchKind, SearchStatus};

/// Which of the two supported algorithms a trace describes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProblemKind {
    /// Tower of Hanoi, size = number of disks.
    #[default]
    Hanoi,
    /// N-Queens, size = board width.
    #[value(name = "nqueens", alias = "queens")]
    NQueens,
}

impl ProblemKind {
    /// Stable lowercase name, used in logs, errors and JSON.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hanoi => "hanoi",
            Self::NQueens => "nqueens",
        }
    }

    /// The other problem kind.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Hanoi => Self::NQueens,
            Self::NQueens => Self::Hanoi,
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered, immutable sequence of events.
///
/// There is no way to push to or edit a trace after construction. A new
/// problem size means a new trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace<E> {
    events: Vec<E>,
}

impl<E> Trace<E> {
    /// Wrap a finished event list.
    #[must_use]
    pub fn from_events(events: Vec<E>) -> Self {
        Self { events }
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the trace has no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Event at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&E> {
        self.events.get(index)
    }

    /// All events in order.
    #[must_use]
    pub fn events(&self) -> &[E] {
        &self.events
    }

    /// Iterate events in order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.events.iter()
    }
}

impl<E: Serialize> Trace<E> {
    /// BLAKE3 hex digest of the trace's canonical JSON encoding.
    ///
    /// Two traces have the same checksum iff they serialize byte-identically.
    ///
    /// # Errors
    ///
    /// Returns error if an event fails to serialize.
    pub fn checksum(&self) -> TraceResult<String> {
        let bytes = serde_json::to_vec(&self.events)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

impl<'a, E> IntoIterator for &'a Trace<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
