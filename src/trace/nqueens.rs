//! N-Queens backtracking traces.
//!
//! Depth-first search over rows, trying columns left to right. Every attempt
//! is recorded: a safe placement emits `Try`, an unsafe one `Fail`, returning
//! from a placement's subtree emits `Backtrack`, and a full board emits
//! `Solution`. The order is fixed, so the same `n` always yields the same
//! trace.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TraceError, TraceResult};
use crate::trace::Trace;

/// Largest board a trace may be built for.
pub const MAX_QUEENS: usize = 10;

/// `board[row]` is the column of that row's queen, or `None` if unset.
pub type Board = Vec<Option<usize>>;

/// What a search event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    /// Safe placement; the search descends.
    Try,
    /// Unsafe placement; skipped.
    Fail,
    /// Returning from a placement's subtree.
    Backtrack,
    /// All rows placed.
    Solution,
}

/// One step of the search.
///
/// `board` is an owned copy taken when the event was recorded. For
/// `Backtrack` it still shows the placement being abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueenEvent {
    /// Event kind.
    pub kind: SearchKind,
    /// Board at the time of the event.
    pub board: Board,
    /// Row being tried; equals `n` for `Solution`.
    pub row: usize,
    /// Column being tried; absent for `Solution`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,
}

impl QueenEvent {
    /// Status message shown while this is the latest consumed event.
    #[must_use]
    pub fn status(&self) -> SearchStatus {
        let (row, col) = (self.row, self.col.unwrap_or_default());
        match self.kind {
            SearchKind::Try => SearchStatus::Placed { row, col },
            SearchKind::Fail => SearchStatus::Unsafe { row, col },
            SearchKind::Backtrack => SearchStatus::Backtrack { row, col },
            SearchKind::Solution => SearchStatus::Solution,
        }
    }

    /// Whether this event reports a solution.
    #[must_use]
    pub fn is_solution(&self) -> bool {
        self.kind == SearchKind::Solution
    }
}

/// Human-readable state of the search at a cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchStatus {
    /// Nothing consumed yet.
    #[default]
    Start,
    /// Queen placed.
    Placed {
        /// Row.
        row: usize,
        /// Column.
        col: usize,
    },
    /// Placement rejected.
    Unsafe {
        /// Row.
        row: usize,
        /// Column.
        col: usize,
    },
    /// Placement abandoned.
    Backtrack {
        /// Row.
        row: usize,
        /// Column.
        col: usize,
    },
    /// Board complete.
    Solution,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("Start"),
            Self::Placed { row, col } => write!(f, "Placed (row={row}, col={col})"),
            Self::Unsafe { row, col } => write!(f, "Unsafe (row={row}, col={col})"),
            Self::Backtrack { row, col } => write!(f, "Backtrack (row={row}, col={col})"),
            Self::Solution => f.write_str("Solution found"),
        }
    }
}

/// Whether a queen at `(row, col)` is attacked by any queen in rows `0..row`.
#[must_use]
pub fn is_safe(board: &[Option<usize>], row: usize, col: usize) -> bool {
    board
        .iter()
        .take(row)
        .enumerate()
        .all(|(i, placed)| match *placed {
            Some(c) => c != col && c.abs_diff(col) != row - i,
            None => true,
        })
}

/// Build the full search trace for an `n`×`n` board.
///
/// # Errors
///
/// Returns `TraceError::InvalidProblemSize` if `n` is 0 or above
/// [`MAX_QUEENS`].
pub fn build_nqueens_trace(n: usize) -> TraceResult<Trace<QueenEvent>> {
    if !(1..=MAX_QUEENS).contains(&n) {
        return Err(TraceError::InvalidProblemSize {
            problem: "nqueens",
            size: n,
            min: 1,
            max: MAX_QUEENS,
        });
    }

    let mut search = Search {
        board: vec![None; n],
        events: Vec::new(),
    };
    search.place_row(0);

    let trace = Trace::from_events(search.events);
    debug!(
        n,
        events = trace.len(),
        solutions = count_solutions(&trace),
        "built nqueens trace"
    );
    Ok(trace)
}

/// Number of `Solution` events in a trace.
#[must_use]
pub fn count_solutions(trace: &Trace<QueenEvent>) -> usize {
    trace.iter().filter(|e| e.is_solution()).count()
}

struct Search {
    board: Board,
    events: Vec<QueenEvent>,
}

impl Search {
    fn place_row(&mut self, row: usize) {
        let n = self.board.len();
        if row == n {
            self.record(SearchKind::Solution, row, None);
            return;
        }
        for col in 0..n {
            if is_safe(&self.board, row, col) {
                self.board[row] = Some(col);
                self.record(SearchKind::Try, row, Some(col));
                self.place_row(row + 1);
                self.record(SearchKind::Backtrack, row, Some(col));
                self.board[row] = None;
            } else {
                self.record(SearchKind::Fail, row, Some(col));
            }
        }
    }

    fn record(&mut self, kind: SearchKind, row: usize, col: Option<usize>) {
        self.events.push(QueenEvent {
            kind,
            board: self.board.clone(),
            row,
            col,
        });
    }
}
