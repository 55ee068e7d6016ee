//! Tower of Hanoi move traces.
//!
//! The classic recursive decomposition: to move `n` disks from `source` to
//! `dest`, move `n - 1` disks out of the way onto `aux`, move disk `n`, then
//! move the `n - 1` disks back on top of it. This yields exactly `2^n - 1`
//! moves.
//!
//! Legality is not left to the recursion. [`PegState::apply`] checks every
//! move against the actual pegs, and [`verify_hanoi_trace`] replays a whole
//! trace through it.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TraceError, TraceResult};
use crate::trace::Trace;

/// Largest disk count a trace may be built for (about a million moves).
pub const MAX_DISKS: usize = 20;

/// Peg identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Peg {
    /// Start peg.
    A,
    /// Spare peg.
    B,
    /// Goal peg.
    C,
}

impl Peg {
    /// All pegs in display order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Position of the peg in [`Peg::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }

    /// Single-letter label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One move: `disk` goes from the top of `from` to the top of `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HanoiMove {
    /// Disk size, 1 = smallest.
    pub disk: usize,
    /// Source peg.
    pub from: Peg,
    /// Destination peg.
    pub to: Peg,
}

impl HanoiMove {
    /// Create a move.
    #[must_use]
    pub const fn new(disk: usize, from: Peg, to: Peg) -> Self {
        Self { disk, from, to }
    }
}

/// Number of moves in the optimal solution for `disks` disks.
///
/// Saturates at `usize::MAX` when the count does not fit.
#[must_use]
pub const fn move_count(disks: usize) -> usize {
    if disks >= usize::BITS as usize {
        return usize::MAX;
    }
    (1usize << disks) - 1
}

/// Build the full move trace for `disks` disks, A → C using B.
///
/// # Errors
///
/// Returns `TraceError::InvalidProblemSize` if `disks` is 0 or above
/// [`MAX_DISKS`].
pub fn build_hanoi_trace(disks: usize) -> TraceResult<Trace<HanoiMove>> {
    if !(1..=MAX_DISKS).contains(&disks) {
        return Err(TraceError::InvalidProblemSize {
            problem: "hanoi",
            size: disks,
            min: 1,
            max: MAX_DISKS,
        });
    }

    let mut moves = Vec::with_capacity(move_count(disks));
    solve(disks, Peg::A, Peg::B, Peg::C, &mut moves);
    debug!(disks, moves = moves.len(), "built hanoi trace");

    Ok(Trace::from_events(moves))
}

fn solve(n: usize, source: Peg, aux: Peg, dest: Peg, moves: &mut Vec<HanoiMove>) {
    if n == 1 {
        moves.push(HanoiMove::new(1, source, dest));
        return;
    }
    solve(n - 1, source, dest, aux, moves);
    moves.push(HanoiMove::new(n, source, dest));
    solve(n - 1, aux, source, dest, moves);
}

/// Disks on each peg, bottom first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PegState {
    pegs: [Vec<usize>; 3],
}

impl PegState {
    /// Canonical start: all `disks` on A, largest at the bottom.
    #[must_use]
    pub fn new(disks: usize) -> Self {
        Self {
            pegs: [(1..=disks).rev().collect(), Vec::new(), Vec::new()],
        }
    }

    /// Build an arbitrary state (bottom-first per peg). Not checked.
    #[must_use]
    pub fn from_pegs(a: Vec<usize>, b: Vec<usize>, c: Vec<usize>) -> Self {
        Self { pegs: [a, b, c] }
    }

    /// Disks on `peg`, bottom first.
    #[must_use]
    pub fn peg(&self, peg: Peg) -> &[usize] {
        &self.pegs[peg.index()]
    }

    /// All three pegs in A, B, C order.
    #[must_use]
    pub fn pegs(&self) -> [&[usize]; 3] {
        [&self.pegs[0], &self.pegs[1], &self.pegs[2]]
    }

    /// Top disk on `peg`.
    #[must_use]
    pub fn top(&self, peg: Peg) -> Option<usize> {
        self.peg(peg).last().copied()
    }

    /// Total number of disks.
    #[must_use]
    pub fn disk_count(&self) -> usize {
        self.pegs.iter().map(Vec::len).sum()
    }

    /// Whether all `disks` sit on C in order.
    #[must_use]
    pub fn is_solved(&self, disks: usize) -> bool {
        self.pegs[0].is_empty()
            && self.pegs[1].is_empty()
            && self.pegs[2].iter().copied().eq((1..=disks).rev())
    }

    /// Reason `mv` cannot be applied, if it cannot.
    #[must_use]
    pub fn check(&self, mv: &HanoiMove) -> Option<String> {
        if mv.from == mv.to {
            return Some(format!("source and destination are both {}", mv.from));
        }
        let Some(top) = self.top(mv.from) else {
            return Some(format!("peg {} is empty", mv.from));
        };
        if top != mv.disk {
            return Some(format!("top of {} is disk {top}, not disk {}", mv.from, mv.disk));
        }
        match self.top(mv.to) {
            Some(below) if below < mv.disk => Some(format!(
                "disk {} cannot go on smaller disk {below}",
                mv.disk
            )),
            _ => None,
        }
    }

    /// Apply `mv`, numbered `step` (1-based) for error reporting.
    ///
    /// The state is left untouched when the move is illegal.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::IllegalMove` if the disk is not on top of its
    /// source peg, the source is empty, or it would land on a smaller disk.
    pub fn apply(&mut self, mv: &HanoiMove, step: usize) -> TraceResult<()> {
        if let Some(reason) = self.check(mv) {
            return Err(TraceError::IllegalMove {
                step,
                disk: mv.disk,
                from: mv.from,
                to: mv.to,
                reason,
            });
        }
        if let Some(disk) = self.pegs[mv.from.index()].pop() {
            self.pegs[mv.to.index()].push(disk);
        }
        Ok(())
    }
}

/// Replay every move of `trace` from the canonical start and check the result.
///
/// Returns the final peg state.
///
/// # Errors
///
/// Returns `TraceError::IllegalMove` at the first illegal move, or
/// `TraceError::IncompleteSolution` if the tower does not end up on C.
pub fn verify_hanoi_trace(disks: usize, trace: &Trace<HanoiMove>) -> TraceResult<PegState> {
    let mut state = PegState::new(disks);
    for (i, mv) in trace.iter().enumerate() {
        state.apply(mv, i + 1)?;
    }
    if !state.is_solved(disks) {
        return Err(TraceError::IncompleteSolution {
            disks,
            moves: trace.len(),
        });
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_disk_sequence() {
        let trace = build_hanoi_trace(3).expect("build");
        let expected = [
            HanoiMove::new(1, Peg::A, Peg::C),
            HanoiMove::new(2, Peg::A, Peg::B),
            HanoiMove::new(1, Peg::C, Peg::B),
            HanoiMove::new(3, Peg::A, Peg::C),
            HanoiMove::new(1, Peg::B, Peg::A),
            HanoiMove::new(2, Peg::B, Peg::C),
            HanoiMove::new(1, Peg::A, Peg::C),
        ];
        assert_eq!(trace.events(), &expected);
    }

    #[test]
    fn test_single_disk() {
        let trace = build_hanoi_trace(1).expect("build");
        assert_eq!(trace.events(), &[HanoiMove::new(1, Peg::A, Peg::C)]);
    }

    #[test]
    fn test_move_count_saturates() {
        assert_eq!(move_count(0), 0);
        assert_eq!(move_count(usize::BITS as usize - 1), usize::MAX >> 1);
        assert_eq!(move_count(usize::BITS as usize), usize::MAX);
        assert_eq!(move_count(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_move_counts() {
        for n in 1..=10 {
            let trace = build_hanoi_trace(n).expect("build");
            assert_eq!(trace.len(), move_count(n));
            assert_eq!(trace.len(), 2usize.pow(n as u32) - 1);
        }
    }

    #[test]
    fn test_zero_disks_rejected() {
        let err = build_hanoi_trace(0).unwrap_err();
        assert!(matches!(
            err,
            TraceError::InvalidProblemSize { size: 0, .. }
        ));
    }

    #[test]
    fn test_too_many_disks_rejected() {
        assert!(build_hanoi_trace(MAX_DISKS + 1).is_err());
    }

    #[test]
    fn test_initial_state() {
        let state = PegState::new(4);
        assert_eq!(state.peg(Peg::A), &[4, 3, 2, 1]);
        assert!(state.peg(Peg::B).is_empty());
        assert!(state.peg(Peg::C).is_empty());
        assert_eq!(state.top(Peg::A), Some(1));
        assert_eq!(state.disk_count(), 4);
        assert!(!state.is_solved(4));
    }

    #[test]
    fn test_apply_legal_move() {
        let mut state = PegState::new(2);
        state.apply(&HanoiMove::new(1, Peg::A, Peg::B), 1).expect("legal");
        assert_eq!(state.peg(Peg::A), &[2]);
        assert_eq!(state.peg(Peg::B), &[1]);
    }

    #[test]
    fn test_apply_rejects_larger_on_smaller() {
        let mut state = PegState::from_pegs(vec![2], vec![1], vec![]);
        let before = state.clone();
        let err = state
            .apply(&HanoiMove::new(2, Peg::A, Peg::B), 5)
            .unwrap_err();
        assert!(matches!(err, TraceError::IllegalMove { step: 5, disk: 2, .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_apply_rejects_buried_disk() {
        let mut state = PegState::new(3);
        let err = state
            .apply(&HanoiMove::new(2, Peg::A, Peg::C), 1)
            .unwrap_err();
        assert!(err.to_string().contains("top of A is disk 1"));
    }

    #[test]
    fn test_apply_rejects_empty_source() {
        let mut state = PegState::new(2);
        assert!(state.apply(&HanoiMove::new(1, Peg::B, Peg::C), 1).is_err());
    }

    #[test]
    fn test_apply_rejects_same_peg() {
        let mut state = PegState::new(2);
        assert!(state.apply(&HanoiMove::new(1, Peg::A, Peg::A), 1).is_err());
    }

    #[test]
    fn test_verify_built_traces() {
        for n in 1..=8 {
            let trace = build_hanoi_trace(n).expect("build");
            let end = verify_hanoi_trace(n, &trace).expect("legal");
            assert_eq!(end.peg(Peg::C).len(), n);
        }
    }

    #[test]
    fn test_verify_detects_truncated_trace() {
        let trace = build_hanoi_trace(3).expect("build");
        let truncated = Trace::from_events(trace.events()[..6].to_vec());
        let err = verify_hanoi_trace(3, &truncated).unwrap_err();
        assert!(matches!(err, TraceError::IncompleteSolution { moves: 6, .. }));
    }

    #[test]
    fn test_verify_detects_illegal_step() {
        let bad = Trace::from_events(vec![
            HanoiMove::new(1, Peg::A, Peg::B),
            HanoiMove::new(2, Peg::A, Peg::B),
        ]);
        let err = verify_hanoi_trace(2, &bad).unwrap_err();
        assert!(matches!(err, TraceError::IllegalMove { step: 2, .. }));
    }

    #[test]
    fn test_move_serialization() {
        let json = serde_json::to_string(&HanoiMove::new(1, Peg::A, Peg::C)).expect("serialize");
        assert_eq!(json, r#"{"disk":1,"from":"A","to":"C"}"#);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every prefix of a built trace replays legally.
        #[test]
        fn prop_every_step_legal(n in 1usize..=9) {
            let trace = build_hanoi_trace(n).expect("build");
            let mut state = PegState::new(n);
            for (i, mv) in trace.iter().enumerate() {
                prop_assert!(state.check(mv).is_none(), "step {} illegal", i + 1);
                state.apply(mv, i + 1).expect("legal");
                prop_assert_eq!(state.disk_count(), n);
            }
            prop_assert!(state.is_solved(n));
        }

        /// Property: disk 1 moves on every odd step.
        #[test]
        fn prop_smallest_disk_alternates(n in 1usize..=9) {
            let trace = build_hanoi_trace(n).expect("build");
            for (i, mv) in trace.iter().enumerate() {
                prop_assert_eq!(mv.disk == 1, i % 2 == 0);
            }
        }
    }
}
