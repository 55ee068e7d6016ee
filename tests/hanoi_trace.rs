//! Tower of Hanoi trace properties.

use tracestep::prelude::*;
use tracestep::trace::hanoi::{move_count, verify_hanoi_trace, MAX_DISKS};

#[test]
fn move_count_is_two_pow_n_minus_one() {
    for n in 1..=12 {
        let trace = build_hanoi_trace(n).expect("valid size");
        assert_eq!(trace.len(), (1 << n) - 1, "n = {n}");
        assert_eq!(trace.len(), move_count(n));
    }
}

#[test]
fn three_disk_sequence_is_canonical() {
    let trace = build_hanoi_trace(3).expect("valid size");
    let expected = [
        (1, Peg::A, Peg::C),
        (2, Peg::A, Peg::B),
        (1, Peg::C, Peg::B),
        (3, Peg::A, Peg::C),
        (1, Peg::B, Peg::A),
        (2, Peg::B, Peg::C),
        (1, Peg::A, Peg::C),
    ];
    let actual: Vec<_> = trace.iter().map(|m| (m.disk, m.from, m.to)).collect();
    assert_eq!(actual, expected);
}

#[test]
fn every_move_is_legal_and_tower_ends_on_c() {
    for n in 1..=10 {
        let trace = build_hanoi_trace(n).expect("valid size");
        let mut pegs = PegState::new(n);
        for (i, mv) in trace.iter().enumerate() {
            assert_eq!(pegs.check(mv), None, "n = {n}, step {}", i + 1);
            pegs.apply(mv, i + 1).expect("legal move");
        }
        assert!(pegs.is_solved(n));
        assert_eq!(verify_hanoi_trace(n, &trace).expect("legal trace"), pegs);
    }
}

#[test]
fn cursor_replay_rejects_tampered_trace() {
    let mut events = build_hanoi_trace(3).expect("valid size").events().to_vec();
    // disk 2 A → B now lands on disk 1
    events.swap(1, 2);
    let trace = Trace::from_events(events);

    let err = verify_hanoi_trace(3, &trace).unwrap_err();
    assert!(matches!(err, TraceError::IllegalMove { step: 3, disk: 2, .. }));

    let mut cursor = ReplayCursor::new(HanoiReplay { disks: 3 }, trace);
    cursor.step_forward().expect("legal move");
    cursor.step_forward().expect("legal move");
    assert!(cursor.step_forward().is_err());
    assert_eq!(cursor.position(), 2);
    assert_eq!(cursor.log().len(), 2);
}

#[test]
fn truncated_trace_is_incomplete() {
    let events: Vec<HanoiMove> = build_hanoi_trace(3)
        .expect("valid size")
        .iter()
        .take(6)
        .copied()
        .collect();
    let err = verify_hanoi_trace(3, &Trace::from_events(events)).unwrap_err();
    assert!(matches!(err, TraceError::IncompleteSolution { disks: 3, moves: 6 }));
}

#[test]
fn size_bounds() {
    assert!(matches!(
        build_hanoi_trace(0),
        Err(TraceError::InvalidProblemSize { size: 0, .. })
    ));
    assert!(build_hanoi_trace(MAX_DISKS + 1).unwrap_err().is_size_error());
}

#[test]
fn log_lines_follow_template() {
    let trace = build_hanoi_trace(2).expect("valid size");
    let mut cursor = ReplayCursor::new(HanoiReplay { disks: 2 }, trace);
    cursor.jump_to_end(|_| {}).expect("legal trace");
    assert_eq!(
        cursor.log().lines(),
        [
            "Step 1: Move disk 1 A → B",
            "Step 2: Move disk 2 A → C",
            "Step 3: Move disk 1 B → C",
        ]
    );
}
