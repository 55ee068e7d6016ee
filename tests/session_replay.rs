//! Cursor and session replay properties.

use std::time::Duration;

use tracestep::prelude::*;
use tracestep::renderers::render_frame;

fn sessions() -> Vec<Session> {
    vec![
        Session::new(ProblemKind::Hanoi, 4).expect("valid size"),
        Session::new(ProblemKind::NQueens, 5).expect("valid size"),
    ]
}

#[test]
fn len_steps_reach_terminal_then_noop() {
    for mut session in sessions() {
        let len = session.len();
        for _ in 0..len {
            assert!(session.step_forward().expect("step"));
        }
        assert_eq!(session.position(), len);
        assert!(session.is_complete());

        let log_len = session.log().len();
        assert!(!session.step_forward().expect("noop"));
        assert_eq!(session.position(), len);
        assert_eq!(session.log().len(), log_len);
    }
}

#[test]
fn reset_restores_start_from_any_position() {
    for mut session in sessions() {
        let start = render_frame(&session);
        for steps in [0, 1, session.len() / 2, session.len()] {
            session.reset().expect("reset");
            for _ in 0..steps {
                session.step_forward().expect("step");
            }
            session.reset().expect("reset");
            assert_eq!(session.position(), 0);
            assert!(session.log().is_empty());
            assert_eq!(render_frame(&session), start);
        }
    }
}

#[test]
fn resize_leaves_no_residue() {
    let mut session = Session::new(ProblemKind::Hanoi, 4).expect("valid size");
    session.jump_to_end(|_| {}).expect("replay");
    assert!(session.log().iter().any(|l| l.contains("disk 4")));

    session.set_size(2).expect("rebuild");
    assert!(session.log().is_empty());
    session.jump_to_end(|_| {}).expect("replay");
    assert_eq!(session.log().len(), 3);
    assert!(session.log().iter().all(|l| !l.contains("disk 3") && !l.contains("disk 4")));
}

#[test]
fn manual_and_autoplay_frames_match() {
    let mut manual = Session::new(ProblemKind::NQueens, 4).expect("valid size");
    let mut expected = vec![];
    while manual.step_forward().expect("step") {
        expected.push(render_frame(&manual));
    }

    let mut auto = Session::new(ProblemKind::NQueens, 4).expect("valid size");
    let mut frames = vec![];
    let steps = Autoplay::new(Duration::ZERO)
        .run(&mut auto, |s| frames.push(render_frame(s)), || false)
        .expect("autoplay");
    assert_eq!(steps, expected.len());
    assert_eq!(frames, expected);
    assert_eq!(auto.log(), manual.log());
}

#[test]
fn autoplay_stop_request_halts_between_steps() {
    let mut session = Session::new(ProblemKind::Hanoi, 5).expect("valid size");
    let mut calls = 0;
    let steps = Autoplay::new(Duration::ZERO)
        .run(
            &mut session,
            |_| {},
            || {
                calls += 1;
                calls > 10
            },
        )
        .expect("autoplay");
    assert_eq!(steps, 10);
    assert_eq!(session.position(), 10);
}

#[test]
fn export_round_trips_count_and_checksum() {
    for session in sessions() {
        let json = session.export_json().expect("export");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["events"].as_array().map(Vec::len), Some(session.len()));
        assert_eq!(
            value["checksum"].as_str().map(str::to_string),
            Some(session.trace_checksum().expect("checksum"))
        );
    }
}

#[test]
fn config_drives_session() {
    let yaml = r#"
schema_version: "1.0"
problem: { kind: nqueens, size: 6 }
playback: { delay_secs: 0.1 }
"#;
    let config = TraceConfig::from_yaml(yaml).expect("valid yaml");
    let mut session = Session::from_config(&config).expect("valid size");
    assert_eq!(session.kind(), ProblemKind::NQueens);
    assert!(session.set_size(11).is_err());
    assert_eq!(session.size(), 6);
    assert_eq!(Autoplay::from_config(&config.playback).delay(), Duration::from_millis(100));
}
