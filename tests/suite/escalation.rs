//! Escalation behavior as seen from outside the engine.

use std::time::Instant;

use valentine_engine::{EscalationLevel, Stage, view};

use crate::common::{Played, RecordingSink, asking_app};

#[test]
fn refusal_cycle_repeats_indefinitely() {
    let mut app = asking_app(Instant::now());
    let mut sink = RecordingSink::default();

    for round in 1..=3u32 {
        app.refuse();
        assert_eq!(app.snapshot().escalation.level, EscalationLevel::Pleading);
        app.refuse();
        assert_eq!(app.snapshot().escalation.level, EscalationLevel::Hostile);
        app.refuse();
        assert_eq!(app.snapshot().escalation.level, EscalationLevel::Calm);
        assert_eq!(app.snapshot().escalation.refusal_count, round * 3);
    }

    app.flush_effects(&mut sink);
    assert_eq!(sink.played.len(), 6);
    assert!(sink.played.iter().all(|p| *p == Played::Sound));
}

#[test]
fn hostile_trap_resets_after_a_refusal() {
    let mut app = asking_app(Instant::now());
    app.refuse();
    app.refuse();
    app.confirm();
    app.confirm();
    app.confirm();
    assert_eq!(app.snapshot().escalation.hostile_confirm_attempts, 3);

    app.refuse();
    let escalation = app.snapshot().escalation;
    assert_eq!(escalation.level, EscalationLevel::Calm);
    assert_eq!(escalation.hostile_confirm_attempts, 0);
    assert_eq!(escalation.refusal_count, 6);
    assert!((view::accept_emphasis_scale(&escalation) - 1.0).abs() < f64::EPSILON);

    app.confirm();
    assert_eq!(app.stage(), Stage::Accepted);
    assert_eq!(
        view::compilation_errors_line(app.snapshot().escalation.refusal_count).as_deref(),
        Some("// Compilation errors: 6")
    );
}

#[test]
fn emphasis_scales_saturate() {
    let mut app = asking_app(Instant::now());
    app.refuse();
    app.refuse();
    for _ in 0..40 {
        app.confirm();
    }
    let escalation = app.snapshot().escalation;
    assert_eq!(app.stage(), Stage::Asking);
    assert!((view::accept_emphasis_scale(&escalation) - 0.1).abs() < 1e-9);
    assert!((view::decline_emphasis_scale(&escalation) - 5.0).abs() < 1e-9);
    assert!(!view::accept_highlight_enabled(escalation.level));
}

#[test]
fn failing_sound_device_does_not_block_progress() {
    let mut app = asking_app(Instant::now());
    let mut sink = RecordingSink {
        fail_sound: true,
        ..RecordingSink::default()
    };

    app.refuse();
    assert_eq!(app.flush_effects(&mut sink), 1);
    app.refuse();
    assert_eq!(app.flush_effects(&mut sink), 1);
    assert_eq!(app.snapshot().escalation.level, EscalationLevel::Hostile);
}
