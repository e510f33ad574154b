//! End-to-end stage flow through the public engine API.

use std::time::{Duration, Instant};

use valentine_engine::{App, Intensity, SessionSettings, Snapshot, Stage};

use crate::common::{Played, RecordingSink, asking_app, ms};

#[test]
fn full_session_happy_path() {
    let start = Instant::now();
    let mut app = App::default();
    let mut sink = RecordingSink::default();

    app.acknowledge_envelope();
    app.open();
    app.advance_at(start);
    for step in 1..=7 {
        app.tick_at(start + ms(step * 750));
    }
    assert_eq!(app.stage(), Stage::Asking);

    app.confirm();
    app.view_note();
    app.return_from_note();
    app.flush_effects(&mut sink);

    assert_eq!(app.stage(), Stage::Accepted);
    assert_eq!(
        sink.played,
        vec![
            Played::Confetti(Intensity::Low),
            Played::Confetti(Intensity::High)
        ]
    );
}

#[test]
fn observer_sees_the_stage_sequence() {
    let start = Instant::now();
    let mut app = App::default();
    let mut observer = app.subscribe();
    let mut seen = vec![observer.borrow_and_update().stage];

    let mut record = |app: &App, observer: &mut tokio::sync::watch::Receiver<Snapshot>| {
        if observer.has_changed().unwrap() {
            let stage = observer.borrow_and_update().stage;
            if seen.last() != Some(&stage) {
                seen.push(stage);
            }
        }
        assert_eq!(observer.borrow().stage, app.stage());
    };

    app.open();
    record(&app, &mut observer);
    app.advance_at(start);
    record(&app, &mut observer);
    app.tick_at(start + ms(5000));
    record(&app, &mut observer);
    app.confirm();
    record(&app, &mut observer);
    app.view_note();
    record(&app, &mut observer);

    assert_eq!(
        seen,
        vec![
            Stage::Envelope,
            Stage::Intro,
            Stage::Loading,
            Stage::Asking,
            Stage::Accepted,
            Stage::Note
        ]
    );
}

#[test]
fn reveal_fires_once_even_after_a_long_stall() {
    let start = Instant::now();
    let mut app = App::default();
    app.open();
    app.advance_at(start);

    // One late tick covers the reveal and every rotation in between.
    app.tick_at(start + ms(60_000));
    assert_eq!(app.stage(), Stage::Asking);

    app.tick_at(start + ms(120_000));
    assert_eq!(app.stage(), Stage::Asking);
}

#[test]
fn loading_index_survives_the_reveal() {
    let start = Instant::now();
    let mut app = App::default();
    app.open();
    app.advance_at(start);
    app.tick_at(start + ms(2250));
    assert_eq!(app.snapshot().loading_message_index, 3);

    app.tick_at(start + ms(5000));
    assert_eq!(app.stage(), Stage::Asking);
    assert!(app.snapshot().loading_message_index < app.settings().loading_messages.len());
}

#[test]
fn rotation_wraps_with_short_message_lists() {
    let start = Instant::now();
    let settings = SessionSettings {
        loading_messages: vec!["one".to_string(), "two".to_string()],
        ..SessionSettings::default()
    };
    let mut app = App::new(settings);
    app.open();
    app.advance_at(start);

    app.tick_at(start + ms(750));
    assert_eq!(app.loading_message(), "two");
    app.tick_at(start + ms(1500));
    assert_eq!(app.loading_message(), "one");
}

#[test]
fn zero_message_period_still_rotates_and_reveals() {
    let start = Instant::now();
    let settings = SessionSettings {
        message_period: Duration::ZERO,
        ..SessionSettings::default()
    };
    let mut app = App::new(settings);
    app.open();
    app.advance_at(start);
    assert_eq!(app.stage(), Stage::Loading);

    app.tick_at(start + ms(750));
    assert_eq!(app.snapshot().loading_message_index, 1);
    app.tick_at(start + ms(5000));
    assert_eq!(app.stage(), Stage::Asking);
}

#[test]
fn quit_is_a_request_not_a_transition() {
    let mut app = asking_app(Instant::now());
    let before = app.snapshot();
    app.request_quit();
    assert!(app.should_quit());
    assert_eq!(app.snapshot(), before);
}
