use std::time::{Duration, Instant};

use super::{
    App, Effect, EffectError, EffectSink, EscalationLevel, Intensity, SessionSettings, Stage,
    view,
};

fn app_in_asking(start: Instant) -> App {
    let mut app = App::default();
    app.open();
    app.advance_at(start);
    app.tick_at(start + Duration::from_millis(5000));
    assert_eq!(app.stage(), Stage::Asking);
    app
}

#[test]
fn envelope_to_asking_without_further_input() {
    let start = Instant::now();
    let mut app = App::default();
    assert_eq!(app.stage(), Stage::Envelope);

    app.open();
    assert_eq!(app.stage(), Stage::Intro);

    app.advance_at(start);
    assert_eq!(app.stage(), Stage::Loading);

    app.tick_at(start + Duration::from_millis(2500));
    assert_eq!(app.stage(), Stage::Loading);

    app.tick_at(start + Duration::from_millis(5000));
    assert_eq!(app.stage(), Stage::Asking);
    assert!(app.take_effects().is_empty());
}

#[test]
fn acknowledging_envelope_celebrates_low_every_time() {
    let mut app = App::default();
    app.acknowledge_envelope();
    app.acknowledge_envelope();
    assert_eq!(app.stage(), Stage::Envelope);
    assert_eq!(
        app.take_effects(),
        vec![
            Effect::Celebrate(Intensity::Low),
            Effect::Celebrate(Intensity::Low)
        ]
    );

    app.open();
    app.acknowledge_envelope();
    assert!(app.take_effects().is_empty());
}

#[test]
fn three_refusals_reset_and_sound_twice() {
    let mut app = app_in_asking(Instant::now());
    app.refuse();
    app.refuse();
    app.refuse();

    let escalation = app.snapshot().escalation;
    assert_eq!(escalation.level, EscalationLevel::Calm);
    assert_eq!(escalation.hostile_confirm_attempts, 0);
    assert_eq!(escalation.refusal_count, 3);
    assert_eq!(
        app.take_effects(),
        vec![Effect::FeedbackSound, Effect::FeedbackSound]
    );
}

#[test]
fn confirm_at_calm_accepts_directly() {
    let mut app = app_in_asking(Instant::now());
    let before = app.snapshot().escalation;

    app.confirm();
    assert_eq!(app.stage(), Stage::Accepted);
    assert_eq!(app.snapshot().escalation, before);
    assert_eq!(app.take_effects(), vec![Effect::Celebrate(Intensity::High)]);
}

#[test]
fn confirm_at_pleading_still_accepts() {
    let mut app = app_in_asking(Instant::now());
    app.refuse();
    app.take_effects();

    app.confirm();
    assert_eq!(app.stage(), Stage::Accepted);
    assert_eq!(app.snapshot().escalation.refusal_count, 1);
    assert_eq!(app.take_effects(), vec![Effect::Celebrate(Intensity::High)]);
}

#[test]
fn hostile_confirmations_are_punished() {
    let mut app = app_in_asking(Instant::now());
    app.refuse();
    app.refuse();
    app.take_effects();
    let refusals_before = app.snapshot().escalation.refusal_count;

    app.confirm();
    app.confirm();

    let escalation = app.snapshot().escalation;
    assert_eq!(app.stage(), Stage::Asking);
    assert_eq!(escalation.hostile_confirm_attempts, 2);
    assert_eq!(escalation.refusal_count, refusals_before + 2);
    assert!((view::accept_emphasis_scale(&escalation) - 0.49).abs() < 1e-9);
    assert!((view::decline_emphasis_scale(&escalation) - 1.69).abs() < 1e-9);
    assert_eq!(
        app.take_effects(),
        vec![Effect::FeedbackSound, Effect::FeedbackSound]
    );
}

#[test]
fn note_excursion_preserves_frozen_escalation() {
    let mut app = app_in_asking(Instant::now());
    app.refuse();
    app.confirm();
    let accepted = app.snapshot();
    assert_eq!(accepted.stage, Stage::Accepted);

    app.view_note();
    assert_eq!(app.stage(), Stage::Note);
    app.return_from_note();
    assert_eq!(app.snapshot(), accepted);

    // Escalation controls are dead outside Asking.
    app.refuse();
    app.confirm();
    assert_eq!(app.snapshot(), accepted);
}

#[test]
fn invalid_operations_are_ignored() {
    let start = Instant::now();
    let mut app = App::default();

    app.advance_at(start);
    app.view_note();
    app.return_from_note();
    app.refuse();
    app.confirm();
    assert_eq!(app.stage(), Stage::Envelope);
    assert!(app.take_effects().is_empty());

    app.open();
    app.advance_at(start);
    // A second advance must not re-arm the reveal timer.
    app.advance_at(start + Duration::from_millis(4000));
    app.tick_at(start + Duration::from_millis(5000));
    assert_eq!(app.stage(), Stage::Asking);
}

#[test]
fn dropping_app_mid_loading_is_safe() {
    let start = Instant::now();
    let mut app = App::default();
    let observer = app.subscribe();
    app.open();
    app.advance_at(start);
    drop(app);

    // The sender is gone; nothing can publish the pending reveal.
    assert!(observer.has_changed().is_err());
    assert_eq!(observer.borrow().stage, Stage::Loading);
}

#[test]
fn loading_message_rotates_with_config() {
    let start = Instant::now();
    let mut app = App::default();
    app.open();
    app.advance_at(start);
    assert_eq!(app.loading_message(), "$ git init");

    app.tick_at(start + Duration::from_millis(750));
    assert_eq!(app.loading_message(), "Fetching remote dependencies...");

    app.tick_at(start + Duration::from_millis(750 * 6));
    assert_eq!(app.loading_message(), "All tests passed ✓");
    assert_eq!(app.stage(), Stage::Loading);
}

#[test]
fn subscribers_see_each_change_once() {
    let start = Instant::now();
    let mut app = App::default();
    let mut observer = app.subscribe();
    assert!(!observer.has_changed().unwrap());

    app.open();
    assert!(observer.has_changed().unwrap());
    assert_eq!(observer.borrow_and_update().stage, Stage::Intro);

    // Rejected operations and idle ticks publish nothing.
    app.open();
    app.tick_at(start);
    assert!(!observer.has_changed().unwrap());

    app.advance_at(start);
    app.tick_at(start + Duration::from_millis(750));
    let seen = *observer.borrow_and_update();
    assert_eq!(seen.stage, Stage::Loading);
    assert_eq!(seen.loading_message_index, 1);
}

#[derive(Default)]
struct MuteSink {
    attempts: usize,
}

impl EffectSink for MuteSink {
    fn play_feedback_sound(&mut self) -> Result<(), EffectError> {
        self.attempts += 1;
        Err(EffectError::Sound(std::io::Error::other("muted")))
    }

    fn celebrate(&mut self, _intensity: Intensity) -> Result<(), EffectError> {
        self.attempts += 1;
        Err(EffectError::Celebrate("no canvas".to_string()))
    }
}

#[test]
fn effect_failures_never_reach_the_session() {
    let mut app = app_in_asking(Instant::now());
    let mut sink = MuteSink::default();

    app.refuse();
    assert_eq!(app.flush_effects(&mut sink), 1);
    app.confirm();
    assert_eq!(app.flush_effects(&mut sink), 1);
    assert_eq!(sink.attempts, 2);
    assert_eq!(app.stage(), Stage::Accepted);
    assert_eq!(app.flush_effects(&mut sink), 0);
}

#[test]
fn custom_timing_is_honoured() {
    let start = Instant::now();
    let settings = SessionSettings {
        reveal_delay: Duration::from_millis(100),
        ..SessionSettings::default()
    };
    let mut app = App::new(settings);
    app.open();
    app.advance_at(start);
    app.tick_at(start + Duration::from_millis(100));
    assert_eq!(app.stage(), Stage::Asking);
}
