//! Core engine for Valentine - stage state machine and orchestration.
//!
//! This crate contains the [`App`] without TUI dependencies. The presentation layer
//! routes raw input into the operations below, reads [`Snapshot`]s back out, and
//! drains queued [`Effect`]s into an [`EffectSink`].
//!
//! ```text
//! input ──> App ──┬──> StageController ──> EscalationMachine (Asking only)
//!                 ├──> effect queue ──> EffectSink (bell, confetti)
//!                 └──> watch::Sender<Snapshot> ──> observers
//! ```

use std::time::Instant;

use tokio::sync::watch;
use tracing::{debug, warn};

pub use valentine_types::{
    AssetId, ConfirmOutcome, Effect, EscalationLevel, EscalationMachine, EscalationState,
    Intensity, InvalidTransition, Operation, RefuseOutcome, Snapshot, Stage, UiOptions, view,
};

mod config;
mod effects;
mod stage;
mod timer;

pub use config::{
    AppConfig, ConfigError, ContentConfig, DEFAULT_LOADING_MESSAGES, SessionSettings,
    TimingConfig, ValentineConfig, config_path,
};
pub use effects::{EffectError, EffectSink, dispatch_effects};
pub use stage::{StageController, StageTiming};

/// The single-session application state.
///
/// Every operation is forgiving: calling one from the wrong stage is logged and
/// ignored. Mutations publish a fresh [`Snapshot`] to subscribers when, and only
/// when, the snapshot actually changed.
#[derive(Debug)]
pub struct App {
    stage: StageController,
    settings: SessionSettings,
    effects: Vec<Effect>,
    snapshots: watch::Sender<Snapshot>,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(settings: SessionSettings) -> Self {
        let stage = StageController::new(settings.stage_timing());
        let (snapshots, _) = watch::channel(stage.snapshot());
        Self {
            stage,
            settings,
            effects: Vec::new(),
            snapshots,
            should_quit: false,
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage.stage()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.stage.snapshot()
    }

    /// Observe snapshots. The receiver starts at the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.settings.ui
    }

    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.settings.recipient
    }

    #[must_use]
    pub fn route_distance_km(&self) -> u32 {
        self.settings.route_distance_km
    }

    /// The loading message selected by the rotation timer.
    #[must_use]
    pub fn loading_message(&self) -> &str {
        let messages = &self.settings.loading_messages;
        messages
            .get(self.stage.loading_message_index())
            .map_or("", String::as_str)
    }

    pub fn open(&mut self) {
        let result = self.stage.open();
        self.finish(Operation::Open, result);
    }

    pub fn acknowledge_envelope(&mut self) {
        match self.stage.acknowledge_envelope() {
            Ok(intensity) => self.queue(Effect::Celebrate(intensity)),
            Err(err) => ignore(err),
        }
    }

    pub fn advance(&mut self) {
        self.advance_at(Instant::now());
    }

    /// `advance` with an explicit start time for the loading timers.
    pub fn advance_at(&mut self, now: Instant) {
        let result = self.stage.advance(now);
        self.finish(Operation::Advance, result);
    }

    /// The decline control.
    pub fn refuse(&mut self) {
        let Some(machine) = self.stage.escalation_mut() else {
            ignore(self.invalid(Operation::Refuse));
            return;
        };
        let outcome = machine.refuse();
        debug!(?outcome, refusals = machine.refusal_count(), "Refusal");
        if outcome.plays_feedback() {
            self.queue(Effect::FeedbackSound);
        }
        self.publish();
    }

    /// The accept control. While hostile this is punished instead of accepted.
    pub fn confirm(&mut self) {
        let Some(machine) = self.stage.escalation_mut() else {
            ignore(self.invalid(Operation::Confirm));
            return;
        };
        match machine.confirm() {
            ConfirmOutcome::Rejected { attempts } => {
                debug!(attempts, "Hostile confirmation rejected");
                self.queue(Effect::FeedbackSound);
                self.publish();
            }
            ConfirmOutcome::Proceed => match self.stage.accept() {
                Ok(intensity) => {
                    self.queue(Effect::Celebrate(intensity));
                    self.publish();
                }
                Err(err) => ignore(err),
            },
        }
    }

    pub fn view_note(&mut self) {
        let result = self.stage.view_note();
        self.finish(Operation::ViewNote, result);
    }

    pub fn return_from_note(&mut self) {
        let result = self.stage.return_from_note();
        self.finish(Operation::ReturnFromNote, result);
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Drive stage timers as of `now`.
    pub fn tick_at(&mut self, now: Instant) {
        if self.stage.tick(now) {
            self.publish();
        }
    }

    /// Drain effect commands queued since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Drain queued effects into `sink`. Returns the number that failed.
    pub fn flush_effects(&mut self, sink: &mut dyn EffectSink) -> usize {
        let effects = self.take_effects();
        dispatch_effects(effects, sink)
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn finish(&mut self, operation: Operation, result: Result<(), InvalidTransition>) {
        match result {
            Ok(()) => {
                debug!(%operation, "Operation applied");
                self.publish();
            }
            Err(err) => ignore(err),
        }
    }

    fn queue(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    fn invalid(&self, operation: Operation) -> InvalidTransition {
        InvalidTransition {
            operation,
            stage: self.stage(),
        }
    }

    fn publish(&self) {
        let next = self.stage.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

fn ignore(err: InvalidTransition) {
    warn!(operation = %err.operation, stage = %err.stage, "Ignoring invalid transition");
}

#[cfg(test)]
mod tests;
