//! Stage controller: the only owner of the top-level `Stage`.
//!
//! Per-stage data lives inside the stage variant itself. The loading timers exist
//! only while `Loading` is active and the escalation machine only while `Asking`
//! is active, so leaving a stage drops whatever it owned.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use valentine_types::{
    EscalationMachine, EscalationState, Intensity, InvalidTransition, Operation, Snapshot, Stage,
};

use crate::timer::{Interval, OneShot};

/// Timer parameters for the loading stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTiming {
    /// Delay before `Loading` turns into `Asking` on its own.
    pub reveal_delay: Duration,
    /// Rotation period of the loading message.
    pub message_period: Duration,
    /// Number of loading messages; the index wraps at this value.
    pub message_count: usize,
}

impl Default for StageTiming {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_millis(5000),
            message_period: Duration::from_millis(750),
            message_count: 7,
        }
    }
}

impl StageTiming {
    /// A zero rotation period can never fire; use the default instead.
    fn sanitized(self) -> Self {
        if !self.message_period.is_zero() {
            return self;
        }
        let fallback = Self::default().message_period;
        warn!(?fallback, "Loading message period must be greater than zero; using default");
        Self {
            message_period: fallback,
            ..self
        }
    }
}

#[derive(Debug)]
struct LoadingTimers {
    reveal: OneShot,
    rotation: Interval,
}

#[derive(Debug)]
enum StageState {
    Envelope,
    Intro,
    Loading(LoadingTimers),
    Asking(EscalationMachine),
    Accepted(EscalationState),
    Note(EscalationState),
}

impl StageState {
    fn stage(&self) -> Stage {
        match self {
            Self::Envelope => Stage::Envelope,
            Self::Intro => Stage::Intro,
            Self::Loading(_) => Stage::Loading,
            Self::Asking(_) => Stage::Asking,
            Self::Accepted(_) => Stage::Accepted,
            Self::Note(_) => Stage::Note,
        }
    }
}

#[derive(Debug)]
pub struct StageController {
    state: StageState,
    timing: StageTiming,
    loading_message_index: usize,
}

impl StageController {
    #[must_use]
    pub fn new(timing: StageTiming) -> Self {
        Self {
            state: StageState::Envelope,
            timing: timing.sanitized(),
            loading_message_index: 0,
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.state.stage()
    }

    /// Escalation counters: live while `Asking`, frozen afterwards, zero before.
    #[must_use]
    pub fn escalation(&self) -> EscalationState {
        match &self.state {
            StageState::Asking(machine) => machine.state(),
            StageState::Accepted(frozen) | StageState::Note(frozen) => *frozen,
            StageState::Envelope | StageState::Intro | StageState::Loading(_) => {
                EscalationState::default()
            }
        }
    }

    /// The escalation machine, available only while `Asking`.
    pub fn escalation_mut(&mut self) -> Option<&mut EscalationMachine> {
        match &mut self.state {
            StageState::Asking(machine) => Some(machine),
            _ => None,
        }
    }

    #[must_use]
    pub fn loading_message_index(&self) -> usize {
        self.loading_message_index
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stage: self.stage(),
            escalation: self.escalation(),
            loading_message_index: self.loading_message_index,
        }
    }

    pub fn open(&mut self) -> Result<(), InvalidTransition> {
        self.require(Operation::Open)?;
        self.enter(StageState::Intro);
        Ok(())
    }

    /// Secondary gesture on the envelope. Never changes the stage.
    pub fn acknowledge_envelope(&self) -> Result<Intensity, InvalidTransition> {
        self.require(Operation::AcknowledgeEnvelope)?;
        Ok(Intensity::Low)
    }

    /// Enter `Loading` and arm the reveal and rotation timers from `now`.
    pub fn advance(&mut self, now: Instant) -> Result<(), InvalidTransition> {
        self.require(Operation::Advance)?;
        self.loading_message_index = 0;
        self.enter(StageState::Loading(LoadingTimers {
            reveal: OneShot::starting_at(now, self.timing.reveal_delay),
            rotation: Interval::starting_at(now, self.timing.message_period),
        }));
        Ok(())
    }

    /// Accept the invitation. Refused while the escalation level is hostile.
    pub fn accept(&mut self) -> Result<Intensity, InvalidTransition> {
        let rejected = InvalidTransition {
            operation: Operation::Accept,
            stage: self.stage(),
        };
        let StageState::Asking(machine) = &self.state else {
            return Err(rejected);
        };
        if machine.level().is_hostile() {
            return Err(rejected);
        }
        let frozen = machine.state();
        self.enter(StageState::Accepted(frozen));
        Ok(Intensity::High)
    }

    pub fn view_note(&mut self) -> Result<(), InvalidTransition> {
        let StageState::Accepted(frozen) = self.state else {
            return Err(self.invalid(Operation::ViewNote));
        };
        self.enter(StageState::Note(frozen));
        Ok(())
    }

    pub fn return_from_note(&mut self) -> Result<(), InvalidTransition> {
        let StageState::Note(frozen) = self.state else {
            return Err(self.invalid(Operation::ReturnFromNote));
        };
        self.enter(StageState::Accepted(frozen));
        Ok(())
    }

    /// Drive the loading timers. Returns whether anything observable changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let StageState::Loading(timers) = &mut self.state else {
            return false;
        };

        let mut changed = false;
        let periods = timers.rotation.poll(now) as usize;
        if periods > 0 && self.timing.message_count > 0 {
            self.loading_message_index =
                (self.loading_message_index + periods) % self.timing.message_count;
            changed = true;
        }

        if timers.reveal.poll(now) {
            self.enter(StageState::Asking(EscalationMachine::new()));
            changed = true;
        }
        changed
    }

    fn require(&self, operation: Operation) -> Result<(), InvalidTransition> {
        if self.stage() == operation.valid_from() {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    fn invalid(&self, operation: Operation) -> InvalidTransition {
        InvalidTransition {
            operation,
            stage: self.stage(),
        }
    }

    fn enter(&mut self, next: StageState) {
        let from = self.stage();
        self.state = next;
        info!(%from, to = %self.stage(), "Stage changed");
    }
}

impl Default for StageController {
    fn default() -> Self {
        Self::new(StageTiming::default())
    }
}
