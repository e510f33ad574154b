//! The refusal-escalation mini-game played while the stage is `Asking`.
//!
//! # Level transitions
//!
//! ```text
//!            refuse            refuse
//!   Calm ------------> Pleading ------------> Hostile
//!    ^                                          |  ^
//!    |                 refuse (reset)           |  | confirm
//!    +------------------------------------------+  +-- (self-loop, attempts += 1)
//! ```
//!
//! Confirming from `Calm` or `Pleading` leaves the machine untouched; the stage
//! controller turns it into an acceptance.

use serde::{Deserialize, Serialize};

/// Escalation level of the decline mini-game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EscalationLevel {
    /// Level 0: the original invitation.
    #[default]
    Calm,
    /// Level 1: a softened plea.
    Pleading,
    /// Level 2: confrontational; accepting is disabled.
    Hostile,
}

impl EscalationLevel {
    /// Numeric level in `0..=2`.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Calm => 0,
            Self::Pleading => 1,
            Self::Hostile => 2,
        }
    }

    /// Next level on a refusal, wrapping `Hostile` back to `Calm`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Calm => Self::Pleading,
            Self::Pleading => Self::Hostile,
            Self::Hostile => Self::Calm,
        }
    }

    #[must_use]
    pub const fn is_hostile(self) -> bool {
        matches!(self, Self::Hostile)
    }
}

/// Plain-data view of the escalation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EscalationState {
    pub level: EscalationLevel,
    pub refusal_count: u32,
    pub hostile_confirm_attempts: u32,
}

/// Result of a refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefuseOutcome {
    /// The level advanced (`Calm -> Pleading` or `Pleading -> Hostile`).
    Escalated(EscalationLevel),
    /// Refusing while hostile de-escalated fully to `Calm`.
    Reset,
}

impl RefuseOutcome {
    /// Whether the feedback cue accompanies this refusal.
    #[must_use]
    pub const fn plays_feedback(self) -> bool {
        matches!(self, Self::Escalated(_))
    }
}

/// Result of pressing the accept control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Not hostile: the caller should accept. The machine was not touched.
    Proceed,
    /// Hostile: the attempt was counted and acceptance is refused.
    Rejected { attempts: u32 },
}

/// Owns the escalation counters and enforces their invariants.
///
/// `hostile_confirm_attempts` is non-zero only while the level is `Hostile`, and
/// `refusal_count` never decreases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscalationMachine {
    state: EscalationState,
}

impl EscalationMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> EscalationState {
        self.state
    }

    #[must_use]
    pub fn level(&self) -> EscalationLevel {
        self.state.level
    }

    #[must_use]
    pub fn refusal_count(&self) -> u32 {
        self.state.refusal_count
    }

    #[must_use]
    pub fn hostile_confirm_attempts(&self) -> u32 {
        self.state.hostile_confirm_attempts
    }

    pub fn refuse(&mut self) -> RefuseOutcome {
        self.state.refusal_count = self.state.refusal_count.saturating_add(1);
        if self.state.level.is_hostile() {
            self.state.level = EscalationLevel::Calm;
            self.state.hostile_confirm_attempts = 0;
            RefuseOutcome::Reset
        } else {
            self.state.level = self.state.level.next();
            RefuseOutcome::Escalated(self.state.level)
        }
    }

    pub fn confirm(&mut self) -> ConfirmOutcome {
        if !self.state.level.is_hostile() {
            return ConfirmOutcome::Proceed;
        }
        self.state.refusal_count = self.state.refusal_count.saturating_add(1);
        self.state.hostile_confirm_attempts = self.state.hostile_confirm_attempts.saturating_add(1);
        ConfirmOutcome::Rejected {
            attempts: self.state.hostile_confirm_attempts,
        }
    }
}
