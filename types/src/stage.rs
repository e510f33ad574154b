//! Top-level stages and the operations that move between them.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The top-level, mutually exclusive view of the session.
///
/// ```text
/// Envelope -> Intro -> Loading -> Asking -> Accepted <-> Note
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Envelope,
    Intro,
    Loading,
    Asking,
    Accepted,
    Note,
}

impl Stage {
    pub const ALL: [Self; 6] = [
        Self::Envelope,
        Self::Intro,
        Self::Loading,
        Self::Asking,
        Self::Accepted,
        Self::Note,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Envelope => "envelope",
            Self::Intro => "intro",
            Self::Loading => "loading",
            Self::Asking => "asking",
            Self::Accepted => "accepted",
            Self::Note => "note",
        }
    }

    /// Image shown while this stage is active, if any.
    #[must_use]
    pub const fn asset(self) -> Option<AssetId> {
        match self {
            Self::Intro => Some(AssetId::Intro),
            Self::Accepted => Some(AssetId::Accepted),
            Self::Note => Some(AssetId::Note),
            Self::Envelope | Self::Loading | Self::Asking => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier for a stage-specific image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetId {
    Intro,
    Accepted,
    Note,
}

impl AssetId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Accepted => "accepted",
            Self::Note => "note",
        }
    }
}

/// A user-facing operation routed into the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Open,
    AcknowledgeEnvelope,
    Advance,
    Accept,
    ViewNote,
    ReturnFromNote,
    Refuse,
    Confirm,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::AcknowledgeEnvelope => "acknowledge_envelope",
            Self::Advance => "advance",
            Self::Accept => "accept",
            Self::ViewNote => "view_note",
            Self::ReturnFromNote => "return_from_note",
            Self::Refuse => "refuse",
            Self::Confirm => "confirm",
        }
    }

    /// The only stage from which this operation is valid.
    #[must_use]
    pub const fn valid_from(self) -> Stage {
        match self {
            Self::Open | Self::AcknowledgeEnvelope => Stage::Envelope,
            Self::Advance => Stage::Intro,
            Self::Accept | Self::Refuse | Self::Confirm => Stage::Asking,
            Self::ViewNote => Stage::Accepted,
            Self::ReturnFromNote => Stage::Note,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation was requested from a stage that does not accept it.
///
/// Callers on the UI surface treat this as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("`{operation}` is not valid in stage `{stage}`")]
pub struct InvalidTransition {
    pub operation: Operation,
    pub stage: Stage,
}
