//! Fire-and-forget commands the core asks the presentation layer to perform.

use serde::{Deserialize, Serialize};

/// Strength of a celebration burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    High,
}

impl Intensity {
    #[must_use]
    pub const fn particle_count(self) -> u16 {
        match self {
            Self::Low => 50,
            Self::High => 150,
        }
    }

    /// Angular spread of the burst in degrees.
    #[must_use]
    pub const fn spread_degrees(self) -> u16 {
        match self {
            Self::Low => 60,
            Self::High => 70,
        }
    }

    /// Vertical origin as a fraction of the viewport height (0.0 = top).
    #[must_use]
    pub const fn origin_y(self) -> f32 {
        match self {
            Self::Low => 0.5,
            Self::High => 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    FeedbackSound,
    Celebrate(Intensity),
}
