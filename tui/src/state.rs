//! Presentation-only state: nothing here feeds back into the core.

use std::time::{Duration, Instant};

use crate::effects::Confetti;

/// Spinner cadence, independent of the render frame rate.
const SPINNER_PERIOD: Duration = Duration::from_millis(100);

/// Which of the two `Asking` controls `Enter` presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Accept,
    Decline,
}

impl Focus {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Focus::Accept => Focus::Decline,
            Focus::Decline => Focus::Accept,
        }
    }
}

#[derive(Debug)]
pub struct ViewState {
    pub focus: Focus,
    pub confetti: Confetti,
    spinner_tick: usize,
    spinner_elapsed: Duration,
    last_frame: Instant,
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            focus: Focus::default(),
            confetti: Confetti::default(),
            spinner_tick: 0,
            spinner_elapsed: Duration::ZERO,
            last_frame: Instant::now(),
        }
    }

    #[must_use]
    pub fn spinner_tick(&self) -> usize {
        self.spinner_tick
    }

    /// Advance animations to `now`. Returns the elapsed frame time.
    pub fn advance_frame(&mut self, now: Instant) -> Duration {
        let delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        self.confetti.advance(delta);
        self.spinner_elapsed += delta;
        while self.spinner_elapsed >= SPINNER_PERIOD {
            self.spinner_elapsed -= SPINNER_PERIOD;
            self.spinner_tick = self.spinner_tick.wrapping_add(1);
        }
        delta
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
