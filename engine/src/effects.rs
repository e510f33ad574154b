//! Side-effect commands and the sink that performs them.
//!
//! The core only queues [`Effect`]s. Whoever owns the screen and speaker drains the
//! queue into an [`EffectSink`]. Failures are logged and dropped: a missing bell
//! or a confetti glitch never interrupts the session.

use thiserror::Error;
use tracing::{debug, warn};

use valentine_types::{Effect, Intensity};

#[derive(Debug, Error)]
pub enum EffectError {
    #[error("feedback sound failed: {0}")]
    Sound(#[source] std::io::Error),
    #[error("celebration failed: {0}")]
    Celebrate(String),
}

/// Performs effect commands on behalf of the core.
pub trait EffectSink {
    fn play_feedback_sound(&mut self) -> Result<(), EffectError>;
    fn celebrate(&mut self, intensity: Intensity) -> Result<(), EffectError>;
}

/// Perform every effect in order, swallowing failures.
///
/// Returns the number of effects that failed.
pub fn dispatch_effects<I>(effects: I, sink: &mut dyn EffectSink) -> usize
where
    I: IntoIterator<Item = Effect>,
{
    let mut failures = 0;
    for effect in effects {
        let result = match effect {
            Effect::FeedbackSound => sink.play_feedback_sound(),
            Effect::Celebrate(intensity) => sink.celebrate(intensity),
        };
        match result {
            Ok(()) => debug!(?effect, "Effect performed"),
            Err(err) => {
                failures += 1;
                warn!(?effect, error = %err, "Effect failed; continuing");
            }
        }
    }
    failures
}
