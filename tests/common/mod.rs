//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::time::{Duration, Instant};

use valentine_engine::{App, EffectError, EffectSink, Intensity, SessionSettings, Stage};

/// What a [`RecordingSink`] was asked to do, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Played {
    Sound,
    Confetti(Intensity),
}

/// Effect sink that records every request and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub played: Vec<Played>,
    pub fail_sound: bool,
}

impl EffectSink for RecordingSink {
    fn play_feedback_sound(&mut self) -> Result<(), EffectError> {
        self.played.push(Played::Sound);
        if self.fail_sound {
            return Err(EffectError::Sound(std::io::Error::other("no audio device")));
        }
        Ok(())
    }

    fn celebrate(&mut self, intensity: Intensity) -> Result<(), EffectError> {
        self.played.push(Played::Confetti(intensity));
        Ok(())
    }
}

/// Drive a fresh session to `Asking` using the default reveal delay.
pub fn asking_app(start: Instant) -> App {
    asking_app_with(SessionSettings::default(), start)
}

pub fn asking_app_with(settings: SessionSettings, start: Instant) -> App {
    let reveal = settings.reveal_delay;
    let mut app = App::new(settings);
    app.open();
    app.advance_at(start);
    app.tick_at(start + reveal);
    assert_eq!(app.stage(), Stage::Asking);
    app
}

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}
