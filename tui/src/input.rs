//! Input handling for Valentine TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use valentine_engine::{App, Stage};

use crate::state::{Focus, ViewState};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 256; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads crossterm events on a blocking thread and hands them to the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close first so a backpressured send in the input thread unblocks.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain pending input into `app`. Returns `true` once the session should end.
pub fn handle_events(app: &mut App, ui: &mut ViewState, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, ui, &ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Route one terminal event to the operation it stands for in the current stage.
pub fn apply_event(app: &mut App, ui: &mut ViewState, event: &Event) -> bool {
    let Event::Key(key) = event else {
        return app.should_quit();
    };
    if matches!(key.kind, KeyEventKind::Release) {
        return app.should_quit();
    }

    if is_quit(key) {
        app.request_quit();
        return true;
    }

    let stage = app.stage();
    match stage {
        Stage::Envelope => match key.code {
            KeyCode::Enter | KeyCode::Char(' ' | 'o') => app.open(),
            KeyCode::Char('h') => app.acknowledge_envelope(),
            _ => {}
        },
        Stage::Intro => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ' | 'c')) {
                app.advance();
            }
        }
        Stage::Loading => {}
        Stage::Asking => handle_asking(app, ui, key),
        Stage::Accepted => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('v')) {
                app.view_note();
            }
        }
        Stage::Note => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Enter | KeyCode::Char('b')
            ) {
                app.return_from_note();
            }
        }
    }

    if app.stage() != stage {
        debug!(from = %stage, to = %app.stage(), "Key changed stage");
    }
    app.should_quit()
}

fn handle_asking(app: &mut App, ui: &mut ViewState, key: &KeyEvent) {
    match key.code {
        KeyCode::Char('y') => app.confirm(),
        KeyCode::Char('n') => app.refuse(),
        KeyCode::Left => ui.focus = Focus::Accept,
        KeyCode::Right => ui.focus = Focus::Decline,
        KeyCode::Tab | KeyCode::BackTab => ui.focus = ui.focus.toggle(),
        KeyCode::Enter | KeyCode::Char(' ') => match ui.focus {
            Focus::Accept => app.confirm(),
            Focus::Decline => app.refuse(),
        },
        _ => {}
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use valentine_engine::{App, Effect, EscalationLevel, Intensity, Stage};

    use super::apply_event;
    use crate::state::{Focus, ViewState};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn asking_app() -> App {
        let start = Instant::now();
        let mut app = App::default();
        app.open();
        app.advance_at(start);
        app.tick_at(start + Duration::from_secs(5));
        assert_eq!(app.stage(), Stage::Asking);
        app
    }

    #[test]
    fn envelope_keys_open_and_acknowledge() {
        let mut app = App::default();
        let mut ui = ViewState::new();

        assert!(!apply_event(&mut app, &mut ui, &press(KeyCode::Char('h'))));
        assert_eq!(app.stage(), Stage::Envelope);
        assert_eq!(app.take_effects(), vec![Effect::Celebrate(Intensity::Low)]);

        apply_event(&mut app, &mut ui, &press(KeyCode::Enter));
        assert_eq!(app.stage(), Stage::Intro);
        apply_event(&mut app, &mut ui, &press(KeyCode::Char('c')));
        assert_eq!(app.stage(), Stage::Loading);
    }

    #[test]
    fn loading_ignores_keys() {
        let mut app = App::default();
        let mut ui = ViewState::new();
        app.open();
        app.advance();
        apply_event(&mut app, &mut ui, &press(KeyCode::Enter));
        apply_event(&mut app, &mut ui, &press(KeyCode::Char('y')));
        assert_eq!(app.stage(), Stage::Loading);
    }

    #[test]
    fn focused_button_receives_enter() {
        let mut app = asking_app();
        let mut ui = ViewState::new();

        apply_event(&mut app, &mut ui, &press(KeyCode::Tab));
        assert_eq!(ui.focus, Focus::Decline);
        apply_event(&mut app, &mut ui, &press(KeyCode::Enter));
        assert_eq!(app.snapshot().escalation.level, EscalationLevel::Pleading);

        apply_event(&mut app, &mut ui, &press(KeyCode::Left));
        apply_event(&mut app, &mut ui, &press(KeyCode::Enter));
        assert_eq!(app.stage(), Stage::Accepted);
    }

    #[test]
    fn note_round_trip_by_keys() {
        let mut app = asking_app();
        let mut ui = ViewState::new();
        apply_event(&mut app, &mut ui, &press(KeyCode::Char('y')));
        apply_event(&mut app, &mut ui, &press(KeyCode::Char('v')));
        assert_eq!(app.stage(), Stage::Note);
        apply_event(&mut app, &mut ui, &press(KeyCode::Esc));
        assert_eq!(app.stage(), Stage::Accepted);
    }

    #[test]
    fn releases_are_ignored() {
        let mut app = App::default();
        let mut ui = ViewState::new();
        let release = Event::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
        });
        apply_event(&mut app, &mut ui, &release);
        assert_eq!(app.stage(), Stage::Envelope);
    }

    #[test]
    fn quit_keys_work_in_every_stage() {
        let mut app = asking_app();
        let mut ui = ViewState::new();
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(apply_event(&mut app, &mut ui, &ctrl_c));
        assert!(app.should_quit());

        let mut app = App::default();
        assert!(apply_event(&mut app, &mut ui, &press(KeyCode::Char('q'))));
    }
}
