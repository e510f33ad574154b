//! Config file loading into session settings.

use std::io::Write;
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;
use valentine_engine::{App, ConfigError, SessionSettings, Stage, ValentineConfig};

use crate::common::ms;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn config_file_drives_the_session() {
    let file = write_config(
        r#"
[app]
ascii_only = true
sound = false

[timing]
loading_ms = 1200
message_interval_ms = 400

[content]
recipient = "Ada"
route_distance_km = 12
loading_messages = ["a", "b", "c"]
"#,
    );
    let config = ValentineConfig::load_from(file.path()).unwrap();
    let settings = SessionSettings::from_config(Some(&config));
    assert!(settings.ui.ascii_only);
    assert!(!settings.ui.sound);
    assert_eq!(settings.reveal_delay, Duration::from_millis(1200));

    let start = Instant::now();
    let mut app = App::new(settings);
    app.open();
    app.advance_at(start);
    app.tick_at(start + ms(800));
    assert_eq!(app.loading_message(), "c");
    app.tick_at(start + ms(1200));
    assert_eq!(app.stage(), Stage::Asking);
    assert_eq!(app.recipient(), "Ada");
    assert_eq!(app.route_distance_km(), 12);
}

#[test]
fn unusable_values_fall_back_to_defaults() {
    let file = write_config(
        r#"
[timing]
loading_ms = 0

[content]
recipient = "   "
loading_messages = []
"#,
    );
    let config = ValentineConfig::load_from(file.path()).unwrap();
    let settings = SessionSettings::from_config(Some(&config));
    assert_eq!(settings, SessionSettings::default());
}

#[test]
fn malformed_config_reports_its_path() {
    let file = write_config("[app\nascii_only = true");
    let err = ValentineConfig::load_from(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), file.path());
}
