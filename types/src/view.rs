//! Presentation values derived purely from escalation state.
//!
//! Nothing in here keeps hidden state: every function is a lookup or a closed-form
//! expression of its arguments, so renderers may call them as often as they like.

use crate::{EscalationLevel, EscalationState};

const ACCEPT_SHRINK_FACTOR: f64 = 0.7;
const ACCEPT_SCALE_FLOOR: f64 = 0.1;
const DECLINE_GROWTH_FACTOR: f64 = 1.3;
const DECLINE_SCALE_CAP: f64 = 5.0;

/// Visual size factor of the accept control.
///
/// `1.0` unless hostile, then `max(0.1, 0.7^attempts)`.
#[must_use]
pub fn accept_emphasis_scale(state: &EscalationState) -> f64 {
    if !state.level.is_hostile() {
        return 1.0;
    }
    ACCEPT_SHRINK_FACTOR
        .powi(saturating_exponent(state.hostile_confirm_attempts))
        .max(ACCEPT_SCALE_FLOOR)
}

/// Visual size factor of the decline control.
///
/// `1.0` unless hostile, then `min(5.0, 1.3^attempts)`.
#[must_use]
pub fn decline_emphasis_scale(state: &EscalationState) -> f64 {
    if !state.level.is_hostile() {
        return 1.0;
    }
    DECLINE_GROWTH_FACTOR
        .powi(saturating_exponent(state.hostile_confirm_attempts))
        .min(DECLINE_SCALE_CAP)
}

fn saturating_exponent(attempts: u32) -> i32 {
    i32::try_from(attempts).unwrap_or(i32::MAX)
}

/// Headline shown above the two controls.
#[must_use]
pub fn prompt_text(level: EscalationLevel, recipient: &str) -> String {
    match level {
        EscalationLevel::Calm => {
            format!("$ gh pr create --title \"Will you be my Valentine?\" --body \"{recipient}\"")
        }
        EscalationLevel::Pleading => "Please?".to_string(),
        EscalationLevel::Hostile => "Do you hate me?".to_string(),
    }
}

#[must_use]
pub const fn accept_label(level: EscalationLevel) -> &'static str {
    match level {
        EscalationLevel::Calm => "Open PR",
        EscalationLevel::Pleading | EscalationLevel::Hostile => "Yes",
    }
}

#[must_use]
pub const fn decline_label(level: EscalationLevel) -> &'static str {
    match level {
        EscalationLevel::Calm => "Close PR",
        EscalationLevel::Pleading | EscalationLevel::Hostile => "No",
    }
}

/// Whether the accept control may show its hover/focus highlight.
#[must_use]
pub const fn accept_highlight_enabled(level: EscalationLevel) -> bool {
    !level.is_hostile()
}

/// Severity used to color the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub tone: Tone,
    pub text: String,
}

/// The `status --check-affection` line under the controls.
#[must_use]
pub fn status_line(
    level: EscalationLevel,
    hostile_confirm_attempts: u32,
    recipient: &str,
) -> StatusLine {
    match level {
        EscalationLevel::Calm => StatusLine {
            tone: Tone::Neutral,
            text: format!("Awaiting peer review from {recipient}..."),
        },
        EscalationLevel::Pleading => StatusLine {
            tone: Tone::Warning,
            text: "WARNING: Peer review is taking too long.".to_string(),
        },
        EscalationLevel::Hostile => {
            let mut text = "CRITICAL: Logic trap active.".to_string();
            if hostile_confirm_attempts > 0 {
                text.push_str(&format!(" Attempts: {hostile_confirm_attempts}"));
            }
            StatusLine {
                tone: Tone::Critical,
                text,
            }
        }
    }
}

/// Footer on the accepted page, present only if the user ever refused.
#[must_use]
pub fn compilation_errors_line(refusal_count: u32) -> Option<String> {
    (refusal_count > 0).then(|| format!("// Compilation errors: {refusal_count}"))
}
