//! Read-only state handed across the render boundary.

use serde::{Deserialize, Serialize};

use crate::{EscalationState, Stage};

/// Everything the presentation layer needs to draw a frame.
///
/// `escalation` is zeroed until the session first reaches `Asking` and frozen
/// once it leaves. `loading_message_index` only moves while `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub stage: Stage,
    pub escalation: EscalationState,
    pub loading_message_index: usize,
}

#[cfg(test)]
mod tests {
    use super::Snapshot;
    use crate::{EscalationLevel, EscalationState, Stage};

    #[test]
    fn serializes_with_snake_case_names() {
        let snapshot = Snapshot {
            stage: Stage::Asking,
            escalation: EscalationState {
                level: EscalationLevel::Hostile,
                refusal_count: 3,
                hostile_confirm_attempts: 1,
            },
            loading_message_index: 6,
        };
        let json = serde_json::to_value(snapshot).unwrap();
        assert_eq!(json["stage"], "asking");
        assert_eq!(json["escalation"]["level"], "hostile");
        assert_eq!(json["escalation"]["refusal_count"], 3);
        assert_eq!(json["loading_message_index"], 6);
    }

    #[test]
    fn default_snapshot_is_a_fresh_session() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.stage, Stage::Envelope);
        assert_eq!(snapshot.escalation, EscalationState::default());
        assert_eq!(snapshot.loading_message_index, 0);
    }
}
