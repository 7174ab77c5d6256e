use crate::model::Tone;
use serde::{Deserialize, Serialize};

/// User-triggered commands. Every action is total: it always produces a
/// last-action message and at most one activity entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", content = "section", rename_all = "snake_case")]
pub enum Action {
    SelectSection(String),
    TriggerPulse,
    LaunchScan,
    SyncNodes,
    GenerateReport,
    ViewAll,
}

impl Action {
    pub fn select_section(name: impl Into<String>) -> Self {
        Action::SelectSection(name.into())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectSection(_) => "select_section",
            Action::TriggerPulse => "trigger_pulse",
            Action::LaunchScan => "launch_scan",
            Action::SyncNodes => "sync_nodes",
            Action::GenerateReport => "generate_report",
            Action::ViewAll => "view_all",
        }
    }

    pub fn last_action_message(&self) -> String {
        match self {
            Action::SelectSection(section) => format!("Switched to {section}."),
            Action::TriggerPulse => "Pulse broadcast initiated.".to_string(),
            Action::LaunchScan => "Neural scan launched.".to_string(),
            Action::SyncNodes => "Node sync scheduled.".to_string(),
            Action::GenerateReport => "Report compiled and shared.".to_string(),
            Action::ViewAll => "Opened full mission log.".to_string(),
        }
    }

    pub fn activity(&self) -> Option<(&'static str, Tone)> {
        match self {
            Action::SelectSection(_) => None,
            Action::TriggerPulse => Some(("Pulse broadcasted", Tone::Success)),
            Action::LaunchScan => Some(("Neural scan running", Tone::Info)),
            Action::SyncNodes => Some(("Node sync queued", Tone::Info)),
            Action::GenerateReport => Some(("Report compiled", Tone::Success)),
            Action::ViewAll => Some(("Mission log opened", Tone::Info)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_section_has_message_and_no_activity() {
        let action = Action::select_section("Markets");
        assert_eq!(action.last_action_message(), "Switched to Markets.");
        assert_eq!(action.activity(), None);
    }

    #[test]
    fn handler_table_is_stable() {
        let cases = [
            (
                Action::TriggerPulse,
                "Pulse broadcast initiated.",
                ("Pulse broadcasted", Tone::Success),
            ),
            (
                Action::LaunchScan,
                "Neural scan launched.",
                ("Neural scan running", Tone::Info),
            ),
            (
                Action::SyncNodes,
                "Node sync scheduled.",
                ("Node sync queued", Tone::Info),
            ),
            (
                Action::GenerateReport,
                "Report compiled and shared.",
                ("Report compiled", Tone::Success),
            ),
            (
                Action::ViewAll,
                "Opened full mission log.",
                ("Mission log opened", Tone::Info),
            ),
        ];
        for (action, message, activity) in cases {
            assert_eq!(action.last_action_message(), message, "{}", action.name());
            assert_eq!(action.activity(), Some(activity), "{}", action.name());
        }
    }

    #[test]
    fn actions_serialize_with_tag() {
        let json = serde_json::to_value(Action::select_section("Missions")).expect("serialize");
        assert_eq!(json["action"], "select_section");
        assert_eq!(json["section"], "Missions");
        let json = serde_json::to_value(Action::TriggerPulse).expect("serialize");
        assert_eq!(json["action"], "trigger_pulse");
    }
}
