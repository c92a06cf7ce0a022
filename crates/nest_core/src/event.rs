use serde::{Deserialize, Serialize};

use crate::action::{ActionCall, ActionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// User-facing toast. Delivery is best effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionEvent {
    ActionStart { call: ActionCall },

    ActionDone { call_id: String, result: ActionResult },

    Notification { notification: Notification },
}

impl ActionEvent {
    pub fn action_start(call: ActionCall) -> Self {
        ActionEvent::ActionStart { call }
    }

    pub fn action_done(call_id: impl Into<String>, result: ActionResult) -> Self {
        ActionEvent::ActionDone {
            call_id: call_id.into(),
            result,
        }
    }

    pub fn notification(notification: Notification) -> Self {
        ActionEvent::Notification { notification }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_notification_constructors() {
        let ok = Notification::success("List created", "Created list \"QA\"");
        assert_eq!(ok.level, NotificationLevel::Success);
        let err = Notification::error("Error", "connection refused");
        assert_eq!(err.level, NotificationLevel::Error);
        assert_eq!(err.description, "connection refused");
    }

    #[test]
    fn test_action_start_event() {
        let event = ActionEvent::action_start(ActionCall::new("create_list", json!({})));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"action_start"#));
        assert!(json.contains("create_list"));
    }

    #[test]
    fn test_notification_event() {
        let event = ActionEvent::notification(Notification::success("Task deleted", "done"));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"notification"#));
        assert!(json.contains(r#""level":"success"#));
    }
}
