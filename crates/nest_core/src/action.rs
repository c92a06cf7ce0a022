use serde::{Deserialize, Serialize};

use crate::entity::{List, ProjectSnapshot, Task};

/// A model-proposed action. Arguments stay untyped until the dispatcher
/// validates them against the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

impl ActionCall {
    pub fn new(name: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            id: format!("call_{}", uuid::Uuid::new_v4()),
            name: name.into(),
            args,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Entity returned by a successful action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entity", rename_all = "snake_case")]
pub enum ActionPayload {
    List(List),
    Task(Task),
    Project(ProjectSnapshot),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ActionPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResult {
    pub fn success(data: Option<ActionPayload>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn list(&self) -> Option<&List> {
        match &self.data {
            Some(ActionPayload::List(list)) => Some(list),
            _ => None,
        }
    }

    pub fn task(&self) -> Option<&Task> {
        match &self.data {
            Some(ActionPayload::Task(task)) => Some(task),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<&ProjectSnapshot> {
        match &self.data {
            Some(ActionPayload::Project(snapshot)) => Some(snapshot),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_call_new_assigns_id() {
        let call = ActionCall::new("create_list", json!({"name": "QA"}));
        assert!(call.id.starts_with("call_"));
        assert_eq!(call.name, "create_list");
        assert_eq!(call.args["name"], "QA");
    }

    #[test]
    fn test_action_call_with_id() {
        let call = ActionCall::new("delete_task", json!({})).with_id("c-1");
        assert_eq!(call.id, "c-1");
    }

    #[test]
    fn test_failure_serialization_omits_empty_fields() {
        let result = ActionResult::failure("Unknown function: archive_list");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            json!({"success": false, "error": "Unknown function: archive_list"})
        );
    }

    #[test]
    fn test_payload_tagging() {
        let list: List = serde_json::from_value(json!({
            "list_uid": "l1", "project_uid": "p1", "name": "QA"
        }))
        .unwrap();
        let result = ActionResult::success(Some(ActionPayload::List(list)), "Created list \"QA\"");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["data"]["kind"], "list");
        assert_eq!(json["data"]["entity"]["name"], "QA");
        assert_eq!(result.list().unwrap().list_uid, "l1");
        assert!(result.task().is_none());
    }
}
