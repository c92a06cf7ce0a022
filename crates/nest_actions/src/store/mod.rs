//! Project-data collaborator: the API that actually owns lists and tasks.

mod error;
mod http;
mod memory;

pub use error::StoreError;
pub use http::HttpProjectStore;
pub use memory::{InMemoryProjectStore, StoreOp};

use async_trait::async_trait;
use nest_core::{List, Priority, Project, Task, TaskStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewList {
    pub project_uid: String,
    pub name: String,
    pub color: String,
    /// `None` appends the list after the existing ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

/// Partial list update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

impl ListPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.position.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub list_uid: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

/// Partial task update.
///
/// `due_date` distinguishes "leave alone" (`None`) from "clear"
/// (`Some(None)`), which serializes as an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(
        default,
        deserialize_with = "nest_core::patch::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.color.is_none()
            && self.due_date.is_none()
            && self.is_completed.is_none()
    }

    /// Apply the supplied fields onto `task`.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(color) = &self.color {
            task.color = color.clone();
        }
        if let Some(due_date) = &self.due_date {
            task.due_date = due_date.clone();
        }
        if let Some(is_completed) = self.is_completed {
            task.is_completed = is_completed;
        }
    }
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Project with its lists and their tasks nested.
    async fn fetch_project(&self, project_uid: &str) -> Result<Project, StoreError>;

    async fn create_list(&self, list: NewList) -> Result<List, StoreError>;

    async fn update_list(&self, list_uid: &str, patch: ListPatch) -> Result<List, StoreError>;

    /// Removes the list and every task in it.
    async fn delete_list(&self, list_uid: &str) -> Result<(), StoreError>;

    async fn create_task(&self, task: NewTask) -> Result<Task, StoreError>;

    async fn update_task(&self, task_uid: &str, patch: TaskPatch) -> Result<Task, StoreError>;

    async fn delete_task(&self, task_uid: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_patch_serializes_only_supplied_fields() {
        let patch = TaskPatch {
            title: Some("Ship it".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"title": "Ship it"}));
    }

    #[test]
    fn test_task_patch_clear_due_date_sends_null() {
        let patch = TaskPatch {
            due_date: Some(None),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"due_date": null}));
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_new_list_omits_position_when_unset() {
        let list = NewList {
            project_uid: "p1".to_string(),
            name: "QA".to_string(),
            color: nest_core::DEFAULT_LIST_COLOR.to_string(),
            position: None,
        };
        let value = serde_json::to_value(&list).unwrap();
        assert!(value.get("position").is_none());
        assert_eq!(value["color"], "#3B82F6");
    }

    #[test]
    fn test_apply_patch_leaves_other_fields() {
        let mut task: Task = serde_json::from_value(json!({
            "task_uid": "t1",
            "list_uid": "l1",
            "title": "Auth",
            "description": "JWT",
            "due_date": "2025-03-01"
        }))
        .unwrap();

        TaskPatch {
            due_date: Some(None),
            ..Default::default()
        }
        .apply(&mut task);

        assert_eq!(task.due_date, None);
        assert_eq!(task.title, "Auth");
        assert_eq!(task.description, "JWT");
    }
}
