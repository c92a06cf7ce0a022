use nest_core::{Priority, TaskStatus};
use serde::Deserialize;

use crate::store::TaskPatch;

#[derive(Debug, Deserialize)]
pub struct UpdateTaskArgs {
    pub task_uid: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub priority: Option<Priority>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub color: Option<String>,

    /// Absent leaves the date alone, `null` clears it.
    #[serde(default, deserialize_with = "nest_core::patch::double_option")]
    pub due_date: Option<Option<String>>,

    #[serde(default)]
    pub is_completed: Option<bool>,
}

impl UpdateTaskArgs {
    pub fn into_patch(self) -> (String, TaskPatch) {
        let patch = TaskPatch {
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            color: self.color,
            due_date: self.due_date,
            is_completed: self.is_completed,
        };
        (self.task_uid, patch)
    }
}
