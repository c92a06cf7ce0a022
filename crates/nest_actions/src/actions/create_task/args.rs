use nest_core::{Priority, TaskStatus};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateTaskArgs {
    pub list_uid: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub priority: Option<Priority>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub color: Option<String>,

    /// ISO date, `YYYY-MM-DD`.
    #[serde(default)]
    pub due_date: Option<String>,
}
