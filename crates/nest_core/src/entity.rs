use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIST_COLOR: &str = "#3B82F6";
pub const DEFAULT_TASK_COLOR: &str = "#6B7280";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_uid: String,
    pub list_uid: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_task_color")]
    pub color: String,
    #[serde(default)]
    pub position: i64,
    /// ISO date (`YYYY-MM-DD`) as stored by the project API.
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub list_uid: String,
    pub project_uid: String,
    pub name: String,
    #[serde(default = "default_list_color")]
    pub color: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_uid: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub lists: Vec<List>,
}

/// Flattened view of a project: its lists and every task they contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub project: Project,
    pub lists: Vec<List>,
    pub tasks: Vec<Task>,
}

impl ProjectSnapshot {
    pub fn tasks_in<'a>(&'a self, list_uid: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.list_uid == list_uid)
    }

    pub fn find_task(&self, task_uid: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.task_uid == task_uid)
    }

    pub fn find_list(&self, list_uid: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.list_uid == list_uid)
    }
}

impl From<Project> for ProjectSnapshot {
    fn from(project: Project) -> Self {
        let lists = project.lists.clone();
        let tasks = lists.iter().flat_map(|l| l.tasks.iter().cloned()).collect();
        Self {
            project,
            lists,
            tasks,
        }
    }
}

fn default_list_color() -> String {
    DEFAULT_LIST_COLOR.to_string()
}

fn default_task_color() -> String {
    DEFAULT_TASK_COLOR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_project() -> Project {
        serde_json::from_value(json!({
            "project_uid": "p1",
            "name": "Website",
            "lists": [
                {
                    "list_uid": "l1",
                    "project_uid": "p1",
                    "name": "Backend",
                    "tasks": [
                        { "task_uid": "t1", "list_uid": "l1", "title": "Auth", "priority": "high" }
                    ]
                },
                { "list_uid": "l2", "project_uid": "p1", "name": "Frontend", "color": "#10B981" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_defaults_applied_on_deserialize() {
        let project = sample_project();
        assert_eq!(project.lists[0].color, DEFAULT_LIST_COLOR);
        let task = &project.lists[0].tasks[0];
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.color, DEFAULT_TASK_COLOR);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_snapshot_flattens_tasks() {
        let snapshot = ProjectSnapshot::from(sample_project());
        assert_eq!(snapshot.lists.len(), 2);
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(snapshot.tasks_in("l1").count(), 1);
        assert_eq!(snapshot.tasks_in("l2").count(), 0);
        assert!(snapshot.find_task("t1").is_some());
        assert_eq!(snapshot.find_list("l2").unwrap().color, "#10B981");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            r#""in_progress""#
        );
        assert_eq!(TaskStatus::Completed.to_string(), "completed");
        assert_eq!(Priority::Low.to_string(), "low");
    }
}
