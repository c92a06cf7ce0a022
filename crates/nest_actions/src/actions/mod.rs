pub mod create_list;
pub mod create_task;
pub mod delete_list;
pub mod delete_task;
pub mod get_project_data;
pub mod move_task;
pub mod update_list;
pub mod update_task;

use std::sync::Arc;

use async_trait::async_trait;
use nest_core::ActionPayload;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::ActionError;
use crate::registry::ActionSchema;
use crate::store::ProjectStore;

pub use create_list::{CreateList, CreateListArgs};
pub use create_task::{CreateTask, CreateTaskArgs};
pub use delete_list::{DeleteList, DeleteListArgs};
pub use delete_task::{DeleteTask, DeleteTaskArgs};
pub use get_project_data::GetProjectData;
pub use move_task::{MoveTask, MoveTaskArgs};
pub use update_list::{UpdateList, UpdateListArgs};
pub use update_task::{UpdateTask, UpdateTaskArgs};

/// What an action sees of the outside world.
pub struct ActionContext<'a> {
    pub project_uid: &'a str,
    pub store: &'a dyn ProjectStore,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutput {
    pub payload: Option<ActionPayload>,
    pub message: String,
}

impl ActionOutput {
    pub fn new(payload: Option<ActionPayload>, message: impl Into<String>) -> Self {
        Self {
            payload,
            message: message.into(),
        }
    }
}

pub type ActionOutcome = Result<ActionOutput, ActionError>;

#[async_trait]
pub trait Action: Send + Sync {
    fn schema(&self) -> &ActionSchema;

    fn name(&self) -> &str {
        &self.schema().name
    }

    /// Title of the notification raised on success. `None` marks a
    /// read-only action that stays quiet.
    fn notice(&self) -> Option<&'static str>;

    /// Run with arguments already validated against [`Action::schema`].
    async fn execute(&self, args: JsonValue, ctx: &ActionContext<'_>) -> ActionOutcome;
}

pub fn builtin() -> Vec<Arc<dyn Action>> {
    vec![
        Arc::new(CreateList),
        Arc::new(UpdateList),
        Arc::new(DeleteList),
        Arc::new(CreateTask),
        Arc::new(UpdateTask),
        Arc::new(DeleteTask),
        Arc::new(MoveTask),
        Arc::new(GetProjectData),
    ]
}

pub(crate) fn parse_args<T: DeserializeOwned>(args: JsonValue) -> Result<T, ActionError> {
    let args = if args.is_null() {
        JsonValue::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ActionError::InvalidArguments(e.to_string()))
}

/// Model-supplied numbers may arrive as floats.
pub(crate) fn to_position(value: Option<f64>) -> Option<i64> {
    value.filter(|v| v.is_finite()).map(|v| v.round() as i64)
}
