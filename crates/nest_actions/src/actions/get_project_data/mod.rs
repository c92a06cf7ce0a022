use crate::actions::{Action, ActionContext, ActionOutcome, ActionOutput};
use crate::registry::{parse_action_schema, ActionSchema};
use async_trait::async_trait;
use nest_core::{ActionPayload, ProjectSnapshot};
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

/// Fetches the whole project. The only action whose result may refresh a
/// session's cached snapshot.
pub struct GetProjectData;

fn schema() -> &'static ActionSchema {
    static SCHEMA: OnceLock<ActionSchema> = OnceLock::new();
    SCHEMA.get_or_init(|| parse_action_schema(include_str!("schema.json")))
}

#[async_trait]
impl Action for GetProjectData {
    fn schema(&self) -> &ActionSchema {
        schema()
    }

    fn notice(&self) -> Option<&'static str> {
        None
    }

    async fn execute(&self, _args: JsonValue, ctx: &ActionContext<'_>) -> ActionOutcome {
        let snapshot = ProjectSnapshot::from(ctx.store.fetch_project(ctx.project_uid).await?);
        let message = format!(
            "Loaded {} lists and {} tasks",
            snapshot.lists.len(),
            snapshot.tasks.len()
        );
        Ok(ActionOutput::new(Some(ActionPayload::Project(snapshot)), message))
    }
}
