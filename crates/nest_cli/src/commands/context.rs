//! `nestpilot context`: show what the model is told about the project.

use std::sync::Arc;

use anyhow::Result;
use nest_actions::ProjectStore;
use nest_core::ProjectSnapshot;
use nest_runtime::{RuntimeConfig, build_context};

use crate::output;

pub async fn handle(config: &RuntimeConfig, store: Arc<dyn ProjectStore>) -> Result<()> {
    let project_uid = config.require_project()?;

    let spinner = output::spinner("Loading project...");
    let project = store.fetch_project(project_uid).await;
    output::spinner_done(&spinner);

    let snapshot = ProjectSnapshot::from(project?);
    if output::is_json() {
        output::data("snapshot", &snapshot);
    } else {
        output::header(&format!("Project: {}", snapshot.project.name));
        println!("{}", build_context(&snapshot.lists, &snapshot.tasks));
    }
    Ok(())
}
