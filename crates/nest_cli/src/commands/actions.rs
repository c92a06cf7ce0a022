//! `nestpilot actions` subcommands.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use nest_actions::{ActionBus, ProjectStore};
use nest_core::ActionCall;
use nest_runtime::RuntimeConfig;
use serde_json::{Value as JsonValue, json};

use crate::cli::ActionsAction;
use crate::output;

pub async fn handle(
    config: &RuntimeConfig,
    store: Arc<dyn ProjectStore>,
    action: ActionsAction,
) -> Result<()> {
    let project_uid = config.project_uid.clone().unwrap_or_default();
    let bus = ActionBus::new(project_uid, store);

    match action {
        ActionsAction::List => list(&bus),
        ActionsAction::Info { name } => info(&bus, &name),
        ActionsAction::Call { name, args } => {
            config.require_project()?;
            call(&bus, &name, &args).await
        }
    }
}

fn list(bus: &ActionBus) -> Result<()> {
    let schemas = bus.registry().schemas();

    output::header("Registered Actions");

    let mut table = output::table();
    output::table_header(&mut table, &["Action", "Required", "Description"]);

    let items: Vec<JsonValue> = schemas
        .iter()
        .map(|s| {
            let required: Vec<&str> = s.required().map(|p| p.name.as_str()).collect();
            let joined = required.join(", ");
            output::table_row(&mut table, &s.name, &[joined.as_str(), s.description.as_str()]);
            json!({ "name": s.name, "required": required, "description": s.description })
        })
        .collect();

    output::table_print(&table, &items);
    Ok(())
}

fn info(bus: &ActionBus, name: &str) -> Result<()> {
    let action = bus
        .list_actions()
        .into_iter()
        .find(|a| a.name == name)
        .ok_or_else(|| anyhow!("Unknown function: {name}"))?;

    if output::is_json() {
        output::data("action", &action);
        return Ok(());
    }

    output::header(&format!("Action: {}", action.name));
    output::dim(&action.description);
    println!();
    output::header("Parameters");
    output::json_pretty(&action.parameters);
    Ok(())
}

async fn call(bus: &ActionBus, name: &str, args_str: &str) -> Result<()> {
    let args: JsonValue =
        serde_json::from_str(args_str).map_err(|e| anyhow!("Invalid JSON arguments: {e}"))?;

    let spinner = output::spinner(&format!("Calling {name}..."));
    let result = bus.dispatch(&ActionCall::new(name, args)).await;
    output::spinner_done(&spinner);

    output::data("result", &result);

    if result.success {
        output::success(result.message.as_deref().unwrap_or("Done"));
        Ok(())
    } else {
        Err(anyhow!(
            "{name}: {}",
            result.error.as_deref().unwrap_or("Unknown error")
        ))
    }
}
