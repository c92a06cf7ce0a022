//! Command dispatch.

pub mod actions;
pub mod chat;
pub mod context;

use std::sync::Arc;

use anyhow::Result;
use nest_actions::{HttpProjectStore, InMemoryProjectStore, ProjectStore};
use nest_runtime::RuntimeConfig;

use crate::cli::{Cli, Command};

const OFFLINE_PROJECT: &str = "offline";

pub async fn handle(cli: Cli) -> Result<()> {
    let mut config = RuntimeConfig::from_env();
    if let Some(project) = cli.project {
        config = config.with_project(project);
    }
    let store = open_store(&mut config, cli.offline);

    match cli.command {
        Command::Chat { model, message } => {
            if let Some(model) = model {
                config = config.with_model(model);
            }
            chat::handle(config, store, message).await
        }
        Command::Actions { action } => actions::handle(&config, store, action).await,
        Command::Context => context::handle(&config, store).await,
    }
}

/// REST-backed store, or a seeded in-memory project with `--offline`.
fn open_store(config: &mut RuntimeConfig, offline: bool) -> Arc<dyn ProjectStore> {
    if offline {
        let project_uid = config.project_uid.get_or_insert_with(|| OFFLINE_PROJECT.to_string());
        let store = InMemoryProjectStore::new(project_uid.clone(), "Offline demo");
        for name in ["To Do", "In Progress", "Done"] {
            store.add_list(name);
        }
        tracing::debug!(project = %project_uid, "using in-memory project");
        return Arc::new(store);
    }

    let mut store = HttpProjectStore::new(&config.api_url);
    if let Some(token) = &config.api_token {
        store = store.with_token(token.clone());
    }
    Arc::new(store)
}
