//! `nestpilot chat`: interactive session on stdin.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use console::style;
use nest_actions::{ActionBus, ChannelNotifier, ProjectStore};
use nest_core::ActionEvent;
use nest_runtime::{Orchestrator, RuntimeConfig, RuntimeError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::output;

pub async fn handle(
    config: RuntimeConfig,
    store: Arc<dyn ProjectStore>,
    message: Option<String>,
) -> Result<()> {
    let project_uid = config.require_project()?.to_string();

    let (tx, mut events) = mpsc::channel(64);
    let bus = ActionBus::new(project_uid, store)
        .with_notifier(Arc::new(ChannelNotifier::new(tx.clone())))
        .with_events(tx);
    let orchestrator = Orchestrator::from_config(config, bus)?;

    let spinner = output::spinner("Loading project...");
    let grounded = orchestrator.initialize_session().await;
    output::spinner_done(&spinner);
    if let Err(e) = grounded {
        output::warning(&format!("Continuing without project context: {e}"));
    }

    if let Some(message) = message {
        return turn(&orchestrator, &mut events, &message).await;
    }

    output::assistant(&orchestrator.welcome_message());
    output::dim("Type 'exit' to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }
        turn(&orchestrator, &mut events, line).await?;
    }

    Ok(())
}

fn prompt() {
    if output::is_json() {
        return;
    }
    print!("{} ", style("you ›").cyan().bold());
    let _ = std::io::stdout().flush();
}

async fn turn(
    orchestrator: &Orchestrator,
    events: &mut mpsc::Receiver<ActionEvent>,
    text: &str,
) -> Result<()> {
    let spinner = output::spinner("Thinking...");
    let reply = pump_events(orchestrator.handle_user_message(text), events, |event| {
        spinner.suspend(|| show(event))
    })
    .await;
    output::spinner_done(&spinner);

    while let Ok(event) = events.try_recv() {
        show(event);
    }
    match reply {
        Ok(message) => output::assistant(&message),
        Err(RuntimeError::EmptyMessage) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Drive `turn` to completion, handing each event to `on_event` as it
/// arrives so the bounded channel never fills up during a long batch.
async fn pump_events<F: Future>(
    turn: F,
    events: &mut mpsc::Receiver<ActionEvent>,
    mut on_event: impl FnMut(ActionEvent),
) -> F::Output {
    tokio::pin!(turn);
    loop {
        tokio::select! {
            biased;
            Some(event) = events.recv() => on_event(event),
            output = &mut turn => return output,
        }
    }
}

fn show(event: ActionEvent) {
    match event {
        ActionEvent::ActionStart { call } => {
            output::dim(&format!("→ {} {}", call.name, call.args));
        }
        ActionEvent::Notification { notification } => output::notification(&notification),
        ActionEvent::ActionDone { .. } => {}
    }
}
