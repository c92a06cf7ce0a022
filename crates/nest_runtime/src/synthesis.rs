//! Turns a batch of action outcomes into one reply for the user.

use nest_core::{ActionCall, ActionResult};

/// Reply used when there is nothing else to say.
pub const GENERIC_ACK: &str = "I processed your request. Let me know if you need anything else!";

const SILENT_ACTION: &str = "get_project_data";

/// Build the visible reply for a turn.
///
/// Successful actions become `✅` lines in call order, failures are listed
/// after them under a `❌ Failed operations:` heading. Successful
/// `get_project_data` calls are not shown. Falls back to `reply_text`, then
/// to [`GENERIC_ACK`], so the result is never empty.
pub fn synthesize(calls: &[ActionCall], results: &[ActionResult], reply_text: &str) -> String {
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();

    for (call, result) in calls.iter().zip(results) {
        if result.success {
            if let Some(line) = success_line(call, result) {
                succeeded.push(line);
            }
        } else {
            let error = result.error.as_deref().unwrap_or("Unknown error");
            failed.push(format!("• {}: {}", call.name, error));
        }
    }

    let mut out = succeeded.join("\n");
    if !failed.is_empty() {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str("❌ Failed operations:\n");
        out.push_str(&failed.join("\n"));
    }

    if out.is_empty() {
        out = reply_text.trim().to_string();
    }
    if out.is_empty() {
        out = GENERIC_ACK.to_string();
    }
    out
}

fn success_line(call: &ActionCall, result: &ActionResult) -> Option<String> {
    let list_name = result.list().map(|l| l.name.as_str());
    let task_title = result.task().map(|t| t.title.as_str());

    let line = match call.name.as_str() {
        SILENT_ACTION => return None,
        "create_list" => named("Created list", list_name),
        "update_list" => named("Updated list", list_name),
        "delete_list" => "✅ Deleted list".to_string(),
        "create_task" => named("Created task", task_title),
        "update_task" => named("Updated task", task_title),
        "delete_task" => "✅ Deleted task".to_string(),
        "move_task" => named("Moved task", task_title),
        other => format!("✅ {other} completed"),
    };
    Some(line)
}

fn named(verb: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("✅ {verb} \"{name}\""),
        None => format!("✅ {verb}"),
    }
}
