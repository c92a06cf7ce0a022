//! Grounding context: the project state the model sees before the first
//! real user message.

use std::fmt::Write;

use nest_core::{List, ProjectSnapshot, Task};
use nest_llms::Message;

/// Fixed model reply that closes the grounding exchange.
pub const CONTEXT_ACK: &str = "I understand the current project structure. I can help you create lists and tasks, update them, or answer questions about the project.";

/// Render lists and their tasks with the identifiers the model must use.
///
/// Tasks are attached to lists by `list_uid`; tasks whose list is not in
/// `lists` are not rendered.
pub fn build_context(lists: &[List], tasks: &[Task]) -> String {
    let mut out = String::from("Here is the current state of the project:\n\n");

    if lists.is_empty() {
        out.push_str("No lists exist yet.\n");
    } else {
        let _ = writeln!(out, "Lists ({} total):", lists.len());
        for list in lists {
            let list_tasks: Vec<&Task> = tasks.iter().filter(|t| t.list_uid == list.list_uid).collect();
            let _ = writeln!(
                out,
                "- \"{}\" (UID: {}, Color: {}, {} tasks)",
                list.name,
                list.list_uid,
                list.color,
                list_tasks.len()
            );
            for task in list_tasks {
                let _ = writeln!(
                    out,
                    "  • \"{}\" (UID: {}, Status: {}, Priority: {})",
                    task.title, task.task_uid, task.status, task.priority
                );
            }
        }
    }

    out.push_str(
        "\nYou can help me create new lists and tasks, update existing ones, or answer questions about the project.",
    );
    out
}

/// The synthetic opening exchange: context as a user turn, then the fixed
/// acknowledgement as the model's reply.
pub fn grounding_exchange(snapshot: &ProjectSnapshot) -> Vec<Message> {
    vec![
        Message::user(build_context(&snapshot.lists, &snapshot.tasks)),
        Message::assistant(CONTEXT_ACK),
    ]
}
