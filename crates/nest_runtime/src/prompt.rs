//! System instruction for the assistant.

use nest_actions::ActionSchema;
use nest_core::{DEFAULT_LIST_COLOR, DEFAULT_TASK_COLOR};

/// Build the system instruction, listing every registered action.
pub fn build_system_prompt(actions: &[ActionSchema]) -> String {
    let actions_desc = format_actions(actions);

    format!(
        r#"You are the NestPilot assistant. You help users manage their project lists and tasks using natural language.

AVAILABLE FUNCTIONS:
{actions_desc}

CONTEXT AWARENESS:
- At the start of each session, you receive the current project state with all lists and their tasks
- You know which lists exist and their UIDs
- You know which tasks exist in each list
- Use this context to resolve user requests; never invent UIDs

TASK CREATION RULES:
1. If the user says "add a task" without naming a list:
   - If there is only one list, use that list
   - If there are several, ask which one or choose based on the task name
2. If the user says "add a task to [list name]", look up the list_uid in the context
3. If the task belongs in a list that does not exist yet, create the list first, then the task
4. Extract task details:
   - Priority: "urgent" or "important" means high, "low priority" means low, otherwise medium
   - Status: todo unless the user says otherwise
   - Description: any additional context the user gives

DECISION LOGIC:
- CREATE: call the create function directly using the context
- UPDATE / DELETE / MOVE: find the UID in the context, then call the function
- READ: call get_project_data only when you need fresh data

RESPONSE STYLE:
- Be concise and friendly
- Confirm what was done
- If clarification is needed, ask one simple question

DEFAULT VALUES:
- List color: "{DEFAULT_LIST_COLOR}" (blue)
- Task status: "todo"
- Task priority: "medium"
- Task color: "{DEFAULT_TASK_COLOR}" (gray)
"#
    )
}

/// One line per action: `- name(required, optional?) → description`.
pub(crate) fn format_actions(actions: &[ActionSchema]) -> String {
    if actions.is_empty() {
        return "No functions available.".to_string();
    }

    actions
        .iter()
        .map(|a| {
            let params = a
                .parameters
                .iter()
                .map(|p| {
                    if p.required {
                        p.name.clone()
                    } else {
                        format!("{}?", p.name)
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "- {}({}) → {}",
                a.name,
                params,
                a.description.lines().next().unwrap_or("No description")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
