mod common;

use common::{calls, orchestrator, seeded_store, text, Step, PROJECT};
use nest_actions::{ActionBus, InMemoryProjectStore, StoreOp};
use nest_core::{MessageStatus, Role};
use nest_llms::ContentPart;
use nest_runtime::{
    Orchestrator, RuntimeConfig, RuntimeError, CONTEXT_ACK, ERROR_REPLY, GENERIC_ACK,
    TIMEOUT_REPLY,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_text_reply_produces_one_assistant_message() -> anyhow::Result<()> {
    let (store, _, _) = seeded_store();
    let (orch, provider) = orchestrator(store, vec![text("Which list should I use?")]);

    let reply = orch.handle_user_message("add a task").await?;

    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.status, MessageStatus::Complete);
    assert_eq!(reply.content, "Which list should I use?");
    assert!(reply.action_calls.is_none());

    let history = orch.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[1].id, reply.id);
    assert!(!history[1].is_pending());

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_first_request_is_grounded() -> anyhow::Result<()> {
    let (store, list_uid, task_uid) = seeded_store();
    let (orch, provider) = orchestrator(store, vec![text("ok")]);

    orch.handle_user_message("hello").await?;

    let request = &provider.requests()[0];
    assert!(request.system.as_deref().unwrap_or_default().contains("create_list("));
    assert_eq!(request.options.tools.as_ref().map(Vec::len), Some(8));
    assert_eq!(request.messages.len(), 3);

    let context = request.messages[0].text_content().unwrap();
    assert!(context.contains("Lists (1 total):"));
    assert!(context.contains(&format!("UID: {list_uid}")));
    assert!(context.contains(&format!("UID: {task_uid}")));
    assert_eq!(request.messages[1].text_content().as_deref(), Some(CONTEXT_ACK));
    assert_eq!(request.messages[2].text_content().as_deref(), Some("hello"));

    // The grounding exchange is never a visible turn.
    assert_eq!(orch.history().await.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_create_list_turn() -> anyhow::Result<()> {
    let (store, _, _) = seeded_store();
    let (orch, provider) = orchestrator(
        store.clone(),
        vec![calls(&[("create_list", json!({"name": "Testing"}))]), text("Done")],
    );

    let reply = orch.handle_user_message("Create a list called Testing").await?;

    assert!(reply.content.contains("Testing"));
    let results = reply.action_results.as_ref().unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert_eq!(results[0].list().unwrap().color, "#3B82F6");
    assert_eq!(reply.action_calls.as_ref().unwrap()[0].name, "create_list");
    assert!(store.project().lists.iter().any(|l| l.name == "Testing"));

    // The next turn carries the function response for the call.
    orch.handle_user_message("thanks").await?;
    let second = &provider.requests()[1];
    let responses: Vec<_> = second
        .messages
        .iter()
        .flat_map(|m| m.parts())
        .filter_map(|p| match p {
            ContentPart::ToolResult { name, content, .. } => Some((name.clone(), content.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].0, "create_list");
    assert_eq!(responses[0].1["success"], json!(true));
    Ok(())
}

#[tokio::test]
async fn test_failed_call_does_not_stop_batch() -> anyhow::Result<()> {
    let (store, list_uid, _) = seeded_store();
    store.fail_on(StoreOp::CreateList, "network error");
    let (orch, _) = orchestrator(
        store.clone(),
        vec![calls(&[
            ("create_list", json!({"name": "QA"})),
            ("create_task", json!({"list_uid": list_uid, "title": "Write tests"})),
        ])],
    );

    let reply = orch.handle_user_message("set up QA").await?;
    let results = reply.action_results.unwrap();

    assert_eq!(results.len(), 2);
    assert!(!results[0].success);
    assert!(results[1].success);
    assert_eq!(
        reply.content,
        "✅ Created task \"Write tests\"\n\n❌ Failed operations:\n• create_list: network error"
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_action_reported() -> anyhow::Result<()> {
    let (store, _, _) = seeded_store();
    let (orch, _) = orchestrator(store.clone(), vec![calls(&[("archive_list", json!({}))])]);

    let reply = orch.handle_user_message("archive everything").await?;

    let results = reply.action_results.unwrap();
    assert_eq!(results[0].error.as_deref(), Some("Unknown function: archive_list"));
    assert_eq!(store.mutation_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_snapshot_refreshed_only_by_project_data() -> anyhow::Result<()> {
    let (store, _, _) = seeded_store();
    let (orch, _) = orchestrator(
        store,
        vec![
            calls(&[("create_list", json!({"name": "QA"}))]),
            calls(&[("get_project_data", json!({}))]),
        ],
    );

    orch.handle_user_message("create QA").await?;
    let stale = orch.snapshot().await.unwrap();
    assert_eq!(stale.lists.len(), 1);

    let reply = orch.handle_user_message("show my lists").await?;
    assert_eq!(reply.content, GENERIC_ACK);
    let fresh = orch.snapshot().await.unwrap();
    assert_eq!(fresh.lists.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_model_error_becomes_failed_message() -> anyhow::Result<()> {
    let (store, _, _) = seeded_store();
    let (orch, _) = orchestrator(
        store,
        vec![Step::Fail(nest_llms::Error::Api {
            status: 500,
            message: "boom".to_string(),
        })],
    );

    let reply = orch.handle_user_message("hi").await?;

    assert_eq!(reply.content, ERROR_REPLY);
    assert!(matches!(reply.status, MessageStatus::Failed { ref error } if error.contains("boom")));
    assert!(orch.is_indeterminate().await);
    assert_eq!(orch.history().await.len(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_timeout_becomes_timed_out_message() -> anyhow::Result<()> {
    let (store, _, _) = seeded_store();
    let (orch, provider) = orchestrator(store, vec![Step::Hang, text("back again")]);

    let reply = orch.handle_user_message("slow request").await?;

    assert_eq!(reply.status, MessageStatus::TimedOut);
    assert_eq!(reply.content, TIMEOUT_REPLY);
    assert!(orch.is_indeterminate().await);
    assert!(!orch.is_busy());

    // The timed-out user text was not committed to the model history.
    orch.handle_user_message("are you there?").await?;
    let second = &provider.requests()[1];
    let texts: Vec<String> = second.messages.iter().filter_map(|m| m.text_content()).collect();
    assert!(!texts.iter().any(|t| t == "slow request"));
    assert_eq!(texts.last().map(String::as_str), Some("are you there?"));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_busy_rejects_second_message() -> anyhow::Result<()> {
    let (store, _, _) = seeded_store();
    let (orch, _) = orchestrator(store, vec![Step::Hang]);

    let first = {
        let orch = orch.clone();
        tokio::spawn(async move { orch.handle_user_message("first").await })
    };
    while !orch.is_busy() {
        tokio::task::yield_now().await;
    }

    let err = orch.handle_user_message("second").await.unwrap_err();
    assert!(matches!(err, RuntimeError::Busy));

    let reply = first.await??;
    assert_eq!(reply.status, MessageStatus::TimedOut);
    // Only the first exchange is visible.
    assert_eq!(orch.history().await.len(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_placeholder_visible_while_turn_runs() -> anyhow::Result<()> {
    let (store, _, _) = seeded_store();
    let (orch, _) = orchestrator(store, vec![Step::Hang]);

    let turn = {
        let orch = orch.clone();
        tokio::spawn(async move { orch.handle_user_message("slow").await })
    };
    while !orch.is_busy() {
        tokio::task::yield_now().await;
    }

    let history = tokio::time::timeout(Duration::from_secs(5), orch.history()).await?;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "slow");
    assert!(history[1].is_pending());
    let snapshot = tokio::time::timeout(Duration::from_secs(5), orch.snapshot()).await?;
    assert!(snapshot.is_some());
    assert!(orch.is_busy());

    let reply = turn.await??;
    let history = orch.history().await;
    assert_eq!(history[1].id, reply.id);
    assert!(!history[1].is_pending());
    Ok(())
}

#[tokio::test]
async fn test_empty_message_rejected() {
    let (store, _, _) = seeded_store();
    let (orch, provider) = orchestrator(store, vec![]);

    let err = orch.handle_user_message("   ").await.unwrap_err();

    assert!(matches!(err, RuntimeError::EmptyMessage));
    assert!(orch.history().await.is_empty());
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_ungrounded_when_project_fetch_fails() -> anyhow::Result<()> {
    let (store, _, _) = seeded_store();
    store.fail_on(StoreOp::FetchProject, "API down");
    let (orch, provider) = orchestrator(store, vec![text("Hi there")]);

    let reply = orch.handle_user_message("hello").await?;

    assert_eq!(reply.content, "Hi there");
    assert!(orch.snapshot().await.is_none());
    assert_eq!(provider.requests()[0].messages.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_initialize_session_caches_snapshot() -> anyhow::Result<()> {
    let (store, _, task_uid) = seeded_store();
    let (orch, _) = orchestrator(store, vec![]);

    orch.initialize_session().await?;

    let snapshot = orch.snapshot().await.unwrap();
    assert_eq!(snapshot.project.name, "Website");
    assert!(snapshot.find_task(&task_uid).is_some());
    Ok(())
}

#[test]
fn test_missing_credential_is_fatal() {
    let store = Arc::new(InMemoryProjectStore::new(PROJECT, "Website"));
    let bus = ActionBus::new(PROJECT, store);

    let result = Orchestrator::from_config(RuntimeConfig::new(), bus);

    assert!(matches!(result, Err(RuntimeError::MissingCredential(_))));
}

#[test]
fn test_welcome_message() {
    let store = Arc::new(InMemoryProjectStore::new(PROJECT, "Website"));
    let bus = ActionBus::new(PROJECT, store);
    let orch = Orchestrator::from_config(RuntimeConfig::new().with_api_key("k"), bus).unwrap();

    let welcome = orch.welcome_message();
    assert_eq!(welcome.role, Role::Assistant);
    assert!(welcome.content.contains("For example:"));
}
