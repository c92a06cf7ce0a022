use std::sync::Arc;

use async_trait::async_trait;
use nest_core::{ActionCall, NotificationLevel, DEFAULT_LIST_COLOR};
use serde_json::{json, Value as JsonValue};

use super::{runtime, seeded_store, RecordingNotifier, PROJECT};
use crate::actions::{Action, ActionContext, ActionOutcome, ActionOutput};
use crate::registry::ActionSchema;
use crate::store::{InMemoryProjectStore, StoreOp};
use crate::ActionBus;

#[test]
fn test_list_actions_exposes_catalog() {
    let (store, _, _) = seeded_store();
    let bus = ActionBus::new(PROJECT, store);
    let actions = bus.list_actions();

    assert_eq!(actions.len(), 8);
    for info in &actions {
        assert!(!info.description.is_empty());
        assert!(info.parameters.is_object());
    }
}

#[test]
fn test_unknown_action_never_reaches_store() {
    let rt = runtime();
    rt.block_on(async {
        let (store, _, _) = seeded_store();
        let bus = ActionBus::new(PROJECT, store.clone());

        let result = bus
            .dispatch(&ActionCall::new("archive_list", json!({"list_uid": "l1"})))
            .await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Unknown function: archive_list"));
        assert!(store.calls().is_empty());
    });
}

#[test]
fn test_missing_required_parameter_no_mutation() {
    let rt = runtime();
    rt.block_on(async {
        let (store, _, _) = seeded_store();
        let bus = ActionBus::new(PROJECT, store.clone());

        let calls = vec![
            ActionCall::new("create_list", json!({})),
            ActionCall::new("create_task", json!({"title": "Orphan"})),
            ActionCall::new("update_task", json!({"title": "No uid"})),
            ActionCall::new("delete_list", json!(null)),
            ActionCall::new("move_task", json!({"task_uid": "t1"})),
        ];
        let results = bus.dispatch_all(&calls).await;

        assert!(results.iter().all(|r| !r.success));
        assert!(results[0]
            .error
            .as_deref()
            .unwrap()
            .contains("Missing required parameter: name"));
        assert_eq!(store.mutation_count(), 0);
        assert!(store.calls().is_empty());
    });
}

#[test]
fn test_dispatch_all_aligned_and_isolated() {
    let rt = runtime();
    rt.block_on(async {
        let (store, list_uid, task_uid) = seeded_store();
        let bus = ActionBus::new(PROJECT, store.clone());

        let calls = vec![
            ActionCall::new("delete_task", json!({"task_uid": "missing"})),
            ActionCall::new("create_task", json!({"list_uid": list_uid, "title": "Docs"})),
            ActionCall::new("bogus", json!({})),
            ActionCall::new("update_task", json!({"task_uid": task_uid, "priority": "high"})),
        ];
        let results = bus.dispatch_all(&calls).await;

        assert_eq!(results.len(), calls.len());
        assert!(!results[0].success);
        assert!(results[1].success);
        assert_eq!(results[1].task().unwrap().title, "Docs");
        assert!(!results[2].success);
        assert!(results[3].success);
    });
}

#[test]
fn test_create_list_scenario_uses_default_color() {
    let rt = runtime();
    rt.block_on(async {
        let store = Arc::new(InMemoryProjectStore::new(PROJECT, "Website"));
        let bus = ActionBus::new(PROJECT, store.clone());

        let result = bus
            .dispatch(&ActionCall::new("create_list", json!({"name": "Testing"})))
            .await;

        assert!(result.success);
        let list = result.list().unwrap();
        assert_eq!(list.name, "Testing");
        assert_eq!(list.color, DEFAULT_LIST_COLOR);
        assert_eq!(store.calls(), vec![StoreOp::CreateList]);
        assert_eq!(store.project().lists[0].color, DEFAULT_LIST_COLOR);
    });
}

#[test]
fn test_failed_first_call_does_not_block_second() {
    let rt = runtime();
    rt.block_on(async {
        let (store, list_uid, _) = seeded_store();
        store.fail_on(StoreOp::CreateList, "network error");
        let bus = ActionBus::new(PROJECT, store.clone());

        let calls = vec![
            ActionCall::new("create_list", json!({"name": "QA"})),
            ActionCall::new("create_task", json!({"list_uid": list_uid, "title": "Write tests"})),
        ];
        let results = bus.dispatch_all(&calls).await;

        assert_eq!(results.len(), 2);
        assert!(!results[0].success);
        assert_eq!(results[0].error.as_deref(), Some("network error"));
        assert!(results[1].success);
        assert_eq!(store.calls(), vec![StoreOp::CreateList, StoreOp::CreateTask]);
    });
}

#[test]
fn test_notifications_for_mutations_and_remote_failures() {
    let rt = runtime();
    rt.block_on(async {
        let (store, list_uid, _) = seeded_store();
        store.fail_on(StoreOp::DeleteList, "server unavailable");
        let notifier = Arc::new(RecordingNotifier::default());
        let bus = ActionBus::new(PROJECT, store).with_notifier(notifier.clone());

        bus.dispatch_all(&[
            ActionCall::new("create_list", json!({"name": "QA"})),
            ActionCall::new("get_project_data", json!({})),
            ActionCall::new("delete_list", json!({"list_uid": list_uid})),
            ActionCall::new("create_list", json!({})),
        ])
        .await;

        let seen = notifier.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].level, NotificationLevel::Success);
        assert_eq!(seen[0].title, "List created");
        assert_eq!(seen[1].level, NotificationLevel::Error);
        assert_eq!(seen[1].description, "server unavailable");
    });
}

#[test]
fn test_register_custom_action() {
    struct Echo;

    fn echo_schema() -> &'static ActionSchema {
        static SCHEMA: std::sync::OnceLock<ActionSchema> = std::sync::OnceLock::new();
        SCHEMA.get_or_init(|| {
            serde_json::from_value(json!({
                "name": "echo",
                "description": "Echo a word",
                "parameters": [
                    {"name": "word", "type": "string", "required": true, "description": "word"}
                ]
            }))
            .unwrap()
        })
    }

    #[async_trait]
    impl Action for Echo {
        fn schema(&self) -> &ActionSchema {
            echo_schema()
        }

        fn notice(&self) -> Option<&'static str> {
            None
        }

        async fn execute(&self, args: JsonValue, _ctx: &ActionContext<'_>) -> ActionOutcome {
            Ok(ActionOutput::new(None, args["word"].as_str().unwrap_or("").to_string()))
        }
    }

    let rt = runtime();
    rt.block_on(async {
        let (store, _, _) = seeded_store();
        let mut bus = ActionBus::new(PROJECT, store);
        bus.register(Echo);

        assert!(bus.registry().contains("echo"));
        let ok = bus.dispatch(&ActionCall::new("echo", json!({"word": "hi"}))).await;
        assert_eq!(ok.message.as_deref(), Some("hi"));

        let missing = bus.dispatch(&ActionCall::new("echo", json!({}))).await;
        assert!(!missing.success);
    });
}

#[test]
fn test_events_bracket_each_dispatch() {
    let rt = runtime();
    rt.block_on(async {
        let (store, list_uid, _) = seeded_store();
        let (tx, mut rx) = tokio::sync::mpsc::channel(16);
        let bus = ActionBus::new(PROJECT, store).with_events(tx);

        let call = ActionCall::new("update_list", json!({"list_uid": list_uid, "name": "API"}))
            .with_id("call_7");
        bus.dispatch(&call).await;

        match rx.recv().await {
            Some(nest_core::ActionEvent::ActionStart { call }) => assert_eq!(call.id, "call_7"),
            other => panic!("unexpected event: {other:?}"),
        }
        match rx.recv().await {
            Some(nest_core::ActionEvent::ActionDone { call_id, result }) => {
                assert_eq!(call_id, "call_7");
                assert!(result.success);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    });
}
