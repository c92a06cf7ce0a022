use nest_core::{Priority, TaskStatus};

use super::{runtime, seeded_store, PROJECT};
use crate::store::{InMemoryProjectStore, ListPatch, NewList, NewTask, ProjectStore, StoreError};

fn new_task(list_uid: &str, title: &str) -> NewTask {
    NewTask {
        list_uid: list_uid.to_string(),
        title: title.to_string(),
        description: String::new(),
        status: TaskStatus::Todo,
        priority: Priority::Medium,
        color: "#6B7280".to_string(),
        position: None,
        due_date: None,
        is_completed: false,
    }
}

#[test]
fn test_fetch_unknown_project() {
    let rt = runtime();
    rt.block_on(async {
        let store = InMemoryProjectStore::new(PROJECT, "Website");
        let err = store.fetch_project("other").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Project", .. }));
    });
}

#[test]
fn test_create_list_appends_without_position() {
    let rt = runtime();
    rt.block_on(async {
        let (store, _, _) = seeded_store();
        let list = store
            .create_list(NewList {
                project_uid: PROJECT.to_string(),
                name: "QA".to_string(),
                color: "#3B82F6".to_string(),
                position: None,
            })
            .await
            .unwrap();

        assert_eq!(list.position, 1);
        let project = store.fetch_project(PROJECT).await.unwrap();
        assert_eq!(project.lists.last().unwrap().name, "QA");
    });
}

#[test]
fn test_create_task_appends_to_list() {
    let rt = runtime();
    rt.block_on(async {
        let (store, list_uid, _) = seeded_store();
        let task = store.create_task(new_task(&list_uid, "Second")).await.unwrap();
        assert_eq!(task.position, 1);
        assert!(task.created_at.is_some());
    });
}

#[test]
fn test_update_missing_list() {
    let rt = runtime();
    rt.block_on(async {
        let (store, _, _) = seeded_store();
        let err = store
            .update_list("nope", ListPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "List not found: nope");
    });
}

#[test]
fn test_mutation_counter_includes_failures() {
    let rt = runtime();
    rt.block_on(async {
        let (store, _, task_uid) = seeded_store();
        store.fail_on(crate::store::StoreOp::DeleteTask, "boom");

        assert!(store.delete_task(&task_uid).await.is_err());
        store.fetch_project(PROJECT).await.unwrap();
        assert_eq!(store.mutation_count(), 1);

        store.clear_failures();
        store.delete_task(&task_uid).await.unwrap();
        assert_eq!(store.mutation_count(), 2);
    });
}
