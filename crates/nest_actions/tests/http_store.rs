use mockito::Matcher;
use nest_actions::{HttpProjectStore, ListPatch, NewList, ProjectStore, StoreError, TaskPatch};
use serde_json::json;

#[tokio::test]
async fn test_fetch_project_unwraps_envelope() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/projects/p1")
        .match_header("authorization", "Bearer secret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "data": {
                    "project_uid": "p1",
                    "name": "Website",
                    "lists": [{
                        "list_uid": "l1",
                        "project_uid": "p1",
                        "name": "Backend",
                        "tasks": [{"task_uid": "t1", "list_uid": "l1", "title": "Auth"}]
                    }]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = HttpProjectStore::new(format!("{}/api", server.url())).with_token("secret");
    let project = store.fetch_project("p1").await.unwrap();

    assert_eq!(project.name, "Website");
    assert_eq!(project.lists[0].tasks[0].title, "Auth");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_list_posts_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/lists")
        .match_body(Matcher::Json(json!({
            "project_uid": "p1",
            "name": "QA",
            "color": "#3B82F6"
        })))
        .with_status(201)
        .with_body(
            json!({
                "success": true,
                "data": {"list_uid": "l9", "project_uid": "p1", "name": "QA", "color": "#3B82F6", "position": 3}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = HttpProjectStore::new(server.url());
    let list = store
        .create_list(NewList {
            project_uid: "p1".to_string(),
            name: "QA".to_string(),
            color: "#3B82F6".to_string(),
            position: None,
        })
        .await
        .unwrap();

    assert_eq!(list.list_uid, "l9");
    assert_eq!(list.position, 3);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_task_sends_explicit_null() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PATCH", "/tasks/t1")
        .match_body(Matcher::Json(json!({"due_date": null})))
        .with_status(200)
        .with_body(
            json!({
                "success": true,
                "data": {"task_uid": "t1", "list_uid": "l1", "title": "Auth", "due_date": null}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = HttpProjectStore::new(server.url());
    let task = store
        .update_task(
            "t1",
            TaskPatch {
                due_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(task.due_date, None);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/lists/l1")
        .with_status(204)
        .create_async()
        .await;

    let store = HttpProjectStore::new(server.url());
    store.delete_list("l1").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rejected_envelope() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("PATCH", "/lists/l1")
        .with_status(200)
        .with_body(json!({"success": false, "error": "List is archived"}).to_string())
        .create_async()
        .await;

    let store = HttpProjectStore::new(server.url());
    let err = store
        .update_list("l1", ListPatch::default())
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Rejected(_)));
    assert_eq!(err.to_string(), "List is archived");
}

#[tokio::test]
async fn test_http_status_error_uses_envelope_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/tasks/t1")
        .with_status(404)
        .with_body(json!({"success": false, "message": "Task not found"}).to_string())
        .create_async()
        .await;

    let store = HttpProjectStore::new(server.url());
    let err = store.delete_task("t1").await.unwrap_err();

    match err {
        StoreError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Task not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}
