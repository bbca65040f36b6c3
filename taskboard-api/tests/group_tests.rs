/// Integration tests for groups, roles and group-assigned tasks

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::{json, Value};

async fn create_group(ctx: &TestContext, name: &str, created_by: &str) -> String {
    let (status, body) = ctx
        .post("/groups", json!({ "groupName": name, "createdBy": created_by }))
        .await;
    assert_eq!(status, StatusCode::OK, "create group failed: {}", body);
    assert_eq!(body["message"], "Group created");

    let (_, groups) = ctx.get("/groups").await;
    groups
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["groupName"] == name)
        .and_then(|g| g["id"].as_str())
        .unwrap()
        .to_string()
}

fn review_task(group_id: &str) -> Value {
    json!({
        "groupId": group_id,
        "assignedTo": "bob",
        "taskName": "Review PR",
        "dueDate": "2024-01-01",
        "status": "open",
        "createdBy": "alice",
    })
}

#[tokio::test]
async fn test_group_task_end_to_end() {
    let ctx = TestContext::new();
    let group_id = create_group(&ctx, "Engineering", "alice").await;

    let (_, groups) = ctx.get("/groups").await;
    assert_eq!(
        groups,
        json!([{ "id": &group_id, "groupName": "Engineering", "createdBy": "alice" }])
    );

    let (status, body) = ctx.post("/assignedTask", review_task(&group_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task assigned");
    let assigned = body["task"].clone();

    let (status, tasks) = ctx.get_as("/groupTasks", &group_id).await;
    assert_eq!(status, StatusCode::OK);
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);

    let task = &tasks[0];
    assert_eq!(task, &assigned);
    assert!(task["id"].is_string());
    assert!(task["createdAt"].is_string());
    assert_eq!(task["groupId"], group_id.as_str());
    assert_eq!(task["assignedTo"], "bob");
    assert_eq!(task["taskName"], "Review PR");
    assert_eq!(task["dueDate"], "2024-01-01");
    assert_eq!(task["status"], "open");
    assert_eq!(task["createdBy"], "alice");
}

#[tokio::test]
async fn test_group_tasks_are_separate_from_personal_tasks() {
    let ctx = TestContext::new();
    ctx.post("/assignedTask", review_task("g1")).await;

    let (_, personal) = ctx.get_as("/tasks", "bob").await;
    assert_eq!(personal, json!([]));
}

#[tokio::test]
async fn test_group_tasks_require_identity_header() {
    let ctx = TestContext::new();

    let (status, _) = ctx.get("/groupTasks").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_assign_task_requires_every_field() {
    let ctx = TestContext::new();

    for field in ["groupId", "assignedTo", "taskName", "dueDate", "status", "createdBy"] {
        let mut body = review_task("g1");
        body.as_object_mut().unwrap().remove(field);

        let (status, _) = ctx.post("/assignedTask", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {} accepted", field);
    }

    let (_, tasks) = ctx.get_as("/groupTasks", "g1").await;
    assert_eq!(tasks, json!([]));
}

#[tokio::test]
async fn test_update_task_status() {
    let ctx = TestContext::new();
    let (_, body) = ctx.post("/assignedTask", review_task("g1")).await;
    let task_id = body["task"]["id"].as_str().unwrap().to_string();

    let (status, body) = ctx
        .put(&format!("/updateTaskStatus/{}", task_id), json!({ "status": "done" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Status updated");

    let (_, tasks) = ctx.get_as("/groupTasks", "g1").await;
    assert_eq!(tasks[0]["status"], "done");
}

#[tokio::test]
async fn test_update_task_status_rejects_empty_status() {
    let ctx = TestContext::new();
    let (_, body) = ctx.post("/assignedTask", review_task("g1")).await;
    let task_id = body["task"]["id"].as_str().unwrap().to_string();

    let (status, _) = ctx
        .put(&format!("/updateTaskStatus/{}", task_id), json!({ "status": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx
        .put(&format!("/updateTaskStatus/{}", task_id), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, tasks) = ctx.get_as("/groupTasks", "g1").await;
    assert_eq!(tasks[0]["status"], "open");
}

#[tokio::test]
async fn test_update_status_of_unknown_task() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .put("/updateTaskStatus/missing", json!({ "status": "done" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_group_requires_fields() {
    let ctx = TestContext::new();

    let (status, _) = ctx.post("/groups", json!({ "groupName": "Ops" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, groups) = ctx.get("/groups").await;
    assert_eq!(groups, json!([]));
}

#[tokio::test]
async fn test_change_role_rejects_unknown_roles() {
    let ctx = TestContext::new();
    ctx.register("alice", "alice@example.com", "pw").await;

    for rol in ["owner", "Admin", ""] {
        let (status, _) = ctx
            .put("/users/alice@example.com", json!({ "rol": rol }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "role {:?} accepted", rol);
    }

    let (_, users) = ctx.get("/users").await;
    assert_eq!(users[0]["rol"], "usuario");
}

#[tokio::test]
async fn test_change_role_of_unknown_user() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .put("/users/ghost@example.com", json!({ "rol": "admin" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, users) = ctx.get("/users").await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn test_users_by_group() {
    let ctx = TestContext::new();
    ctx.register("alice", "alice@example.com", "pw").await;
    ctx.register("bob", "bob@example.com", "pw").await;
    let group_id = create_group(&ctx, "Engineering", "alice").await;

    let (status, _) = ctx
        .put("/groupChange/bob@example.com", json!({ "grupo": &group_id }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, users) = ctx
        .get(&format!("/usersByGroup?groupId={}", group_id))
        .await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], "bob@example.com");
    assert_eq!(users[0]["userName"], "bob");
    assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn test_users_by_group_requires_group_id() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/usersByGroup").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "groupId is required");
}

#[tokio::test]
async fn test_users_by_group_rejects_repeated_group_id() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/usersByGroup?groupId=a&groupId=b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("groupId"));
}

#[tokio::test]
async fn test_change_group_of_unknown_user() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .put("/groupChange/ghost@example.com", json!({ "grupo": "g1" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "connected");

    let (status, body) = ctx.get("/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}
