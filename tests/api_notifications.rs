//! Integration tests for the notification endpoints and the manual check.

mod helpers;

use axum::http::StatusCode;

use certwatch_entity::client::ClientStatus;
use helpers::TestApp;

async fn seeded_app() -> TestApp {
    let app = TestApp::new().await;
    app.insert_client("Three Days", 3, ClientStatus::Active).await;
    app.insert_client("Two Days", 2, ClientStatus::Active).await;
    app.insert_client("Yesterday", -1, ClientStatus::Active).await;
    app.insert_client("Far Away", 60, ClientStatus::Active).await;
    app
}

#[tokio::test]
async fn test_trigger_check_creates_notifications() {
    let app = seeded_app().await;

    let response = app
        .request("POST", "/api/notifications/trigger-check", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        "Manual notification check completed successfully"
    );
    assert_eq!(response.body["data"]["created"], 3);
    assert_eq!(response.body["data"]["updated"], 1);
    assert_eq!(response.body["data"]["total_checked"], 4);

    let response = app.request("GET", "/api/notifications/stats", None).await;
    let stats = &response.body["data"];
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["unread"], 3);
    assert_eq!(stats["warning"], 1);
    assert_eq!(stats["danger"], 2);

    let actions = app.system_log_actions().await;
    assert!(actions.contains(&(
        "Manual Notification Check".to_string(),
        Some("Manual check triggered. Created 3 notifications, updated 1 statuses.".to_string())
    )));
}

#[tokio::test]
async fn test_second_trigger_creates_nothing() {
    let app = seeded_app().await;
    app.request("POST", "/api/notifications/trigger-check", None)
        .await;

    let response = app
        .request("POST", "/api/notifications/trigger-check", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["created"], 0);
    assert_eq!(response.body["data"]["updated"], 0);
    // The expired client is no longer active.
    assert_eq!(response.body["data"]["total_checked"], 3);
}

#[tokio::test]
async fn test_list_filters() {
    let app = seeded_app().await;
    app.request("POST", "/api/notifications/trigger-check", None)
        .await;

    let response = app
        .request("GET", "/api/notifications?severity=warning", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["client_name"], "Three Days");
    assert_eq!(items[0]["title"], "Three Days - Certificate Expiring Soon");

    let response = app
        .request("GET", "/api/notifications?status=read", None)
        .await;
    assert_eq!(response.body["data"]["total_items"], 0);

    let response = app
        .request("GET", "/api/notifications?status=sometimes", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("GET", "/api/notifications/unread", None).await;
    assert_eq!(response.body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_mark_read_and_delete() {
    let app = seeded_app().await;
    app.request("POST", "/api/notifications/trigger-check", None)
        .await;

    let response = app.request("GET", "/api/notifications/unread", None).await;
    let id = response.body["data"][0]["id"].as_str().unwrap().to_string();

    let response = app
        .request("PUT", &format!("/api/notifications/{id}/read"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Notification marked as read");

    let response = app.request("GET", "/api/notifications/stats", None).await;
    assert_eq!(response.body["data"]["unread"], 2);

    let response = app
        .request("DELETE", &format!("/api/notifications/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("PUT", &format!("/api/notifications/{id}/read"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Notification not found");
}

#[tokio::test]
async fn test_mark_all_read() {
    let app = seeded_app().await;
    app.request("POST", "/api/notifications/trigger-check", None)
        .await;

    let response = app
        .request("PUT", "/api/notifications/read-all", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["updated_count"], 3);

    let response = app.request("GET", "/api/notifications/stats", None).await;
    assert_eq!(response.body["data"]["unread"], 0);
    assert_eq!(response.body["data"]["total"], 3);
}

#[tokio::test]
async fn test_system_logs_endpoint() {
    let app = seeded_app().await;
    app.request("POST", "/api/notifications/trigger-check", None)
        .await;

    let response = app.request("GET", "/api/system-logs?limit=5", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let entries = response.body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "Manual Notification Check");
}

#[tokio::test]
async fn test_failed_trigger_check_returns_generic_error() {
    let app = seeded_app().await;
    sqlx::query("DROP TABLE notifications")
        .execute(app.state.db.pool())
        .await
        .expect("Failed to drop notifications table");

    let response = app
        .request("POST", "/api/notifications/trigger-check", None)
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "DATABASE_ERROR");
    assert_eq!(response.body["message"], "An internal error occurred");
    assert!(response.body.get("data").is_none());

    let actions = app.system_log_actions().await;
    assert!(
        actions
            .iter()
            .all(|(action, _)| action != "Manual Notification Check")
    );
}
