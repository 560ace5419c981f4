//! Integration tests for the client, dashboard, and export endpoints.

mod helpers;

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use certwatch_entity::client::ClientStatus;
use helpers::{TestApp, today};

fn client_body(name: &str, expiry: &str) -> serde_json::Value {
    json!({
        "name": name,
        "business_type": "Food Processing",
        "address": "Jl. Merdeka 10",
        "location": "Surabaya",
        "expiry_date": expiry,
        "last_audit_date": "2024-01-10",
        "certification_body": "SGS",
        "contact_person": "Sari",
        "contact_channel": "0812-0000-0000"
    })
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "connected");
}

#[tokio::test]
async fn test_create_client_logs_action() {
    let app = TestApp::new().await;
    let expiry = (today() + Duration::days(3)).format("%Y-%m-%d").to_string();

    let response = app
        .request("POST", "/api/clients", Some(client_body("PT Sinar", &expiry)))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Client created successfully");
    assert_eq!(response.body["data"]["name"], "PT Sinar");
    assert_eq!(response.body["data"]["status"], "Active");
    assert_eq!(response.body["data"]["days_remaining"], 3);
    assert_eq!(response.body["data"]["days_remaining_label"], "3 days");

    let actions = app.system_log_actions().await;
    assert!(actions.contains(&(
        "Client Created".to_string(),
        Some("New client added: PT Sinar".to_string())
    )));
}

#[tokio::test]
async fn test_create_client_validation() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/clients", Some(client_body("", "2030-01-01")))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(response.body["message"], "Client name is required");

    let response = app
        .request("POST", "/api/clients", Some(client_body("PT Bad Date", "01/01/2030")))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let count = app.state.client_repo.count_all().await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_get_client_not_found_and_bad_id() {
    let app = TestApp::new().await;

    let missing = uuid::Uuid::new_v4();
    let response = app
        .request("GET", &format!("/api/clients/{missing}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Client not found");

    let response = app.request("GET", "/api/clients/42", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_and_orders_by_expiry() {
    let app = TestApp::new().await;
    app.insert_client("Later Ltd", 40, ClientStatus::Active).await;
    app.insert_client("Sooner Ltd", 4, ClientStatus::Active).await;
    app.insert_client("Lapsed Ltd", -10, ClientStatus::Expired).await;

    let response = app.request("GET", "/api/clients", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"]["items"].as_array().unwrap();
    let names: Vec<&str> = items.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Lapsed Ltd", "Sooner Ltd", "Later Ltd"]);
    assert_eq!(response.body["data"]["total_items"], 3);

    let response = app
        .request("GET", "/api/clients?status=Expired", None)
        .await;
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["urgency"], "expired");

    let response = app
        .request("GET", "/api/clients?status=All&search=sooner", None)
        .await;
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Sooner Ltd");

    let response = app
        .request("GET", "/api/clients?page=2&per_page=2", None)
        .await;
    assert_eq!(response.body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(response.body["data"]["total_pages"], 2);
}

#[tokio::test]
async fn test_update_and_delete_client() {
    let app = TestApp::new().await;
    let client = app.insert_client("Old Name", 100, ClientStatus::Active).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/clients/{}", client.id),
            Some(client_body("New Name", "2031-06-30")),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "New Name");
    assert_eq!(response.body["data"]["expiry_date"], "2031-06-30");

    let response = app
        .request("DELETE", &format!("/api/clients/{}", client.id), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Client deleted successfully");

    let response = app
        .request("DELETE", &format!("/api/clients/{}", client.id), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let actions: Vec<String> = app
        .system_log_actions()
        .await
        .into_iter()
        .map(|(action, _)| action)
        .collect();
    assert!(actions.contains(&"Client Updated".to_string()));
    assert!(actions.contains(&"Client Deleted".to_string()));
}

#[tokio::test]
async fn test_update_unknown_client() {
    let app = TestApp::new().await;
    let response = app
        .request(
            "PUT",
            &format!("/api/clients/{}", uuid::Uuid::new_v4()),
            Some(client_body("Ghost", "2031-06-30")),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats_and_expiring_soon() {
    let app = TestApp::new().await;
    app.insert_client("In 20", 20, ClientStatus::Active).await;
    app.insert_client("In 2", 2, ClientStatus::Active).await;
    app.insert_client("In 90", 90, ClientStatus::Active).await;
    app.insert_client("Gone", -3, ClientStatus::Expired).await;

    let response = app.request("GET", "/api/clients/stats", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let stats = &response.body["data"];
    assert_eq!(stats["total_clients"], 4);
    assert_eq!(stats["active_certificates"], 3);
    assert_eq!(stats["expired_certificates"], 1);
    assert_eq!(stats["expiring_soon"], 2);

    let response = app.request("GET", "/api/dashboard/expiring-soon", None).await;
    let names: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["In 2", "In 20"]);

    let response = app.request("GET", "/api/dashboard/stats", None).await;
    assert_eq!(response.body["data"]["total_clients"], 4);
    assert_eq!(response.body["data"]["notifications"]["total"], 0);
}

#[tokio::test]
async fn test_export_lists_every_client() {
    let app = TestApp::new().await;
    app.insert_client("Beta", 10, ClientStatus::Active).await;
    app.insert_client("Alpha", -1, ClientStatus::Expired).await;

    let response = app.request("GET", "/api/export", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let disposition = response
        .headers
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(disposition.starts_with("attachment; filename=\"ISO_Clients_Export_"));

    let rows = response.body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["No"], 1);
    assert_eq!(rows[0]["Client Name"], "Alpha");
    assert_eq!(rows[0]["Days Remaining"], -1);
    assert_eq!(rows[1]["Client Name"], "Beta");
    assert!(response.body["filename"].as_str().unwrap().ends_with(".json"));
}
