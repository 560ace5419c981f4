//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use chrono::{Duration, Local, NaiveDate};
use serde_json::Value;
use tower::ServiceExt;

use certwatch_api::{AppState, build_app, build_state};
use certwatch_core::config::AppConfig;
use certwatch_database::DatabasePool;
use certwatch_database::migration::run_migrations;
use certwatch_entity::client::{Client, ClientInput, ClientStatus};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Repositories and services behind the router
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory database
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.worker.enabled = false;

        let db = DatabasePool::connect_in_memory()
            .await
            .expect("Failed to open in-memory database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let cors = config.server.cors.clone();
        let state = build_state(config, db);
        let router = build_app(state.clone(), &cors);

        Self { router, state }
    }

    /// Insert a client whose certificate expires `days` from today
    pub async fn insert_client(&self, name: &str, days: i64, status: ClientStatus) -> Client {
        self.state
            .client_repo
            .create(&client_input(name, today() + Duration::days(days), status))
            .await
            .expect("Failed to insert client")
    }

    /// Send a request and parse the JSON body
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Actions recorded in the system log, newest first
    pub async fn system_log_actions(&self) -> Vec<(String, Option<String>)> {
        self.state
            .system_log_repo
            .list_recent(100)
            .await
            .expect("Failed to read system log")
            .into_iter()
            .map(|e| (e.action, e.description))
            .collect()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

/// Today's local date, as the handlers see it
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A complete client input
pub fn client_input(name: &str, expiry: NaiveDate, status: ClientStatus) -> ClientInput {
    ClientInput {
        name: name.to_string(),
        business_type: "Manufacturing".to_string(),
        address: "Jl. Industri 1".to_string(),
        location: "Jakarta".to_string(),
        expiry_date: expiry,
        last_audit_date: expiry - Duration::days(365),
        certification_body: "TUV Rheinland".to_string(),
        contact_person: "Budi".to_string(),
        contact_channel: "budi@example.com".to_string(),
        status,
    }
}
