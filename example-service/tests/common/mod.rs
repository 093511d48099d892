#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response, Router};
use example_service::config::ExampleConfig;
use example_service::services::{ExampleService, InMemoryExampleRepository, StoreClient};
use example_service::startup::{build_router, AppState, Application};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub fn test_mongo_uri() -> String {
    std::env::var("TEST_MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
}

/// Router backed by the in-memory repository; no store needed.
pub fn in_memory_router() -> Router {
    let service = ExampleService::new(Arc::new(InMemoryExampleRepository::new()));
    build_router(AppState::new(service))
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: StoreClient,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("example_test_{}", Uuid::new_v4().simple());

        let config = ExampleConfig {
            port: 0,
            mongo_uri: test_mongo_uri(),
            mongo_db_name: db_name.clone(),
            store_timeout_secs: 5,
            ..ExampleConfig::default()
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.store().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
            db_name,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Cleanup test database after test completes.
    pub async fn cleanup(&self) {
        self.store
            .database()
            .drop(None)
            .await
            .expect("Failed to drop test database");
    }
}
