#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use employee_service::config::EmployeeConfig;
use employee_service::models::{Employee, EmployeeUpdate};
use employee_service::services::{EmployeeStore, InMemoryEmployeeStore, MongoDb};
use employee_service::{build_router, AppState, Application};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

/// Store whose every call fails, as an unreachable database would.
pub struct FailingStore;

#[async_trait]
impl EmployeeStore for FailingStore {
    async fn list(&self) -> anyhow::Result<Vec<Employee>> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn insert(&self, _employee: &Employee) -> anyhow::Result<ObjectId> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn find_by_id(&self, _id: ObjectId) -> anyhow::Result<Option<Employee>> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn update_fields(&self, _id: ObjectId, _update: &EmployeeUpdate) -> anyhow::Result<bool> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn delete_by_id(&self, _id: ObjectId) -> anyhow::Result<u64> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("connection refused"))
    }
}

/// How [`RereadStore`] answers the lookup that follows an insert.
#[derive(Clone, Copy)]
pub enum Reread {
    Missing,
    Fails,
}

/// Accepts inserts but cannot read them back.
pub struct RereadStore(pub Reread);

#[async_trait]
impl EmployeeStore for RereadStore {
    async fn list(&self) -> anyhow::Result<Vec<Employee>> {
        Ok(Vec::new())
    }

    async fn insert(&self, _employee: &Employee) -> anyhow::Result<ObjectId> {
        Ok(ObjectId::new())
    }

    async fn find_by_id(&self, _id: ObjectId) -> anyhow::Result<Option<Employee>> {
        match self.0 {
            Reread::Missing => Ok(None),
            Reread::Fails => Err(anyhow::anyhow!("cursor killed")),
        }
    }

    async fn update_fields(&self, _id: ObjectId, _update: &EmployeeUpdate) -> anyhow::Result<bool> {
        Ok(false)
    }

    async fn delete_by_id(&self, _id: ObjectId) -> anyhow::Result<u64> {
        Ok(0)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn reread_router(reread: Reread) -> Router {
    build_router(AppState::new(Arc::new(RereadStore(reread))))
}

pub fn in_memory_router() -> Router {
    build_router(AppState::new(Arc::new(InMemoryEmployeeStore::new())))
}

pub fn failing_router() -> Router {
    build_router(AppState::new(Arc::new(FailingStore)))
}

/// Sends one request through the router and decodes the JSON body
/// (`Value::Null` when the body is empty).
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn send_raw(router: &Router, method: Method, uri: &str, body: &'static str) -> StatusCode {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
}

pub struct TestApp {
    pub address: String,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    /// Spawns the service against a throwaway database on a local MongoDB.
    pub async fn spawn() -> Self {
        std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");

        let db_name = format!("employee_test_{}", Uuid::new_v4());

        let mut config = EmployeeConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.mongodb.database = db_name.clone();
        config.mongodb.connect_timeout_secs = 5;

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().expect("built against MongoDB").clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("http://127.0.0.1:{}/health", port);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            db,
            db_name,
        }
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
