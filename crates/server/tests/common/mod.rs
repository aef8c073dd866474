//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! backed by temporary SQLite stores, with the catalog optionally bootstrapped
//! from a mock launch provider.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use launchpad_core::{
    testing::MockLaunchProvider, CatalogSynchronizer, Config, DatabaseConfig, LaunchProvider,
    LaunchStore, PlanetStore, SchedulingConfig, ServerConfig, SqliteLaunchStore,
    SqlitePlanetStore,
};

/// Re-export fixtures for test convenience
pub use launchpad_core::testing::fixtures;

/// Planets every fixture knows about.
pub const KNOWN_PLANETS: [&str; 2] = ["Kepler-442 b", "Kepler-62 f"];

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_schedule() {
///     let fixture = TestFixture::bootstrapped().await;
///
///     let response = fixture.post("/api/v1/launches", json!({
///         "mission": "Kepler Exploration X",
///         "rocket": "Explorer IS1",
///         "launchDate": "December 27, 2030",
///         "target": "Kepler-442 b"
///     })).await;
///
///     assert_eq!(response.status, 201);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Launch store behind the router
    pub launches: Arc<SqliteLaunchStore>,
    /// Planet store behind the router
    pub planets: Arc<SqlitePlanetStore>,
    /// Mock provider - configure the catalog served during bootstrap
    pub provider: Arc<MockLaunchProvider>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestFixture {
    /// Create a fixture with an empty launch catalog.
    pub async fn new() -> Self {
        Self::with_scheduling(SchedulingConfig::default()).await
    }

    /// Create a fixture whose catalog has been bootstrapped from the early
    /// Falcon 1 flights.
    pub async fn bootstrapped() -> Self {
        let fixture = Self::new().await;
        fixture
            .provider
            .set_launches(fixtures::early_falcon_launches())
            .await;
        fixture.bootstrap().await;
        fixture
    }

    /// Create a fixture with custom scheduling defaults.
    pub async fn with_scheduling(scheduling: SchedulingConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            scheduling,
            ..Default::default()
        };

        let launches =
            Arc::new(SqliteLaunchStore::new(&db_path).expect("Failed to create launch store"));
        let planets =
            Arc::new(SqlitePlanetStore::new(&db_path).expect("Failed to create planet store"));
        for name in KNOWN_PLANETS {
            planets.upsert(name).expect("Failed to seed planet");
        }

        let provider = Arc::new(MockLaunchProvider::new());

        let state = Arc::new(launchpad_server::AppState::new(
            config,
            Arc::clone(&launches) as Arc<dyn LaunchStore>,
            Arc::clone(&planets) as Arc<dyn PlanetStore>,
        ));
        let router = launchpad_server::create_router(state);

        Self {
            router,
            launches,
            planets,
            provider,
            temp_dir,
        }
    }

    /// Run catalog bootstrap against the mock provider.
    pub async fn bootstrap(&self) {
        CatalogSynchronizer::new(
            Arc::clone(&self.launches) as Arc<dyn LaunchStore>,
            Arc::clone(&self.provider) as Arc<dyn LaunchProvider>,
        )
        .ensure_bootstrapped()
        .await
        .expect("Bootstrap failed");
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body_bytes).to_string();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status, $response.status, $response.text
        );
    };
}
