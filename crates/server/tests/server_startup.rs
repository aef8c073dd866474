use std::io::Write;
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, routing::post, Json, Router};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::{NamedTempFile, TempDir};
use tokio::time::{sleep, timeout};

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

fn provider_docs() -> Value {
    json!({
        "docs": [
            {
                "flight_number": 1,
                "name": "FalconSat",
                "date_local": "2006-03-25T10:30:00+12:00",
                "upcoming": false,
                "success": false,
                "rocket": {"name": "Falcon 1"},
                "payloads": [{"customers": ["DARPA"]}]
            },
            {
                "flight_number": 2,
                "name": "DemoSat",
                "date_local": "2007-03-21T13:10:00+12:00",
                "upcoming": false,
                "success": false,
                "rocket": {"name": "Falcon 1"},
                "payloads": [{"customers": ["DARPA"]}, {"customers": ["NASA"]}]
            }
        ]
    })
}

/// Serve the launches query endpoint locally; returns the base URL and a
/// request counter.
async fn spawn_provider(status: StatusCode, body: Value) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let app = Router::new().route(
        "/v4/launches/query",
        post(move |Json(_request): Json<Value>| {
            let body = body.clone();
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (status, Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v4", addr), hits)
}

/// Create a config pointing at a local provider and database
fn config_with(port: u16, db_path: &std::path::Path, provider_url: &str) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = {}

[database]
path = "{}"

[provider]
base_url = "{}"
timeout_secs = 5

[[planets]]
kepler_name = "Kepler-442 b"
"#,
        port,
        db_path.display(),
        provider_url
    )
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Spawn the server and return a handle
fn spawn_server(config_path: &std::path::Path) -> tokio::process::Child {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_launchpad"))
        .env("LAUNCHPAD_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    let client = Client::new();
    for _ in 0..max_attempts {
        if client
            .get(format!("http://127.0.0.1:{}/api/v1/health", port))
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

async fn get_json(port: u16, path: &str) -> Value {
    Client::new()
        .get(format!("http://127.0.0.1:{}{}", port, path))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON")
}

#[tokio::test]
async fn test_bootstraps_before_serving() {
    let (provider_url, hits) = spawn_provider(StatusCode::OK, provider_docs()).await;
    let temp_dir = TempDir::new().unwrap();
    let port = get_available_port();
    let config = write_config(&config_with(
        port,
        &temp_dir.path().join("launchpad.db"),
        &provider_url,
    ));

    let mut server = spawn_server(config.path());
    assert!(
        wait_for_server(port, 100).await,
        "Server did not start in time"
    );

    let health = get_json(port, "/api/v1/health").await;
    assert_eq!(health["status"], "ok");

    let launches = get_json(port, "/api/v1/launches").await;
    assert_eq!(launches.as_array().unwrap().len(), 2);
    assert_eq!(launches[1]["mission"], "DemoSat");
    assert_eq!(launches[1]["customers"], json!(["DARPA", "NASA"]));

    let planets = get_json(port, "/api/v1/planets").await;
    assert_eq!(planets, json!([{"keplerName": "Kepler-442 b"}]));

    assert_eq!(hits.load(Ordering::SeqCst), 1);

    server.kill().await.ok();
}

#[tokio::test]
async fn test_restart_skips_provider() {
    let (provider_url, hits) = spawn_provider(StatusCode::OK, provider_docs()).await;
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("launchpad.db");

    for _ in 0..2 {
        let port = get_available_port();
        let config = write_config(&config_with(port, &db_path, &provider_url));

        let mut server = spawn_server(config.path());
        assert!(
            wait_for_server(port, 100).await,
            "Server did not start in time"
        );

        let launches = get_json(port, "/api/v1/launches").await;
        assert_eq!(launches.as_array().unwrap().len(), 2);

        server.kill().await.ok();
        server.wait().await.ok();
    }

    // The second process found the FalconSat launch and never called out.
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_provider_failure_exits_before_listening() {
    let (provider_url, hits) =
        spawn_provider(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "down"})).await;
    let temp_dir = TempDir::new().unwrap();
    let port = get_available_port();
    let config = write_config(&config_with(
        port,
        &temp_dir.path().join("launchpad.db"),
        &provider_url,
    ));

    let status = timeout(Duration::from_secs(15), spawn_server(config.path()).wait())
        .await
        .expect("Server did not exit")
        .expect("Failed to wait for server");

    assert!(!status.success());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(
        TcpListener::bind(("127.0.0.1", port)).is_ok(),
        "Port should never have been taken"
    );
}

#[tokio::test]
async fn test_missing_config_file_exits_with_error() {
    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_launchpad"))
            .env("LAUNCHPAD_CONFIG", "/nonexistent/config.toml")
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_invalid_config_exits_with_error() {
    let config = write_config(
        r#"
[server]
port = 8080

[provider]
timeout_secs = 0
"#,
    );

    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_launchpad"))
            .env("LAUNCHPAD_CONFIG", config.path())
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}
