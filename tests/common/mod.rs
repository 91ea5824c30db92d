//! Mock cracking-demo backend for integration tests.
//!
//! Serves the same four endpoints as the real FastAPI service: `/gui` returns
//! a single JSON status object, the other three stream plain-text lines as
//! separate chunks with small gaps so each arrives as its own transport read.

use axum::{
    body::Body,
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use futures::StreamExt;
use rainbow_dash::ActionDispatcher;
use serde::Deserialize;
use std::time::Duration;
use tokio::net::TcpListener;

pub const GUI_STATUS: &str = "GUI launched. Check your desktop environment.";

/// Streamed by `/demo`, slowly enough that a test can supersede it mid-flight.
pub const DEMO_LINES: &[&str] = &[
    "[INFO] === Rainbow Table CLI v2.1.0 ===",
    "[INFO] Loading chain file: md5_chains_8char.bin",
    "[OK] Loaded 847,291,456 chains",
    "[INFO] Searching chain endpoints...",
    "[INFO] Found 3 candidate chains",
    "[INFO] Regenerating chain #1: start=ax9kL2...",
    "[SUCCESS] Password found: 'hello'",
    "[OK] Speedup: 92.6x",
];

pub const TEST_LINES: &[&str] = &[
    "[INFO] Quick Test Mode — single hash lookup",
    "[INFO] Hash: e10adc3949ba59abbe56e057f20f883e",
    "[INFO] Algorithm: MD5",
    "[INFO] Searching rainbow table...",
    "[INFO] ██████████████████████████ 100%",
    "[SUCCESS] Cracked! Password: '123456'",
    "[INFO] Time elapsed: 0.018s",
];

pub const PLOT_LINES: &[&str] = &[
    "[INFO] Benchmarking CUDA vs CPU performance...",
    "[INFO] Test 1/5: 1000 hashes — CUDA: 2ms, CPU: 156ms",
    "[INFO] Test 2/5: 5000 hashes — CUDA: 8ms, CPU: 780ms",
    "[INFO] Test 3/5: 10000 hashes — CUDA: 14ms, CPU: 1420ms",
    "[INFO] Test 4/5: 50000 hashes — CUDA: 52ms, CPU: 7100ms",
    "[INFO] Test 5/5: 100000 hashes — CUDA: 98ms, CPU: 14200ms",
    "[OK] Benchmark complete. Rendering graph...",
    "[SUCCESS] Performance graph updated.",
];

fn streamed(lines: &'static [&'static str], gap: Duration) -> Response {
    let stream = futures::stream::iter(lines.iter()).then(move |line| async move {
        tokio::time::sleep(gap).await;
        Ok::<Bytes, std::io::Error>(Bytes::from(format!("{line}\n")))
    });
    Response::builder()
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from_stream(stream))
        .unwrap()
}

async fn gui() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": GUI_STATUS }))
}

async fn demo() -> Response {
    streamed(DEMO_LINES, Duration::from_millis(150))
}

async fn quick_test() -> Response {
    streamed(TEST_LINES, Duration::from_millis(25))
}

#[derive(Deserialize)]
struct PlotParams {
    #[allow(dead_code)]
    time_ms: f64,
}

async fn plot(Query(_params): Query<PlotParams>) -> Response {
    streamed(PLOT_LINES, Duration::from_millis(25))
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Healthy backend; returns its base URL.
pub async fn spawn_mock_backend() -> String {
    let app = Router::new()
        .route("/gui", get(gui))
        .route("/demo", get(demo))
        .route("/test", get(quick_test))
        .route("/plot", get(plot));
    serve(app).await
}

async fn failing_status() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

/// Streams two chunks, then kills the connection mid-body.
async fn broken_stream() -> Response {
    let items: Vec<Result<Bytes, std::io::Error>> = vec![
        Ok(Bytes::from_static(b"[INFO] Loading chain file: md5_chains_8char.bin\n")),
        Ok(Bytes::from_static(b"[INFO] Searching chain endpoints...\n")),
        Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "backend crashed",
        )),
    ];
    let stream = futures::stream::iter(items).then(|item| async move {
        tokio::time::sleep(Duration::from_millis(25)).await;
        item
    });
    Response::builder()
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from_stream(stream))
        .unwrap()
}

/// Backend where `/test` rejects outright and `/demo` dies mid-stream.
pub async fn spawn_faulty_backend() -> String {
    let app = Router::new()
        .route("/gui", get(failing_status))
        .route("/demo", get(broken_stream))
        .route("/test", get(failing_status))
        .route("/plot", get(failing_status));
    serve(app).await
}

/// Poll until the dispatcher goes idle, panicking after `timeout`.
pub async fn wait_until_idle(dispatcher: &ActionDispatcher, timeout: Duration) {
    let deadline = tokio::time::Instant::now() + timeout;
    while dispatcher.is_running() {
        if tokio::time::Instant::now() >= deadline {
            panic!("dispatcher still running after {timeout:?}");
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
