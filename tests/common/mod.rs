//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use api_forwarder::config::ForwarderConfig;
use api_forwarder::forward::ReqwestUpstream;
use api_forwarder::{HttpServer, Shutdown};
use axum::{
    body::Bytes,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{AppendHeaders, IntoResponse},
    routing::{any, get},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

/// Client that ignores proxy environment variables.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Echo the request back as JSON.
async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let headers: Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                Value::String(value.to_str().unwrap_or_default().to_string()),
            )
        })
        .collect();

    Json(json!({
        "method": method.as_str(),
        "uri": uri.to_string(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn cookies() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain")],
        AppendHeaders([
            (header::SET_COOKIE, "session=abc; Path=/; Expires=Wed, 21 Oct 2026 07:28:00 GMT"),
            (header::SET_COOKIE, "theme=dark; Path=/"),
        ]),
        "cookies set",
    )
}

/// Start a mock backend on an ephemeral port.
pub async fn start_mock_backend() -> SocketAddr {
    let app = Router::new()
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .route("/cookies", get(cookies))
        .route("/no-content", any(|| async { StatusCode::NO_CONTENT }))
        .route("/empty", get(|| async { (StatusCode::OK, "") }))
        .route(
            "/broken-json",
            get(|| async { (StatusCode::ACCEPTED, [(header::CONTENT_TYPE, "application/json")], "{not valid json") }),
        )
        .route(
            "/text",
            get(|| async { ([(header::CONTENT_TYPE, "text/plain")], "hello") }),
        )
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"message": "no such item"}))) }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// A running forwarder; shuts down when dropped.
pub struct TestForwarder {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestForwarder {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestForwarder {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the forwarder pointed at `base_url` on an ephemeral port.
pub async fn start_forwarder(base_url: String) -> TestForwarder {
    let mut config = ForwarderConfig::default();
    config.upstream.base_url = base_url;
    start_forwarder_with(config).await
}

/// Start the forwarder with a prepared config on an ephemeral port.
pub async fn start_forwarder_with(mut config: ForwarderConfig) -> TestForwarder {
    config.listener.bind_address = "127.0.0.1:0".to_string();

    let upstream = ReqwestUpstream::from_client(client());
    let server = HttpServer::with_upstream(config, Arc::new(upstream));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestForwarder { addr, shutdown }
}
