//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use autoroute::config::ServerConfig;
use autoroute::{HttpServer, Shutdown};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Send one request through `router` without a socket.
pub async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    send_body(router, method, uri, Body::empty()).await
}

pub async fn send_body(router: &Router, method: Method, uri: &str, body: impl Into<Body>) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.into())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Asserts every `(method, path, status, body)` case; `None` skips the body check.
pub async fn check_cases(router: &Router, cases: &[(Method, &str, StatusCode, Option<&str>)]) {
    for (method, path, status, body) in cases {
        let (got_status, got_body) = send(router, method.clone(), path).await;
        assert_eq!(got_status, *status, "{method} {path}: body {got_body:?}");
        if let Some(body) = body {
            assert_eq!(got_body, *body, "{method} {path}");
        }
    }
}

/// Start an `HttpServer` on an ephemeral port.
pub async fn spawn_server(config: ServerConfig, routes: Router) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, routes);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}
