//! The demo service over a real socket.

use autoroute::config::ServerConfig;
use autoroute::demo::{self, Note};
use autoroute::routing::{AxumRouteSink, Registrar};
use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

fn demo_routes() -> axum::Router {
    let mut sink = AxumRouteSink::with_base("/api");
    demo::register_all(&Registrar::default(), &mut sink).unwrap();
    sink.into_router()
}

#[tokio::test]
async fn test_demo_over_http() {
    let (addr, shutdown) = common::spawn_server(ServerConfig::default(), demo_routes()).await;
    let base = format!("http://{addr}/api");
    let client = reqwest::Client::new();

    let res = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "status": "ok" }));

    let res = client
        .post(format!("{base}/notes/"))
        .json(&json!({ "text": "buy milk" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let note: Note = res.json().await.unwrap();
    assert_eq!(note.text, "buy milk");

    let notes: Vec<Note> = client
        .get(format!("{base}/notes/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(notes.len(), 2);

    let res = client.patch(format!("{base}/notes/ping")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "pong");

    let res = client.put(format!("{base}/notes/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_passthrough() {
    let (addr, shutdown) = common::spawn_server(ServerConfig::default(), demo_routes()).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("http://{addr}/api/"))
        .header("x-request-id", "req-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "req-42");
    assert!(res.text().await.unwrap().starts_with("autoroute "));

    shutdown.trigger();
}
