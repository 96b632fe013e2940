//! Axum adapter for the router capability.
//!
//! # Responsibilities
//! - Translate verb bindings into `MethodRouter`s on an `axum::Router`
//! - Join every route path with the sink's base path
//! - Run a handler chain per request inside a buffered `Context`
//!
//! # Design Decisions
//! - Conflicts are detected before axum sees the route (axum would panic)
//! - Request bodies are buffered up to a limit so handlers stay synchronous
//! - ANY maps to axum's `any`, which also serves methods outside the verb list
//! - A miss whose path differs from a bound route only by a trailing slash is
//!   redirected: 301 for GET, 307 otherwise (gin's `RedirectTrailingSlash`)

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, on};
use axum::Router;

use crate::controller::{Context, HandlerChain};
use crate::convention::path::join_paths;
use crate::convention::{Verb, VerbSpec};
use crate::routing::sink::{BindError, BoundRoutes, RouteSink};

/// Default request body limit (2 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Collects controller routes into an [`axum::Router`].
#[derive(Debug)]
pub struct AxumRouteSink {
    router: Router,
    base: String,
    body_limit: usize,
    bound: BoundRoutes,
}

impl AxumRouteSink {
    /// Sink rooted at `/`.
    pub fn new() -> Self {
        Self::with_base("/")
    }

    /// Sink whose routes all live under `base`, like a router group.
    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            router: Router::new(),
            base: base.into(),
            body_limit: DEFAULT_BODY_LIMIT,
            bound: BoundRoutes::new(),
        }
    }

    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Number of bindings made so far.
    pub fn route_count(&self) -> usize {
        self.bound.len()
    }

    /// Finishes the router, installing the trailing-slash redirect fallback.
    pub fn into_router(self) -> Router {
        let bound = Arc::new(self.bound);
        self.router.fallback(move |request: Request| {
            let bound = Arc::clone(&bound);
            async move { redirect_trailing_slash(&bound, &request) }
        })
    }

    fn bind(&mut self, verb: VerbSpec, path: &str, chain: HandlerChain) -> Result<(), BindError> {
        let full_path = join_paths(&self.base, path);
        self.bound.claim(verb, &full_path)?;

        let chain = Arc::new(chain);
        let body_limit = self.body_limit;
        let handler = move |request: Request| {
            let chain = Arc::clone(&chain);
            async move { run_chain(&chain, request, body_limit).await }
        };

        let method_router = match verb {
            VerbSpec::Any => any(handler),
            VerbSpec::Verb(v) => on(v.method_filter(), handler),
        };

        let router = std::mem::take(&mut self.router);
        self.router = router.route(&full_path, method_router);

        tracing::debug!(verb = %verb, path = %full_path, "Axum route added");
        Ok(())
    }
}

impl Default for AxumRouteSink {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteSink for AxumRouteSink {
    fn handle(&mut self, verb: Verb, path: &str, chain: HandlerChain) -> Result<(), BindError> {
        self.bind(VerbSpec::Verb(verb), path, chain)
    }

    fn any(&mut self, path: &str, chain: HandlerChain) -> Result<(), BindError> {
        self.bind(VerbSpec::Any, path, chain)
    }
}

/// Target of the trailing-slash redirect for `path`, if any.
fn toggle_trailing_slash(path: &str) -> Option<String> {
    match path.strip_suffix('/') {
        Some("") => None,
        Some(trimmed) => Some(trimmed.to_string()),
        None => Some(format!("{path}/")),
    }
}

fn redirect_trailing_slash(bound: &BoundRoutes, request: &Request) -> Response {
    let method = request.method();
    let target = toggle_trailing_slash(request.uri().path()).filter(|target| bound.serves(method, target));

    let Some(mut location) = target else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(query) = request.uri().query() {
        location.push('?');
        location.push_str(query);
    }

    let status = if method == Method::GET {
        StatusCode::MOVED_PERMANENTLY
    } else {
        StatusCode::TEMPORARY_REDIRECT
    };
    tracing::debug!(path = %request.uri().path(), location = %location, status = status.as_u16(), "Trailing slash redirect");

    match HeaderValue::from_str(&location) {
        Ok(value) => (status, [(header::LOCATION, value)]).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn run_chain(chain: &HandlerChain, request: Request, body_limit: usize) -> Response {
    let path = request.uri().path().to_string();

    match Context::from_request(request, body_limit).await {
        Ok(mut ctx) => {
            chain.run(&mut ctx);
            ctx.into_response()
        }
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Failed to read request body");
            (StatusCode::BAD_REQUEST, "Failed to read request body").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Handler;
    use axum::body::Body;
    use tower::ServiceExt;

    fn replying(body: &'static str) -> HandlerChain {
        HandlerChain::assemble(
            None,
            Handler::new(body, move |ctx: &mut Context| ctx.string(StatusCode::OK, body)),
            None,
        )
    }

    async fn send(router: Router, method: Method, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_verbs_share_a_path() {
        let mut sink = AxumRouteSink::new();
        sink.handle(Verb::Get, "/endpoint", replying("get")).unwrap();
        sink.handle(Verb::Post, "/endpoint", replying("post")).unwrap();
        let router = sink.into_router();

        assert_eq!(send(router.clone(), Method::GET, "/endpoint").await, (StatusCode::OK, "get".into()));
        assert_eq!(send(router.clone(), Method::POST, "/endpoint").await, (StatusCode::OK, "post".into()));
        assert_eq!(send(router, Method::PUT, "/endpoint").await.0, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_any_and_base() {
        let mut sink = AxumRouteSink::with_base("/api");
        sink.any("/known", replying("known")).unwrap();
        sink.handle(Verb::Get, "/", replying("index")).unwrap();
        assert_eq!(sink.route_count(), 2);
        let router = sink.into_router();

        for method in [Method::GET, Method::POST, Method::PUT, Method::PATCH] {
            assert_eq!(send(router.clone(), method, "/api/known").await.1, "known");
        }
        assert_eq!(send(router.clone(), Method::GET, "/api/").await.1, "index");
        assert_eq!(send(router, Method::GET, "/known").await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_trailing_slash_redirect() {
        let mut sink = AxumRouteSink::new();
        sink.any("/known", replying("known")).unwrap();
        sink.handle(Verb::Get, "/widget/", replying("index")).unwrap();
        let router = sink.into_router();

        let request = Request::builder().uri("/known/?a=1").body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "/known?a=1");

        let request = Request::builder()
            .method(Method::POST)
            .uri("/known/")
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/known");

        let request = Request::builder().uri("/widget").body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "/widget/");

        // Only redirect when the other form serves the method.
        assert_eq!(send(router.clone(), Method::POST, "/widget").await.0, StatusCode::NOT_FOUND);
        assert_eq!(send(router, Method::GET, "/unknown/").await.0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_does_not_reach_axum() {
        let mut sink = AxumRouteSink::new();
        sink.any("/known", replying("a")).unwrap();
        let err = sink.handle(Verb::Get, "/known", replying("b")).unwrap_err();
        assert!(matches!(err, BindError::Conflict { .. }));
        assert_eq!(sink.route_count(), 1);
    }

    #[tokio::test]
    async fn test_body_limit() {
        let mut sink = AxumRouteSink::new().body_limit(4);
        sink.handle(Verb::Post, "/upload", replying("ok")).unwrap();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/upload")
            .body(Body::from("too large"))
            .unwrap();
        let response = sink.into_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
