//! Per-request context passed through a handler chain.
//!
//! # Responsibilities
//! - Expose the incoming request (method, uri, headers, buffered body)
//! - Carry typed values from `Before` to the action and `After`
//! - Buffer the response until the chain finishes
//!
//! # Design Decisions
//! - The first body write commits the status; later status changes are ignored
//! - Abort only flags the context; `HandlerChain::run` decides what to skip

use axum::body::{Body, Bytes};
use axum::extract::Request;
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::{Extensions, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::http::request::X_REQUEST_ID;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

#[derive(Debug)]
pub struct Context {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    extensions: Extensions,

    status: StatusCode,
    response_headers: HeaderMap,
    response_body: Vec<u8>,
    written: bool,
    aborted: bool,
}

impl Context {
    /// Context for a request without headers or body.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            extensions: Extensions::new(),
            status: StatusCode::OK,
            response_headers: HeaderMap::new(),
            response_body: Vec::new(),
            written: false,
            aborted: false,
        }
    }

    /// Buffers the request body (up to `body_limit` bytes) and builds a context.
    pub async fn from_request(request: Request, body_limit: usize) -> Result<Self, axum::Error> {
        let (parts, body) = request.into_parts();
        let body = axum::body::to_bytes(body, body_limit).await?;

        let mut ctx = Self::new(parts.method, parts.uri);
        ctx.headers = parts.headers;
        ctx.extensions = parts.extensions;
        ctx.body = body;
        Ok(ctx)
    }

    /// Replaces the request body. Mostly useful in tests.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a request header. Mostly useful in tests.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Request header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Value of the `x-request-id` header set by the request-id layer.
    pub fn request_id(&self) -> Option<&str> {
        self.header(X_REQUEST_ID)
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Deserializes the request body as JSON.
    pub fn bind_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Stores a typed value for later handlers in the chain.
    pub fn insert<T: Clone + Send + Sync + 'static>(&mut self, value: T) -> Option<T> {
        self.extensions.insert(value)
    }

    pub fn get<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.extensions.get::<T>()
    }

    /// Sets the response status unless the body has already been written.
    pub fn status(&mut self, status: StatusCode) {
        if self.written {
            tracing::warn!(
                current = %self.status,
                ignored = %status,
                path = %self.uri.path(),
                "Response already written, status change ignored"
            );
            return;
        }
        self.status = status;
    }

    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.response_headers.insert(name, value);
    }

    /// Writes a plain-text body.
    pub fn string(&mut self, status: StatusCode, body: impl AsRef<str>) {
        self.write(status, TEXT_PLAIN, body.as_ref().as_bytes());
    }

    /// Writes a JSON body. Serialization failures become a 500.
    pub fn json<T: Serialize>(&mut self, status: StatusCode, value: &T) {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.write(status, APPLICATION_JSON, &bytes),
            Err(e) => {
                tracing::error!(error = %e, path = %self.uri.path(), "Failed to serialize response");
                self.status(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    fn write(&mut self, status: StatusCode, content_type: &'static str, bytes: &[u8]) {
        if !self.written {
            self.status = status;
        }
        self.response_headers
            .entry(header::CONTENT_TYPE)
            .or_insert(HeaderValue::from_static(content_type));
        self.response_body.extend_from_slice(bytes);
        self.written = true;
    }

    /// Stops the remaining handlers of the chain.
    pub fn abort(&mut self) {
        self.aborted = true;
    }

    pub fn abort_with_status(&mut self, status: StatusCode) {
        self.status(status);
        self.abort();
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn response_status(&self) -> StatusCode {
        self.status
    }

    pub fn response_headers(&self) -> &HeaderMap {
        &self.response_headers
    }

    pub fn response_body(&self) -> &[u8] {
        &self.response_body
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Method::GET, Uri::from_static("/"))
    }
}

impl IntoResponse for Context {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.response_body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.response_headers;
        response
    }
}
