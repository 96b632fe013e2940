//! Convention-based route registration for axum.
//!
//! A controller lists its public methods in a [`MethodSet`]. The registrar
//! decodes each method name into an HTTP verb and a path segment and binds
//! the method, wrapped by the optional `Before` and `After` hooks, into a
//! [`RouteSink`]:
//!
//! ```text
//!   ControllerWidget::GetThing   →  GET  /widget/thing
//!   ControllerWidget::Post       →  POST /widget/
//!   ControllerWidget::ActionPing →  ANY  /widget/ping
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//!   convention (decode names, compose paths)
//!        │
//!   controller (method tables, handler chains, request context)
//!        │
//!   routing (registrar → RouteSink: AxumRouteSink | RouteTable)
//!        │
//!   http (server, middleware)      config / observability / lifecycle
//! ```

// Core
pub mod controller;
pub mod convention;
pub mod routing;

// Serving
pub mod demo;
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use controller::{BoxError, Context, Controller, Handler, HandlerChain, MethodSet, Receiver};
pub use convention::{Verb, VerbSpec};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{
    attach_controller, embed_controller, set_append_trailing_slash, AxumRouteSink, BindError, Registrar,
    RegistrarOptions, RegistrationError, RegistrationResult, RouteSink, RouteTable,
};
