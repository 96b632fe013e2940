//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Controller registration (at startup):
//!     attach_controller / embed_controller
//!     → registrar.rs (receiver check, hooks, Init)
//!     → convention (decode name, compose path)
//!     → sink.rs RouteSink::handle / RouteSink::any
//!         → axum_sink.rs (axum::Router for serving)
//!         → table.rs (in-memory table for listing and tests)
//! ```
//!
//! # Design Decisions
//! - Routes are bound at startup and immutable afterwards
//! - Registration is synchronous and does no I/O
//! - Bindings are not transactional: an error keeps earlier routes
//! - Duplicate (verb, path) bindings are rejected by the sinks

pub mod axum_sink;
pub mod error;
pub mod registrar;
pub mod sink;
pub mod table;

pub use axum_sink::AxumRouteSink;
pub use error::{RegistrationError, RegistrationResult};
pub use registrar::{
    append_trailing_slash, attach_controller, embed_controller, set_append_trailing_slash, Registrar,
    RegistrarOptions,
};
pub use sink::{BindError, RouteSink};
pub use table::{RouteEntry, RouteSummary, RouteTable};
