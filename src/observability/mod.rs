//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registrar and route adapters produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (route and failure counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Metrics are no-ops until a recorder is installed, so library users pay nothing

pub mod logging;
pub mod metrics;
