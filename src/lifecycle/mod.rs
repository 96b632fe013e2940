//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Logging & metrics → Routing options → Register controllers → Listen
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → Stop accepting → Drain connections → Exit
//! ```

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{init, route_sink, StartupError};
