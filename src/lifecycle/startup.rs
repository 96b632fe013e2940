//! Startup orchestration.
//!
//! # Responsibilities
//! - Install logging and the metrics exporter from configuration
//! - Publish the routing options before any controller is registered
//! - Create the route sink controllers are registered into
//!
//! # Design Decisions
//! - Fail fast: a logging setup error is fatal
//! - Listeners start last (traffic only when every controller is bound)

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::AppConfig;
use crate::observability::{logging, metrics};
use crate::routing::{set_append_trailing_slash, AxumRouteSink};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to install log subscriber: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),
}

/// Initializes process-wide state. Call once, from within the runtime.
pub fn init(config: &AppConfig) -> Result<(), StartupError> {
    logging::init_logging(&config.observability)?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr);
    }

    apply_routing(config);
    Ok(())
}

/// Publishes the configured trailing-slash policy to the global registrar flag.
pub fn apply_routing(config: &AppConfig) {
    set_append_trailing_slash(config.routing.append_trailing_slash);
    tracing::debug!(
        append_trailing_slash = config.routing.append_trailing_slash,
        base_path = %config.routing.base_path,
        "Routing options applied"
    );
}

/// Sink mounted at the configured base path with the configured body limit.
pub fn route_sink(config: &AppConfig) -> AxumRouteSink {
    AxumRouteSink::with_base(config.routing.base_path.clone()).body_limit(config.server.body_limit_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_sink_uses_config() {
        let mut config = AppConfig::default();
        config.routing.base_path = "/api".into();
        let sink = route_sink(&config);
        assert_eq!(sink.base(), "/api");
        assert_eq!(sink.route_count(), 0);
    }
}
