//! Telemetry and Observability
//!
//! Structured logging setup at the resolved severity.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogLevel;

/// Initialize the tracing subscriber at the resolved log level.
///
/// `RUST_LOG` takes precedence when set, so operators can widen or narrow
/// individual targets without changing the service configuration.
pub fn init_tracing(level: LogLevel) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.directive()));

    let fmt_layer = fmt::layer().with_target(true);

    // try_init: repeated initialization (tests, embedding) is a no-op.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
