//! Application Startup
//!
//! Orchestrates the startup sequence: resolve settings, apply the logging
//! level, then bootstrap storage. Components after startup receive the
//! resolved settings read-only.

use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::config::{Environment, Settings};
use crate::storage::Storage;
use crate::telemetry;

/// Shared state handed to route handlers and the job runner after startup.
pub struct Context<S: Storage> {
    pub settings: Arc<Settings>,
    pub storage: S,
}

impl<S: Storage> Context<S> {
    /// Resolve configuration and run the startup sequence.
    ///
    /// The logging level is applied before storage is touched, so bootstrap
    /// diagnostics come out at the operator's chosen severity. Any failure
    /// aborts startup; there is no retry.
    pub async fn initialize<E, F>(env: &E, make_storage: F) -> Result<Self>
    where
        E: Environment,
        F: FnOnce(&Settings) -> S,
    {
        let settings = Settings::resolve(env)?;

        telemetry::init_tracing(settings.log_level);

        // Summarize the loaded settings.
        tracing::info!(
            port = settings.port,
            log_level = %settings.log_level,
            mongo_url = %settings.mongo_url,
            admin_account = %settings.admin_name,
            "Initializing with loaded settings"
        );

        let storage = make_storage(&settings);
        storage.bootstrap().await.context("storage bootstrap failed")?;

        Ok(Self {
            settings: Arc::new(settings),
            storage,
        })
    }
}
