//! # Configuration Module
//!
//! This module resolves the service configuration from the environment.
//! Settings come from:
//! - Environment variables (prefixed with RHO_)
//! - Two unprefixed fallbacks (DOCKER_HOST, DOCKER_CERT_PATH)
//! - The current user's home directory, for default TLS material paths
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use frontdoor::config::Settings;
//!
//! let settings = Settings::from_process_env()?;
//! println!("Server will listen on {}", settings.listen_addr());
//! ```

mod settings;

pub use settings::*;
