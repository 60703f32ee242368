//! Startup Error Types
//!
//! Every variant is terminal for the startup sequence: the process entry
//! point reports the error and exits rather than running partially
//! configured.

/// Errors that can abort settings resolution.
///
/// `InvalidLogLevel` and `NoModeEnabled` are validation failures caused by
/// explicit operator input; `CurrentUser` is an environment failure raised
/// when the OS cannot identify the calling user.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unrecognized log level: {0:?}")]
    InvalidLogLevel(String),

    #[error("at least one of RHO_WEB or RHO_RUNNER must be enabled")]
    NoModeEnabled,

    #[error("unable to read the current OS user: {0}")]
    CurrentUser(String),
}
