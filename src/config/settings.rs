//! Application settings and the environment resolution pipeline.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::SettingsError;

/// Prefix for the service's own environment variable family
/// (`RHO_PORT`, `RHO_LOGLEVEL`, ...).
pub const ENV_PREFIX: &str = "RHO";

/// Well-known container runtime address, read only as a fallback when
/// `RHO_DOCKERHOST` is unset.
const DOCKER_HOST_VAR: &str = "DOCKER_HOST";

/// Well-known certificate directory, read only as a fallback root for the
/// three TLS material paths.
const DOCKER_CERT_PATH_VAR: &str = "DOCKER_CERT_PATH";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MONGO_URL: &str = "mongo";
const DEFAULT_POLL_MS: u64 = 500;
const DEFAULT_IMAGE: &str = "cloudpipe/runner-py2";
const DEFAULT_DOCKER_HOST: &str = "unix:///var/run/docker.sock";

/// Source of raw configuration input.
///
/// Resolution depends on distinguishing a variable that is absent from one
/// that is present but empty, so lookups return `Option` rather than a
/// zero-value default. Abstracting the process environment behind this trait
/// keeps [`Settings::resolve`] a pure function of its inputs.
pub trait Environment {
    /// Look up a variable by exact name. `None` when absent.
    fn var(&self, name: &str) -> Option<String>;

    /// The current OS user's home directory.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::CurrentUser` when the OS cannot identify the
    /// calling user.
    fn home_dir(&self) -> Result<PathBuf, SettingsError>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn home_dir(&self) -> Result<PathBuf, SettingsError> {
        dirs::home_dir().ok_or_else(|| {
            SettingsError::CurrentUser("no home directory for the current user".into())
        })
    }
}

/// Minimum severity logged by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl LogLevel {
    /// The level's canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
            LogLevel::Panic => "panic",
        }
    }

    /// Filter directive for the tracing subscriber.
    ///
    /// `fatal` and `panic` remain valid configuration but tracing has no
    /// level above `error`, so both collapse to it.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error | LogLevel::Fatal | LogLevel::Panic => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            "panic" => Ok(LogLevel::Panic),
            other => Err(SettingsError::InvalidLogLevel(other.to_string())),
        }
    }
}

/// Resolved configuration for a front door process.
///
/// Constructed once at startup by [`Settings::resolve`] and immutable
/// afterwards; the orchestrator shares it read-only across components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// TCP port the service listens on.
    pub port: u16,

    /// Minimum severity logged.
    pub log_level: LogLevel,

    /// MongoDB connection address.
    pub mongo_url: String,

    /// Administrator account identifier.
    pub admin_name: String,

    /// Administrator API credential.
    pub admin_key: String,

    /// Address of the container runtime.
    pub docker_host: String,

    /// Whether to use TLS with the container runtime.
    pub docker_tls: bool,

    /// CA certificate location.
    pub docker_ca_cert: PathBuf,

    /// Client certificate location.
    pub docker_cert: PathBuf,

    /// Client key location.
    pub docker_key: PathBuf,

    /// Default container image for submitted jobs.
    pub image: String,

    /// Job runner polling interval in milliseconds.
    pub poll: u64,

    /// Serve the web front-end.
    pub web: bool,

    /// Run the job runner worker.
    pub runner: bool,
}

impl Settings {
    /// Resolve settings from the live process environment, loading a `.env`
    /// file first if one is present.
    pub fn from_process_env() -> Result<Self, SettingsError> {
        let _ = dotenvy::dotenv();
        Self::resolve(&ProcessEnvironment)
    }

    /// Load configuration from `env`, apply layered defaults, and validate.
    ///
    /// Fields whose variable is absent, empty, or unparseable take their
    /// default; resolution is strict only about the log level, the
    /// double-disabled modes, and the current-user lookup.
    pub fn resolve<E: Environment>(env: &E) -> Result<Self, SettingsError> {
        // Raw presence of the mode variables feeds the default-mode rule
        // below, which must tell "absent" apart from "set to a falsy value".
        let raw_web = prefixed(env, "WEB");
        let raw_runner = prefixed(env, "RUNNER");

        let port = prefixed(env, "PORT")
            .and_then(|v| v.parse::<u16>().ok())
            .filter(|p| *p != 0)
            .unwrap_or(DEFAULT_PORT);

        let log_level = match prefixed(env, "LOGLEVEL") {
            Some(raw) => raw.parse()?,
            None => LogLevel::Info,
        };

        let mongo_url =
            prefixed(env, "MONGOURL").unwrap_or_else(|| DEFAULT_MONGO_URL.to_string());
        let admin_name = prefixed(env, "ADMINNAME").unwrap_or_default();
        let admin_key = prefixed(env, "ADMINKEY").unwrap_or_default();
        let image = prefixed(env, "IMAGE").unwrap_or_else(|| DEFAULT_IMAGE.to_string());

        let poll = prefixed(env, "POLL")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|p| *p != 0)
            .unwrap_or(DEFAULT_POLL_MS);

        let docker_host = prefixed(env, "DOCKERHOST")
            .or_else(|| nonempty(env.var(DOCKER_HOST_VAR)))
            .unwrap_or_else(|| DEFAULT_DOCKER_HOST.to_string());

        let docker_tls = prefixed(env, "DOCKERTLS")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(false);

        // All three defaulted TLS paths hang off one certificate root, which
        // is resolved even when every path is set explicitly.
        let cert_root = match nonempty(env.var(DOCKER_CERT_PATH_VAR)) {
            Some(root) => PathBuf::from(root),
            None => env.home_dir()?.join(".docker"),
        };

        let docker_ca_cert = prefixed(env, "DOCKERCACERT")
            .map(PathBuf::from)
            .unwrap_or_else(|| cert_root.join("ca.pem"));
        let docker_cert = prefixed(env, "DOCKERCERT")
            .map(PathBuf::from)
            .unwrap_or_else(|| cert_root.join("cert.pem"));
        let docker_key = prefixed(env, "DOCKERKEY")
            .map(PathBuf::from)
            .unwrap_or_else(|| cert_root.join("key.pem"));

        let mut web = raw_web.as_deref().and_then(parse_bool).unwrap_or(false);
        let mut runner = raw_runner.as_deref().and_then(parse_bool).unwrap_or(false);

        // If neither mode was enabled, enable both, unless the operator set
        // both variables to falsy values on purpose.
        if !web && !runner {
            if raw_web.is_some() && raw_runner.is_some() {
                return Err(SettingsError::NoModeEnabled);
            }
            web = true;
            runner = true;
        }

        Ok(Settings {
            port,
            log_level,
            mongo_url,
            admin_name,
            admin_key,
            docker_host,
            docker_tls,
            docker_ca_cert,
            docker_cert,
            docker_key,
            image,
            poll,
            web,
            runner,
        })
    }

    /// Address to bind the HTTP server to, e.g. `":8000"`.
    pub fn listen_addr(&self) -> String {
        format!(":{}", self.port)
    }
}

/// Look up a service-prefixed variable, treating present-but-empty as unset.
fn prefixed<E: Environment>(env: &E, name: &str) -> Option<String> {
    nonempty(env.var(&format!("{ENV_PREFIX}_{name}")))
}

fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Accepted boolean forms: `1/t/true` and `0/f/false` in canonical casings.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "True" | "TRUE" => Some(true),
        "0" | "f" | "F" | "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;

    #[test_case("trace", LogLevel::Trace)]
    #[test_case("debug", LogLevel::Debug)]
    #[test_case("info", LogLevel::Info)]
    #[test_case("warn", LogLevel::Warn)]
    #[test_case("error", LogLevel::Error)]
    #[test_case("fatal", LogLevel::Fatal)]
    #[test_case("panic", LogLevel::Panic)]
    fn test_log_level_parses(raw: &str, expected: LogLevel) {
        assert_eq!(raw.parse::<LogLevel>().unwrap(), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[test]
    fn test_log_level_rejects_unknown() {
        let err = "Walrus".parse::<LogLevel>().unwrap_err();
        assert!(matches!(err, SettingsError::InvalidLogLevel(v) if v == "Walrus"));
    }

    #[test]
    fn test_log_level_is_case_sensitive() {
        assert!("INFO".parse::<LogLevel>().is_err());
    }

    #[test_case(LogLevel::Fatal)]
    #[test_case(LogLevel::Panic)]
    fn test_directive_caps_at_error(level: LogLevel) {
        assert_eq!(level.directive(), "error");
    }

    #[test_case("1", Some(true))]
    #[test_case("t", Some(true))]
    #[test_case("True", Some(true))]
    #[test_case("0", Some(false))]
    #[test_case("False", Some(false))]
    #[test_case("yes", None)]
    #[test_case("", None)]
    fn test_parse_bool(raw: &str, expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }
}
