//! Connection settings for Prism Central
//!
//! Settings are read from the process environment:
//!
//! | variable | required | default |
//! |---|---|---|
//! | `PRISM_CENTRAL_HOST` | yes | |
//! | `PRISM_CENTRAL_USERNAME` | yes | |
//! | `PRISM_CENTRAL_PASSWORD` | yes | |
//! | `VERIFY_SSL` | no | `true` |
//! | `PRISM_CENTRAL_PORT` | no | `9440` |
//! | `PRISM_CENTRAL_TIMEOUT_SECS` | no | `60` |
//! | `PRISM_CENTRAL_MAX_ATTEMPTS` | no | `3` |

use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub const HOST_VAR: &str = "PRISM_CENTRAL_HOST";
pub const USERNAME_VAR: &str = "PRISM_CENTRAL_USERNAME";
pub const PASSWORD_VAR: &str = "PRISM_CENTRAL_PASSWORD";
pub const VERIFY_SSL_VAR: &str = "VERIFY_SSL";
pub const PORT_VAR: &str = "PRISM_CENTRAL_PORT";
pub const TIMEOUT_VAR: &str = "PRISM_CENTRAL_TIMEOUT_SECS";
pub const MAX_ATTEMPTS_VAR: &str = "PRISM_CENTRAL_MAX_ATTEMPTS";

/// Errors raised while reading connection settings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required variables are unset or empty
    #[error("{} must be set", .0.join(", "))]
    Missing(Vec<&'static str>),

    /// An optional variable holds a value that cannot be parsed
    #[error("invalid value for {var}: {value:?}")]
    Invalid {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },
}

/// Everything needed to open an authenticated session
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Prism Central address, without scheme or port
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Verify the server certificate
    pub verify_ssl: bool,
    /// Per-request deadline
    pub timeout: Duration,
    /// Attempts per request, including the first one
    pub max_attempts: u32,
    /// Delay before the first retry; doubled on each further retry
    pub initial_backoff: Duration,
}

impl ConnectionConfig {
    /// Create a config with default port, TLS verification and retry policy
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            username: username.into(),
            password: password.into(),
            verify_ssl: true,
            timeout: default_timeout(),
            max_attempts: default_max_attempts(),
            initial_backoff: Duration::from_millis(500),
        }
    }

    /// Load settings from the process environment
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or an optional one
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load settings through an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or an optional one
    /// cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| lookup(var).filter(|v| !v.is_empty());

        let host = required(HOST_VAR);
        let username = required(USERNAME_VAR);
        let password = required(PASSWORD_VAR);

        let (Some(host), Some(username), Some(password)) = (host, username, password) else {
            let missing = [HOST_VAR, USERNAME_VAR, PASSWORD_VAR]
                .into_iter()
                .filter(|var| required(*var).is_none())
                .collect();
            return Err(ConfigError::Missing(missing));
        };

        let mut config = Self::new(host, username, password);

        // Anything other than "true" disables verification
        if let Some(value) = lookup(VERIFY_SSL_VAR) {
            config.verify_ssl = value.eq_ignore_ascii_case("true");
        }
        if let Some(value) = lookup(PORT_VAR) {
            config.port = parse_var(PORT_VAR, &value)?;
        }
        if let Some(value) = lookup(TIMEOUT_VAR) {
            config.timeout = Duration::from_secs(parse_var(TIMEOUT_VAR, &value)?);
        }
        if let Some(value) = lookup(MAX_ATTEMPTS_VAR) {
            let attempts: u32 = parse_var(MAX_ATTEMPTS_VAR, &value)?;
            if attempts == 0 {
                return Err(ConfigError::Invalid {
                    var: MAX_ATTEMPTS_VAR,
                    value,
                });
            }
            config.max_attempts = attempts;
        }

        Ok(config)
    }

    /// Base URL of the v3 API
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("https://{}:{}/api/nutanix/v3/", self.host, self.port)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .field("initial_backoff", &self.initial_backoff)
            .finish()
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

fn default_port() -> u16 {
    9440
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_max_attempts() -> u32 {
    3
}
