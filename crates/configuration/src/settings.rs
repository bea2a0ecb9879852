use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the HTTP API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    /// Largest accepted request body, in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_body_limit() -> usize {
    1024 * 1024
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Connection pool tuning. The URL itself comes from `DATABASE_URL`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

impl DatabaseSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

/// Longest accepted login lifetime: one year.
pub const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Created on startup when no user exists yet.
    pub default_admin_username: String,
    pub default_admin_password: String,
    /// How long a login token stays valid.
    pub session_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Number of bars in the salary distribution chart.
    pub salary_histogram_bins: usize,
    /// Insert the demo employees into an empty store on startup.
    pub seed_sample_data: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            salary_histogram_bins: 10,
            seed_sample_data: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG` when set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "workforce.log".to_string(),
        }
    }
}

/// Command-line overrides for the server section.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ServerOverrides {
    /// Address to bind instead of the configured host.
    #[cfg_attr(feature = "clap", arg(long))]
    pub host: Option<IpAddr>,
    /// Port to bind instead of the configured port.
    #[cfg_attr(feature = "clap", arg(long))]
    pub port: Option<u16>,
}

impl Config {
    /// Checks the values that deserialization alone cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.salary_histogram_bins == 0 {
            return Err(ConfigError::ValidationError(
                "dashboard.salary_histogram_bins must be at least 1".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&self.auth.session_ttl_minutes) {
            return Err(ConfigError::ValidationError(format!(
                "auth.session_ttl_minutes must be between 1 and {}",
                MAX_SESSION_TTL_MINUTES
            )));
        }
        if self.auth.default_admin_username.trim().is_empty()
            || self.auth.default_admin_password.trim().is_empty()
        {
            return Err(ConfigError::ValidationError(
                "auth.default_admin_username and auth.default_admin_password must be set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ServerOverrides) {
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
    }
}
