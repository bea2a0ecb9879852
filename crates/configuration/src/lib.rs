use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    AuthSettings, Config, DashboardSettings, DatabaseSettings, LoggingSettings,
    MAX_SESSION_TTL_MINUTES, ServerOverrides, ServerSettings,
};

/// Prefix of environment variables that override file values,
/// e.g. `WORKFORCE__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "WORKFORCE";

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the configuration file,
/// layers environment overrides on top, deserializes it into our strongly-typed `Config`
/// struct and validates it.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
