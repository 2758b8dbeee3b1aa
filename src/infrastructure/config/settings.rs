//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for values container platforms inject (`GOOGLE_CLOUD_PROJECT`, `PORT`).
//!
//! # Example
//!
//! ```no_run
//! use lowstock::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::google::GoogleConfig;
use super::logging::{LoggingConfig, LOG_FORMATS};
use super::notifier::NotifierConfig;
use super::server::ServerConfig;
use crate::error::{ConfigError, Result};

/// Environment variable naming the project when `google.project_id` is empty.
pub const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";

/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "PORT";

/// Main application configuration.
///
/// Aggregates all configuration settings for the application. Load from a TOML
/// file using [`Config::load`] or parse directly with [`Config::parse_toml`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Deployment region. Informational; the platform decides placement.
    #[serde(default = "default_region")]
    pub region: String,

    /// Enable dry-run mode.
    ///
    /// When true, notifications go to an in-memory store and pushes are only
    /// logged. Defaults to false.
    #[serde(default)]
    pub dry_run: bool,

    /// Google Cloud project, endpoints, and credentials.
    #[serde(default)]
    pub google: GoogleConfig,

    /// Watched collection and alert delivery settings.
    #[serde(default)]
    pub notifier: NotifierConfig,

    /// Event receiver listener.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_region() -> String {
    "asia-southeast1".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: default_region(),
            dry_run: false,
            google: GoogleConfig::default(),
            notifier: NotifierConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content, applying process environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML content with an explicit environment
    /// lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - An environment override is not valid
    /// - Validation fails
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::build(content, env, false)
    }

    fn build<F>(content: &str, env: F, force_dry_run: bool) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.dry_run |= force_dry_run;
        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, false)
    }

    /// Load configuration from a TOML file, forcing dry-run mode on when
    /// `force_dry_run` is set.
    ///
    /// Dry-run is applied before validation, so a file without a project id
    /// loads in dry-run mode.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_with<P: AsRef<Path>>(path: P, force_dry_run: bool) -> Result<Self> {
        Self::load_with_env(path, force_dry_run, |key| std::env::var(key).ok())
    }

    /// Load configuration from a TOML file with an explicit environment
    /// lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], plus invalid environment overrides.
    pub fn load_with_env<P, F>(path: P, force_dry_run: bool, env: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::build(&content, env, force_dry_run)
    }

    /// Initialize the tracing subscriber from the logging section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.google.project_id.trim().is_empty() {
            if let Some(project) = env(PROJECT_ENV).filter(|p| !p.trim().is_empty()) {
                self.google.project_id = project.trim().to_string();
            }
        }

        if let Some(port) = env(PORT_ENV) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT",
                reason: format!("'{port}' is not a port number"),
            })?;
        }

        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "region" }.into());
        }
        if !self.dry_run && self.google.project_id.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "project_id",
            }
            .into());
        }
        if self.google.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.google.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        self.google.validate_urls()?;

        let notifier = &self.notifier;
        for (field, value) in [
            ("source_collection", &notifier.source_collection),
            ("notification_collection", &notifier.notification_collection),
            ("topic", &notifier.topic),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField { field }.into());
            }
        }
        if notifier.source_collection == notifier.notification_collection {
            return Err(ConfigError::InvalidValue {
                field: "notification_collection",
                reason: "must differ from source_collection".to_string(),
            }
            .into());
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }

        Ok(())
    }
}
