//! Service Configuration Module
//!
//! Layered configuration for Alligo services: built-in defaults, then an
//! optional TOML/JSON file, then `ALLIGO_*` environment overrides.

use crate::service::{self, ENV_PREFIX, ENV_SEPARATOR};
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main service configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener settings
    pub server: ServerSettings,

    /// Log output settings
    pub logging: LoggingSettings,

    /// Ratio formatting settings
    pub solver: SolverSettings,
}

/// HTTP listener settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_address: String,
    pub port: u16,
    /// Allow cross-origin requests from browser clients
    pub enable_cors: bool,
    pub max_body_bytes: u64,
}

/// Log output settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, used when `RUST_LOG` is unset
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// How simplified ratios are lifted to integers
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RatioScalingMode {
    /// Power of ten from the longest decimal fraction
    #[default]
    Precision,
    /// Constant multiplier
    Fixed,
}

/// Ratio formatting settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SolverSettings {
    pub ratio_scaling: RatioScalingMode,
    pub max_ratio_decimals: u32,
    pub fixed_multiplier: u32,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: service::server::DEFAULT_BIND_ADDRESS.to_string(),
            port: service::server::DEFAULT_PORT,
            enable_cors: true,
            max_body_bytes: service::server::MAX_BODY_BYTES,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: service::logging::DEFAULT_FILTER.to_string(),
            format: LogFormat::Text,
        }
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            ratio_scaling: RatioScalingMode::Precision,
            max_ratio_decimals: service::solver::MAX_RATIO_DECIMALS,
            fixed_multiplier: service::solver::FIXED_MULTIPLIER,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from defaults, an optional file and environment
    /// overrides, in increasing precedence
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Config::try_from(&ServiceConfig::default())
            .context("Failed to serialize default configuration")?;

        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = path {
            info!("Loading configuration file: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        // Override with environment variables (ALLIGO_ prefix)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config: ServiceConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        debug!("Configuration resolved: {:?}", config);
        Ok(config)
    }

    /// Reject settings the services cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.bind_address.trim().is_empty() {
            bail!("server.bind_address must not be empty");
        }
        if self.server.max_body_bytes == 0 {
            bail!("server.max_body_bytes must be positive");
        }
        if self.solver.fixed_multiplier == 0 {
            bail!("solver.fixed_multiplier must be positive");
        }
        if self.solver.max_ratio_decimals > service::solver::MAX_DECIMAL_SCALE {
            bail!(
                "solver.max_ratio_decimals must be at most {}, got {}",
                service::solver::MAX_DECIMAL_SCALE,
                self.solver.max_ratio_decimals
            );
        }
        Ok(())
    }

    /// `address:port` for the listener
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    ServiceConfig::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.socket_address(), "127.0.0.1:5000");
        assert_eq!(config.solver.ratio_scaling, RatioScalingMode::Precision);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_toml_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("mix_api.toml");

        let config_content = r#"
[server]
bind_address = "0.0.0.0"
port = 8088
enable_cors = false

[solver]
ratio_scaling = "fixed"
fixed_multiplier = 100
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = ServiceConfig::load(Some(&config_path)).unwrap();

        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.server.port, 8088);
        assert!(!config.server.enable_cors);
        // untouched keys keep their defaults
        assert_eq!(config.server.max_body_bytes, service::server::MAX_BODY_BYTES);
        assert_eq!(config.solver.ratio_scaling, RatioScalingMode::Fixed);
        assert_eq!(config.solver.fixed_multiplier, 100);
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("mix_api.json");
        fs::write(&config_path, r#"{"logging": {"format": "json"}}"#).unwrap();

        let config = ServiceConfig::load(Some(&config_path)).unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = ServiceConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("bad.toml");
        fs::write(&config_path, "[solver]\nfixed_multiplier = 0\n").unwrap();

        let err = ServiceConfig::load(Some(&config_path)).unwrap_err();
        assert!(err.to_string().contains("fixed_multiplier"));
    }

    #[test]
    fn test_ratio_decimals_follow_solver_limit() {
        let mut config = ServiceConfig::default();
        assert_eq!(
            config.solver.max_ratio_decimals,
            alligo_solver::ratio::DEFAULT_MAX_RATIO_DECIMALS
        );

        config.solver.max_ratio_decimals = alligo_solver::MAX_DECIMAL_SCALE;
        assert!(config.validate().is_ok());

        config.solver.max_ratio_decimals = alligo_solver::MAX_DECIMAL_SCALE + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_ratio_decimals"));
    }

    #[test]
    fn test_environment_override() {
        std::env::set_var("ALLIGO_SOLVER__MAX_RATIO_DECIMALS", "3");
        let config = ServiceConfig::load(None);
        std::env::remove_var("ALLIGO_SOLVER__MAX_RATIO_DECIMALS");

        assert_eq!(config.unwrap().solver.max_ratio_decimals, 3);
    }
}
