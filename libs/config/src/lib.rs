//! # Alligo Centralized Configuration
//!
//! Configuration management and shared defaults for Alligo services.
//!
//! ## Features
//!
//! - **Service Defaults**: bind address, port, route segments, log filter
//! - **Layered Loading**: defaults, then a TOML/JSON file, then `ALLIGO_*`
//!   environment variables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use alligo_config::{load_config, service};
//!
//! let config = load_config(None).expect("configuration");
//! assert!(config.server.port > 0);
//! let _ = service::routes::SIMPLE;
//! ```

pub mod service;
pub mod service_config;

// Re-export commonly used types
pub use service_config::{
    load_config, LogFormat, LoggingSettings, RatioScalingMode, ServerSettings, ServiceConfig,
    SolverSettings,
};
