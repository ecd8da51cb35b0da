//! Service defaults
//!
//! Default values and well-known names shared by Alligo services.

/// Prefix for environment variable overrides (`ALLIGO_SERVER__PORT=...`)
pub const ENV_PREFIX: &str = "ALLIGO";

/// Separator between nested keys in environment overrides
pub const ENV_SEPARATOR: &str = "__";

/// Mix API server defaults
pub mod server {
    /// Service name reported by the status endpoint
    pub const SERVICE_NAME: &str = "alligo-mix-api";

    pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

    pub const DEFAULT_PORT: u16 = 5000;

    /// Largest accepted JSON request body (bytes)
    pub const MAX_BODY_BYTES: u64 = 16 * 1024;
}

/// Route segments: `/api/mix/simple`, `/api/mix/complex`
pub mod routes {
    pub const API_ROOT: &str = "api";
    pub const MIX_SCOPE: &str = "mix";
    pub const SIMPLE: &str = "simple";
    pub const COMPLEX: &str = "complex";
    pub const HEALTH: &str = "health";
    pub const STATUS: &str = "status";
}

/// Logging defaults
pub mod logging {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub const DEFAULT_FILTER: &str = "alligo_mix_api=info,alligo_solver=info,warn";
}

/// Ratio formatting defaults, taken from the solver
pub mod solver {
    pub use alligo_solver::ratio::{
        DEFAULT_FIXED_MULTIPLIER as FIXED_MULTIPLIER,
        DEFAULT_MAX_RATIO_DECIMALS as MAX_RATIO_DECIMALS, MAX_DECIMAL_SCALE,
    };
}
