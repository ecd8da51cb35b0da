//! Alligo Mix API
//!
//! JSON front end for the alligation solver: `POST /api/mix/simple` for
//! two components and `POST /api/mix/complex` for two to four, plus
//! `/health` and `/status` for supervisors.

pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod schema;
pub mod server;

pub use config::solver_config;
pub use error::{ApiError, ErrorBody, Result};
pub use response::{ComplexMixResponse, SimpleMixResponse};
pub use routes::{api, api_with_cors};
pub use schema::{ComplexMixBody, MixType, SimpleMixBody};
pub use server::MixApiServer;
