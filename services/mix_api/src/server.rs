//! Mix API server

use crate::config::solver_config;
use crate::error::{ApiError, Result};
use crate::routes;
use alligo_config::ServiceConfig;
use alligo_solver::MixSolver;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// HTTP front end for the mix solver
pub struct MixApiServer {
    config: ServiceConfig,
    solver: Arc<MixSolver>,
}

impl MixApiServer {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let solver = Arc::new(MixSolver::new(solver_config(&config.solver)?));

        Ok(Self { config, solver })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn solver(&self) -> &MixSolver {
        &self.solver
    }

    /// Serve until `shutdown` resolves; in-flight requests are drained
    pub async fn run<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self
            .config
            .socket_address()
            .parse()
            .map_err(|e| ApiError::Configuration {
                message: format!("Invalid bind address: {}", e),
            })?;

        let max_body_bytes = self.config.server.max_body_bytes;
        let solver = self.solver.clone();

        if self.config.server.enable_cors {
            let (bound, server) = warp::serve(routes::api_with_cors(solver, max_body_bytes))
                .try_bind_with_graceful_shutdown(addr, shutdown)?;
            info!("Mix API listening on {} (CORS enabled)", bound);
            server.await;
        } else {
            let (bound, server) = warp::serve(routes::api(solver, max_body_bytes))
                .try_bind_with_graceful_shutdown(addr, shutdown)?;
            info!("Mix API listening on {}", bound);
            server.await;
        }

        info!("Mix API stopped");
        Ok(())
    }
}
