//! HTTP routes
//!
//! Routes are built by explicit calls that receive the solver, so the
//! server wires everything once at startup and tests can build the same
//! filter tree without a listener.

use crate::error::{ApiError, ErrorBody, Result};
use crate::response::{ComplexMixResponse, SimpleMixResponse};
use crate::schema::{ComplexMixBody, SimpleMixBody};
use alligo_config::service::{routes, server};
use alligo_solver::MixSolver;
use bytes::Bytes;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::reply::{self, Json, WithStatus};
use warp::{Filter, Rejection, Reply};

/// Every route of the service, with rejections rendered as JSON
pub fn api(
    solver: Arc<MixSolver>,
    max_body_bytes: u64,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    service_routes()
        .or(mix_routes(solver, max_body_bytes))
        .recover(handle_rejection)
}

/// Same as [`api`], answering cross-origin requests from any browser origin
pub fn api_with_cors(
    solver: Arc<MixSolver>,
    max_body_bytes: u64,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type"]);

    service_routes()
        .or(mix_routes(solver, max_body_bytes))
        .with(cors)
        .recover(handle_rejection)
}

/// `GET /health` and `GET /status`
pub fn service_routes() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health_route = warp::path(routes::HEALTH)
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let status_route = warp::path(routes::STATUS)
        .and(warp::path::end())
        .and(warp::get())
        .map(|| {
            warp::reply::json(&serde_json::json!({
                "status": "running",
                "service": server::SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }))
        });

    health_route.or(status_route)
}

/// `POST /api/mix/simple` and `POST /api/mix/complex`
pub fn mix_routes(
    solver: Arc<MixSolver>,
    max_body_bytes: u64,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let mix_scope = warp::path(routes::API_ROOT).and(warp::path(routes::MIX_SCOPE));
    let body = warp::body::content_length_limit(max_body_bytes).and(warp::body::bytes());

    let simple = mix_scope
        .clone()
        .and(warp::path(routes::SIMPLE))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_solver(solver.clone()))
        .and(body.clone())
        .and_then(simple_mix);

    let complex = mix_scope
        .and(warp::path(routes::COMPLEX))
        .and(warp::path::end())
        .and(warp::post())
        .and(with_solver(solver))
        .and(body)
        .and_then(complex_mix);

    simple.or(complex)
}

fn with_solver(
    solver: Arc<MixSolver>,
) -> impl Filter<Extract = (Arc<MixSolver>,), Error = Infallible> + Clone {
    warp::any().map(move || solver.clone())
}

async fn simple_mix(
    solver: Arc<MixSolver>,
    body: Bytes,
) -> std::result::Result<WithStatus<Json>, Infallible> {
    Ok(respond(routes::SIMPLE, handle_simple(&solver, &body)))
}

async fn complex_mix(
    solver: Arc<MixSolver>,
    body: Bytes,
) -> std::result::Result<WithStatus<Json>, Infallible> {
    Ok(respond(routes::COMPLEX, handle_complex(&solver, &body)))
}

/// Two-component mix from a raw JSON body
pub fn handle_simple(solver: &MixSolver, body: &[u8]) -> Result<SimpleMixResponse> {
    let body: SimpleMixBody = serde_json::from_slice(body)?;
    let input = body.validate()?;
    let solution = solver.solve_pair(input.a1, input.a2, input.m, input.total)?;
    Ok(SimpleMixResponse::from(&solution))
}

/// N-component mix from a raw JSON body
pub fn handle_complex(solver: &MixSolver, body: &[u8]) -> Result<ComplexMixResponse> {
    let body: ComplexMixBody = serde_json::from_slice(body)?;
    let input = body.validate()?;
    let result = solver.solve(&input.request)?;
    Ok(ComplexMixResponse::new(
        &input.request,
        &result,
        input.mix_type,
    ))
}

fn respond<T: Serialize>(endpoint: &str, result: Result<T>) -> WithStatus<Json> {
    match result {
        Ok(body) => {
            info!(endpoint, "mix computed");
            reply::with_status(reply::json(&body), StatusCode::OK)
        }
        Err(e) => {
            if let ApiError::Mix(mix) = &e {
                if mix.is_internal() {
                    error!(endpoint, "solver self-check failed: {}", mix);
                }
            }
            warn!(endpoint, kind = e.kind(), "mix request rejected: {}", e);
            e.into_reply()
        }
    }
}

/// Render rejections from routing and body extraction as JSON errors
pub async fn handle_rejection(err: Rejection) -> std::result::Result<impl Reply, Infallible> {
    let (status, message, kind) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found", "not_found")
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "Request body too large",
            "payload_too_large",
        )
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            "Content-Length header required",
            "length_required",
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed",
            "method_not_allowed",
        )
    } else if err.find::<warp::cors::CorsForbidden>().is_some() {
        (StatusCode::FORBIDDEN, "CORS request forbidden", "cors_forbidden")
    } else {
        error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            "internal",
        )
    };

    Ok(reply::with_status(
        reply::json(&ErrorBody::new(message, kind)),
        status,
    ))
}
