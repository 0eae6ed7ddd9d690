use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{info, instrument};

use crate::controllayer::health;
use crate::state::AppState;

/// GET /health
/// 200 when healthy, 503 when the database does not answer
#[instrument(skip(state), fields(service = "health_check"))]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let (status, report) = health::health_report(&state).await;
    info!(status = %report.status, backend = %report.backend, "Health check");
    (status, Json(report)).into_response()
}

/// GET /health/live
pub async fn liveness() -> StatusCode {
    health::liveness().await
}

/// GET /health/ready
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    health::readiness(&state).await
}
