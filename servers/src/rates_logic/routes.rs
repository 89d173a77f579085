//! HTTP routes. Each operation's envelope maps straight onto the response:
//! `statusCode` becomes the HTTP status and `body` the JSON payload.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use lib_rates::Envelope;

use crate::rates_logic::state::AppState;

/// Builds the router over `state`.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/rates", get(report_handler))
        .route("/ingest", post(ingest_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn envelope_response(envelope: Envelope) -> Response {
    let status = StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope.body)).into_response()
}

async fn report_handler(State(state): State<AppState>) -> Response {
    envelope_response(state.reporter.report().await)
}

async fn ingest_handler(State(state): State<AppState>) -> Response {
    envelope_response(state.ingestor.ingest().await)
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
