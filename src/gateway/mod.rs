//! HTTP gateway (Axum) for match scoring and shortlisting.
//!
//! This module is primarily used by the `fairmatch` server binary.

pub mod error;
pub mod handler;
pub mod state;
pub mod status;


use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, Uri, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use error::GatewayError;
pub use handler::{list_shortlisted_handler, match_handler, shortlist_candidate_handler};
pub use state::AppState;
pub use status::{
    FAIRMATCH_STATUS_DISABLED, FAIRMATCH_STATUS_ERROR, FAIRMATCH_STATUS_HEADER,
    FAIRMATCH_STATUS_HEALTHY, FAIRMATCH_STATUS_NOT_READY, FAIRMATCH_STATUS_OK,
    FAIRMATCH_STATUS_READY, FAIRMATCH_STATUS_STORED, MatchStatus,
};

use crate::evaluation::Component;
use handler::status_headers;

pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/match", post(match_handler))
        .route("/shortlist_candidate", post(shortlist_candidate_handler))
        .route("/get_shortlisted_candidates", get(list_shortlisted_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured browser origins, with credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub encoder: &'static str,
    pub dataset: &'static str,
    pub classifier: &'static str,
    pub shortlist: &'static str,
    pub encoder_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        status_headers(FAIRMATCH_STATUS_HEALTHY),
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let evaluator = &state.evaluator;
    let component = |c: Component| {
        if evaluator.component_ready(c) {
            FAIRMATCH_STATUS_READY
        } else {
            FAIRMATCH_STATUS_ERROR
        }
    };

    let encoder_mode = match evaluator.encoder_stub() {
        Some(true) => "stub",
        Some(false) => "real",
        None => "unavailable",
    };

    let components = ComponentStatus {
        http: FAIRMATCH_STATUS_READY,
        encoder: component(Component::Encoder),
        dataset: component(Component::Dataset),
        classifier: component(Component::Classifier),
        shortlist: if state.shortlist.is_some() {
            FAIRMATCH_STATUS_READY
        } else {
            FAIRMATCH_STATUS_DISABLED
        },
        encoder_mode,
    };

    let is_ready = evaluator.is_ready();
    let (status_code, status_msg) = if is_ready {
        (StatusCode::OK, FAIRMATCH_STATUS_OK)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, FAIRMATCH_STATUS_NOT_READY)
    };

    let failures = evaluator
        .failures()
        .iter()
        .map(|f| format!("{}: {}", f.component, f.reason))
        .collect();

    (
        status_code,
        status_headers(status_msg),
        Json(ReadyResponse {
            status: status_msg,
            components,
            failures,
        }),
    )
        .into_response()
}

pub async fn not_found_handler(uri: Uri) -> GatewayError {
    GatewayError::NotFound(uri.path().to_string())
}
