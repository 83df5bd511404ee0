use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::evaluation::MatchRequest;
use crate::gateway::error::GatewayError;
use crate::gateway::state::AppState;
use crate::gateway::status::{
    FAIRMATCH_STATUS_HEADER, FAIRMATCH_STATUS_OK, FAIRMATCH_STATUS_STORED, MatchStatus,
};
use crate::shortlist::ShortlistRequest;

pub const SHORTLIST_SAVED_MESSAGE: &str = "Candidate saved successfully.";

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ShortlistResponse {
    pub message: String,
    pub id: String,
}

/// Scores a job description against a resume and attaches the fairness snapshot.
#[instrument(skip(state, payload), fields(is_good_match = tracing::field::Empty))]
pub async fn match_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    // Not-ready answers the same for every body and never reaches the blocking pool.
    state.evaluator.context()?;

    let request: MatchRequest = parse_body(payload)?;

    let evaluator = state.evaluator.clone();
    let result = tokio::task::spawn_blocking(move || evaluator.evaluate(&request))
        .await
        .map_err(|e| GatewayError::InternalError(format!("Evaluation task failed: {}", e)))??;

    tracing::Span::current().record("is_good_match", result.is_good_match);
    info!(
        similarity = result.bert_similarity_score,
        candidate_id = %result.candidate_id,
        "Match evaluated"
    );

    let status = MatchStatus::from_decision(result.is_good_match);
    Ok((StatusCode::OK, status_headers(status.as_header_value()), Json(result)).into_response())
}

/// Stores a shortlisted candidate.
#[instrument(skip(state, payload))]
pub async fn shortlist_candidate_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let store = state
        .shortlist_store()
        .ok_or(GatewayError::ShortlistUnavailable)?
        .clone();

    let request: ShortlistRequest = parse_body(payload)?;
    let record = store.create(request).await?;

    info!(id = %record.id, candidate_id = %record.candidate.candidate_id, "Candidate shortlisted");

    Ok((
        StatusCode::OK,
        status_headers(FAIRMATCH_STATUS_STORED),
        Json(ShortlistResponse {
            message: SHORTLIST_SAVED_MESSAGE.to_string(),
            id: record.id,
        }),
    )
        .into_response())
}

/// Lists shortlisted candidates in insertion order.
#[instrument(skip(state))]
pub async fn list_shortlisted_handler(
    State(state): State<AppState>,
) -> Result<Response, GatewayError> {
    let store = state
        .shortlist_store()
        .ok_or(GatewayError::ShortlistUnavailable)?;

    let records = store.list().await?;
    debug!(count = records.len(), "Listing shortlisted candidates");

    Ok((StatusCode::OK, status_headers(FAIRMATCH_STATUS_OK), Json(records)).into_response())
}

pub(crate) fn parse_body<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, GatewayError> {
    let Json(body) = payload.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    // Derived structs also accept positional arrays.
    if !body.is_object() {
        return Err(GatewayError::InvalidRequest(
            "request body must be a JSON object".to_string(),
        ));
    }
    serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))
}

pub(crate) fn status_headers(value: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(FAIRMATCH_STATUS_HEADER, HeaderValue::from_static(value));
    headers
}
