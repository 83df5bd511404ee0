use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::evaluation::EvaluationError;
use crate::gateway::status::FAIRMATCH_STATUS_HEADER;
use crate::shortlist::ShortlistError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotReady(String),

    #[error("shortlist store is not initialized")]
    ShortlistUnavailable,

    #[error("evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("shortlist error: {0}")]
    ShortlistFailed(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<EvaluationError> for GatewayError {
    fn from(err: EvaluationError) -> Self {
        match err {
            EvaluationError::NotReady { .. } => GatewayError::NotReady(err.to_string()),
            other => GatewayError::EvaluationFailed(other.to_string()),
        }
    }
}

impl From<ShortlistError> for GatewayError {
    fn from(err: ShortlistError) -> Self {
        match err {
            ShortlistError::InvalidRecord { reason } => GatewayError::InvalidRequest(reason),
            other => GatewayError::ShortlistFailed(other.to_string()),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, fairmatch_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::NotReady(_) => (StatusCode::SERVICE_UNAVAILABLE, "not_ready"),
            GatewayError::ShortlistUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "shortlist_unavailable")
            }
            GatewayError::EvaluationFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "evaluation_error")
            }
            GatewayError::ShortlistFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "shortlist_error")
            }
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            GatewayError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            FAIRMATCH_STATUS_HEADER,
            HeaderValue::from_static(fairmatch_status),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
