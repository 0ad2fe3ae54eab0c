//! Translation of validation results and upstream outcomes into the client contract.
//!
//! Every function here is pure: the same input always yields the same status and body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::models::QueryResponse;
use crate::upstream::UpstreamOutcome;
use crate::validation::ValidationError;

/// The single externally visible result of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub body: QueryResponse,
}

impl GatewayResponse {
    pub fn answer(text: String) -> Self {
        Self {
            status: StatusCode::OK,
            body: QueryResponse::new(text),
        }
    }
}

impl From<AppError> for GatewayResponse {
    fn from(err: AppError) -> Self {
        Self {
            status: err.status(),
            body: QueryResponse::new(err.to_string()),
        }
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn from_validation(err: ValidationError) -> GatewayResponse {
    AppError::from(err).into()
}

/// Splits an outcome into the answer text or the error it stands for.
pub fn classify(outcome: UpstreamOutcome) -> Result<String, AppError> {
    match outcome {
        UpstreamOutcome::Success { text } => Ok(text),
        UpstreamOutcome::Timeout { after } => Err(AppError::UpstreamTimeout(after)),
        UpstreamOutcome::ConnectionFailure { .. } => Err(AppError::UpstreamUnreachable),
        UpstreamOutcome::HttpError { status, .. } => Err(AppError::UpstreamProtocol(format!(
            "upstream returned HTTP {}",
            status
        ))),
        UpstreamOutcome::DecodeFailure { detail, .. } => Err(AppError::UpstreamProtocol(
            format!("invalid response body ({})", detail),
        )),
        // Catch-all arm; the caller logs the full outcome before mapping.
        UpstreamOutcome::Other { detail } => Err(AppError::UpstreamProtocol(detail)),
    }
}

pub fn from_outcome(outcome: UpstreamOutcome) -> GatewayResponse {
    match classify(outcome) {
        Ok(text) => GatewayResponse::answer(text),
        Err(err) => err.into(),
    }
}
