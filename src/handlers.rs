use axum::extract::{Json, State, rejection::JsonRejection};
use axum::response::Json as ResponseJson;
use tracing::{debug, error, info, warn};

use crate::app::AppState;
use crate::error::AppError;
use crate::mapper::{self, GatewayResponse};
use crate::models::{HealthResponse, QueryRequest, ServiceInfo};
use crate::upstream::UpstreamOutcome;
use crate::validation::validate;

/// Service information handler
/// Returns static metadata about the service and its endpoints
pub async fn service_info() -> ResponseJson<ServiceInfo> {
    debug!("Service info endpoint called");
    ResponseJson(ServiceInfo::current())
}

/// Health check handler
pub async fn health_check() -> ResponseJson<HealthResponse> {
    debug!("Health check endpoint called");
    ResponseJson(HealthResponse::ok())
}

/// Query handler
/// Validates the question, forwards it to the model once and maps the outcome
pub async fn query_handler(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> GatewayResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected query body: {}", rejection.body_text());
            return AppError::BadRequest(rejection.body_text()).into();
        }
    };

    let question = match validate(request.question()) {
        Ok(question) => question,
        Err(e) => {
            warn!("Received empty question.");
            return mapper::from_validation(e);
        }
    };

    info!("Querying Ollama: {}", question);
    let outcome = state.upstream.invoke(&question).await;

    match &outcome {
        UpstreamOutcome::Success { text } => info!("Ollama response: {}", text),
        failure => error!(
            question = %question,
            kind = failure.kind(),
            detail = %failure.detail(),
            "Ollama request failed"
        ),
    }

    mapper::from_outcome(outcome)
}
