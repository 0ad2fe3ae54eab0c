use axum::http::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::validation::ValidationError;

/// Every way a query can fail. The `Display` text is what the caller sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("Ollama service timeout: Request exceeded {} seconds", format_secs(.0))]
    UpstreamTimeout(Duration),

    #[error("Ollama service unavailable: Connection refused")]
    UpstreamUnreachable,

    /// Bad status, undecodable body, or any other unexpected upstream failure.
    #[error("Ollama service error: {0}")]
    UpstreamProtocol(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::UpstreamUnreachable | AppError::UpstreamProtocol(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Whole seconds print without a fraction ("180"), anything else with one decimal ("0.5").
fn format_secs(duration: &Duration) -> String {
    if duration.subsec_nanos() == 0 {
        duration.as_secs().to_string()
    } else {
        format!("{:.1}", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses() {
        assert_eq!(
            AppError::from(ValidationError::Empty).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UpstreamTimeout(Duration::from_secs(180)).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            AppError::UpstreamUnreachable.status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::from(ValidationError::Empty).to_string(),
            "Question cannot be empty."
        );
        assert_eq!(
            AppError::UpstreamTimeout(Duration::from_secs(180)).to_string(),
            "Ollama service timeout: Request exceeded 180 seconds"
        );
        assert_eq!(
            AppError::UpstreamTimeout(Duration::from_millis(500)).to_string(),
            "Ollama service timeout: Request exceeded 0.5 seconds"
        );
    }
}
