use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request payload for the query endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryRequest {
    /// Absent and `null` are both handled as the empty question.
    #[serde(default)]
    pub question: Option<String>,
}

impl QueryRequest {
    pub fn question(&self) -> &str {
        self.question.as_deref().unwrap_or_default()
    }
}

/// Response payload for the query endpoint, used for answers and failures alike
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}

impl QueryResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

/// Static service metadata returned from `GET /`
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

impl ServiceInfo {
    pub fn current() -> Self {
        let mut endpoints = BTreeMap::new();
        endpoints.insert(
            "query".to_string(),
            "/query - POST endpoint for math questions".to_string(),
        );
        Self {
            service: "Math Query Backend".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints,
        }
    }
}

/// Response payload for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Service is healthy".to_string(),
        }
    }
}

/// Body sent to `POST {ollama_url}/api/generate`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

impl<'a> GenerateRequest<'a> {
    /// Streaming is always off; only complete responses are handled.
    pub fn new(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            prompt,
            stream: false,
        }
    }
}

/// The part of the Ollama generate response the gateway reads
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_question_defaults_to_empty() {
        let request: QueryRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.question(), "");
    }

    #[test]
    fn test_null_question_reads_as_empty() {
        let request: QueryRequest = serde_json::from_value(json!({"question": null})).unwrap();
        assert_eq!(request.question(), "");

        let request: QueryRequest = serde_json::from_value(json!({"question": " ping "})).unwrap();
        assert_eq!(request.question(), " ping ");
    }

    #[test]
    fn test_generate_request_shape() {
        let body = serde_json::to_value(GenerateRequest::new("math-ping-assistant", "ping")).unwrap();
        assert_eq!(
            body,
            json!({"model": "math-ping-assistant", "prompt": "ping", "stream": false})
        );
    }

    #[test]
    fn test_generate_response_requires_string_field() {
        assert!(serde_json::from_value::<GenerateResponse>(json!({"done": true})).is_err());
        assert!(serde_json::from_value::<GenerateResponse>(json!({"response": 42})).is_err());
        let parsed: GenerateResponse =
            serde_json::from_value(json!({"model": "m", "response": "pong!!!", "done": true}))
                .unwrap();
        assert_eq!(parsed.response, "pong!!!");
    }

    #[test]
    fn test_service_info_lists_query_endpoint() {
        let info = serde_json::to_value(ServiceInfo::current()).unwrap();
        assert_eq!(info["service"], "Math Query Backend");
        assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
        assert!(info["endpoints"]["query"].as_str().unwrap().starts_with("/query"));
    }
}
