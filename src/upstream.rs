use async_trait::async_trait;
use reqwest::StatusCode;
use std::error::Error as StdError;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{GenerateRequest, GenerateResponse};
use crate::validation::NormalizedQuestion;

/// Classification of a single call to the inference service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamOutcome {
    /// Trimmed answer text. An empty answer is still a success.
    Success { text: String },
    /// No complete response arrived within the configured deadline.
    Timeout { after: Duration },
    /// The service could not be reached (refused, DNS, reset while sending).
    ConnectionFailure { detail: String },
    /// The service answered with a non-2xx status.
    HttpError { status: StatusCode, body: String },
    /// 2xx answer whose body is not `{"response": string, ...}`.
    DecodeFailure { raw_body: String, detail: String },
    /// Any transport failure not covered above.
    Other { detail: String },
}

impl UpstreamOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamOutcome::Success { .. } => "success",
            UpstreamOutcome::Timeout { .. } => "timeout",
            UpstreamOutcome::ConnectionFailure { .. } => "connection_failure",
            UpstreamOutcome::HttpError { .. } => "http_error",
            UpstreamOutcome::DecodeFailure { .. } => "decode_failure",
            UpstreamOutcome::Other { .. } => "other",
        }
    }

    /// Underlying transport or payload detail, for logs only.
    pub fn detail(&self) -> String {
        match self {
            UpstreamOutcome::Success { .. } => String::new(),
            UpstreamOutcome::Timeout { after } => format!("no complete response within {:?}", after),
            UpstreamOutcome::ConnectionFailure { detail } | UpstreamOutcome::Other { detail } => {
                detail.clone()
            }
            UpstreamOutcome::HttpError { status, body } => format!("HTTP {}: {}", status, body),
            UpstreamOutcome::DecodeFailure { raw_body, detail } => {
                format!("{} in body: {}", detail, raw_body)
            }
        }
    }
}

/// Anything able to answer a validated question.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Makes exactly one call for the given prompt.
    async fn invoke(&self, prompt: &NormalizedQuestion) -> UpstreamOutcome;
}

/// Client for the Ollama `/api/generate` endpoint
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    generate_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            generate_url: config.generate_url(),
            model: config.ollama_model.clone(),
            timeout: config.timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn classify_transport_error(&self, err: reqwest::Error) -> UpstreamOutcome {
        if err.is_timeout() {
            UpstreamOutcome::Timeout {
                after: self.timeout,
            }
        } else if err.is_connect() || err.is_request() {
            UpstreamOutcome::ConnectionFailure {
                detail: describe(&err),
            }
        } else {
            UpstreamOutcome::Other {
                detail: describe(&err),
            }
        }
    }
}

#[async_trait]
impl Upstream for OllamaClient {
    async fn invoke(&self, prompt: &NormalizedQuestion) -> UpstreamOutcome {
        let request = GenerateRequest::new(&self.model, prompt.as_str());
        debug!("POST {} (model: {})", self.generate_url, self.model);

        let response = match self.client.post(&self.generate_url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => return self.classify_transport_error(e),
        };

        let status = response.status();
        info!("Received response status: {}", status);

        if !status.is_success() {
            // The status alone decides the outcome; the body is kept for logs when readable.
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Failed to read error body from upstream: {}", describe(&e));
                    String::new()
                }
            };
            return UpstreamOutcome::HttpError { status, body };
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return self.classify_transport_error(e),
        };
        debug!("Response body: {}", body);

        match serde_json::from_str::<GenerateResponse>(&body) {
            Ok(parsed) => UpstreamOutcome::Success {
                text: parsed.response.trim().to_string(),
            },
            Err(e) => UpstreamOutcome::DecodeFailure {
                raw_body: body,
                detail: e.to_string(),
            },
        }
    }
}

/// Flattens an error and its sources into one line, e.g. "error sending request: connection refused".
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if parts.last() != Some(&text) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}
