use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::routes::create_routes;
use crate::upstream::{OllamaClient, Upstream};

/// State shared by all handlers. Holds nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn Upstream>,
}

impl AppState {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }
}

/// Initialize tracing and logging for the application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "math_query_gateway=info,tower_http=debug,axum::rejection=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create the Axum application talking to the Ollama service described by `config`
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    info!("Initializing application router");

    let client = OllamaClient::new(config)?;
    info!(
        "Ollama client ready: {} (model: {}, timeout: {:?})",
        config.generate_url(),
        client.model(),
        config.timeout
    );

    Ok(router_with_upstream(Arc::new(client)))
}

/// Build the router around any upstream implementation
pub fn router_with_upstream(upstream: Arc<dyn Upstream>) -> Router {
    Router::new()
        .merge(create_routes())
        .with_state(AppState::new(upstream))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
