pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod routes;
pub mod upstream;
pub mod validation;

// Re-export key functions for convenience
pub use app::{create_app, init_tracing, router_with_upstream};
