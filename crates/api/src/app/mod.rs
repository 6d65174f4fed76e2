//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: stores, credential flows and session transport
//! - `routes/`: HTTP routes + handlers, grouped by gate chain
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::WiringError;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Fails when a route group's gate chain is mis-ordered.
pub fn build_app(services: Arc<AppServices>) -> Result<Router, WiringError> {
    let auth_state = services.auth_state();

    let mut app = Router::new();
    for group in routes::route_groups() {
        app = app.merge(group.build(&auth_state)?);
    }

    Ok(app
        .layer(Extension(services))
        .layer(TraceLayer::new_for_http()))
}
