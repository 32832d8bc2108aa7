//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard page and the network-selection redirect are served at the
//! root. The JSON API under `/api` exposes the same registries for scripts
//! and carries a permissive CORS layer. Anything else falls through to the
//! public directory (network avatars, favicon). Every route is traced.

pub mod api;
pub mod dashboard;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/networks", get(api::list_networks))
        .route("/api/assets/{network}/{kind}", get(api::list_assets))
        .layer(cors);

    let public_service = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/", get(dashboard::index))
        .route("/select", get(dashboard::select_network))
        .route("/healthz", get(healthz))
        .merge(api_routes)
        .fallback_service(public_service)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
