//! Broadsheet API — the HTTP composition root.
//!
//! Wires the bounded contexts to an Axum router. Startup lives in `main.rs`;
//! everything else is exposed here so integration tests can build the same
//! router.

pub mod config;
pub mod error;
pub mod identity;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router over `state`.
#[must_use]
pub fn app(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with the publishing front end's origin.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/articles", routes::articles::router())
        .nest("/api/v1/profiles", routes::profiles::router())
        .nest("/api/v1/media", routes::media::router())
        .nest("/media", routes::media::files_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
