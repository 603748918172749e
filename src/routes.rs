// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{download, health, levels, locate},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Registers the lookup endpoints and the liveness root.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (boundary store + config).
pub fn create_router(state: AppState) -> Router {
    // Unauthenticated read-only API, so any origin may call it.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health::root))
        .route("/locate", post(locate::locate))
        .route("/available-levels", get(levels::available_levels))
        .route("/download", get(download::download))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
