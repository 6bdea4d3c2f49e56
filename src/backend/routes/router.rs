/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. API routes (`/api/...`, JSON)
 * 2. Page routes (HTML)
 * 3. Fallback: static files from the configured directory, else an HTML 404
 *
 * # Layers
 *
 * Every request, the fallback included, passes through `session_middleware`
 * and is traced by tower-http's `TraceLayer`. Inside the session layer,
 * `render_error_pages` gives HTML error pages the caller's navigation.
 */

use axum::{handler::HandlerWithoutStateExt, middleware, Router};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::middleware::session_middleware;
use crate::backend::pages::{render_error_pages, PageError};
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::page_routes::configure_page_routes;
use crate::backend::server::state::AppState;

async fn not_found() -> PageError {
    PageError(BackendError::not_found("Nothing here."))
}

pub fn create_router(app_state: AppState, static_dir: impl AsRef<Path>) -> Router<()> {
    let router = Router::new();

    // Add API routes
    let router = configure_api_routes(router);

    // Add HTML pages
    let router = configure_page_routes(router);

    // Static files, then 404
    let static_files = ServeDir::new(static_dir.as_ref()).not_found_service(not_found.into_service());
    let router = router.fallback_service(static_files);

    router
        .layer(middleware::from_fn(render_error_pages))
        .layer(middleware::from_fn_with_state(app_state.clone(), session_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
