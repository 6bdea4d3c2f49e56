/**
 * Server Initialization
 *
 * This module builds the application: it opens the configured store,
 * creates the shared state and assembles the router.
 *
 * # Initialization Flow
 *
 * 1. **Store**: PostgreSQL when `DATABASE_URL` is set, otherwise memory
 * 2. **State**: store handle, session store, bcrypt cost
 * 3. **Router**: API routes, pages, static files, session and trace layers
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_store, ServerError};
use crate::backend::server::state::AppState;
use crate::backend::store::Store;
use crate::shared::AppConfig;

/// Build the application described by `config`
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, ServerError> {
    tracing::info!("Initializing SnapShare backend server");

    let store = load_store(config).await?;
    let app = create_app_with_store(config, store);

    tracing::info!("Router configured");
    Ok(app)
}

/// Build the application on an already-open store
///
/// Used by `create_app` and by tests that supply their own store.
pub fn create_app_with_store(config: &AppConfig, store: Arc<dyn Store>) -> Router<()> {
    let app_state = AppState::new(store, config);
    create_router(app_state, &config.static_dir)
}
