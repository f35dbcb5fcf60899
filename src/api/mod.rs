//! REST surface: thin handlers over the storage layer, one module per
//! resource. All mutation logic lives in the domain and storage layers;
//! handlers validate input, call through and map errors.

use crate::auth::AuthConfig;
use crate::storage::Storage;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod boards;
pub mod cards;
pub mod columns;
pub mod error;

pub use error::ApiError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, auth: AuthConfig) -> Self {
        Self { storage, auth }
    }
}

/// Builds the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(auth::routes())
        .merge(boards::routes())
        .merge(columns::routes())
        .merge(cards::routes())
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}
