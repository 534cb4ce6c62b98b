use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Parcels
        .route("/api/lahan", get(handlers::list_lahan).post(handlers::create_lahan))
        .route("/api/lahan/{id}", delete(handlers::delete_lahan))

        // Warehouses
        .route("/api/gudang", get(handlers::list_gudang).post(handlers::create_gudang))
        .route("/api/gudang/{id}", delete(handlers::delete_gudang))

        .with_state(state)
}
