use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use lahan_core::models::{NewWarehouse, WarehouseId};
use lahan_store::wire::{CreateGudang, GudangRecord};

use crate::dto::DeleteResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_gudang(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GudangRecord>>, ApiError> {
    tracing::info!("Listing warehouses");

    let warehouses = state.store.list_warehouses().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list warehouses");
        ApiError::internal("Failed to list warehouses").with_details(e.to_string())
    })?;

    Ok(Json(warehouses.iter().map(GudangRecord::from).collect()))
}

pub async fn create_gudang(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateGudang>,
) -> Result<(StatusCode, Json<GudangRecord>), ApiError> {
    tracing::info!(nama = %request.nama, "Creating warehouse");

    let warehouse =
        state.store.create_warehouse(&NewWarehouse::from(request)).await.map_err(|e| {
            tracing::warn!(error = %e, "Rejected warehouse");
            ApiError::from(e)
        })?;

    Ok((StatusCode::CREATED, Json(GudangRecord::from(&warehouse))))
}

pub async fn delete_gudang(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    tracing::info!(id = %id, "Deleting warehouse");

    state.store.delete_warehouse(&WarehouseId(id.clone())).await?;

    Ok(Json(DeleteResponse::success("warehouse", &id)))
}
