use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use lahan_core::models::{NewParcel, ParcelId};
use lahan_store::wire::{CreateLahan, LahanRecord};

use crate::dto::DeleteResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_lahan(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LahanRecord>>, ApiError> {
    tracing::info!("Listing parcels");

    let parcels = state.store.list_parcels().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list parcels");
        ApiError::internal("Failed to list parcels").with_details(e.to_string())
    })?;

    Ok(Json(parcels.iter().map(LahanRecord::from).collect()))
}

pub async fn create_lahan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateLahan>,
) -> Result<(StatusCode, Json<LahanRecord>), ApiError> {
    tracing::info!(nama = %request.nama, points = request.koordinat.len(), "Creating parcel");

    let parcel = state.store.create_parcel(&NewParcel::from(request)).await.map_err(|e| {
        tracing::warn!(error = %e, "Rejected parcel");
        ApiError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(LahanRecord::from(&parcel))))
}

pub async fn delete_lahan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    tracing::info!(id = %id, "Deleting parcel");

    state.store.delete_parcel(&ParcelId(id.clone())).await?;

    Ok(Json(DeleteResponse::success("parcel", &id)))
}
