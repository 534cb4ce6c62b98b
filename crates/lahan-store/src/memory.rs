//! In-memory store implementation for development and testing.
//!
//! This implementation uses `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state. For real deployments, point the HTTP adapter at
//! the parcel service.

use async_trait::async_trait;
use lahan_core::error::{LahanError, Result};
use lahan_core::models::{NewParcel, NewWarehouse, Parcel, ParcelId, Warehouse, WarehouseId};
use lahan_geo::polygon_area;
use lahan_geo::validation::{validate_parcel_ring, validate_point};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::ports::ParcelStore;

/// In-memory implementation of ParcelStore
#[derive(Debug, Clone, Default)]
pub struct MemoryParcelStore {
    parcels: Arc<RwLock<HashMap<ParcelId, Parcel>>>,
    warehouses: Arc<RwLock<HashMap<WarehouseId, Warehouse>>>,
}

impl MemoryParcelStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored parcels and warehouses
    pub fn counts(&self) -> (usize, usize) {
        (self.parcels.read().unwrap().len(), self.warehouses.read().unwrap().len())
    }

    fn next_id() -> String {
        Uuid::new_v4().to_string()
    }
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LahanError::validation("Name must not be empty"));
    }
    Ok(())
}

#[async_trait]
impl ParcelStore for MemoryParcelStore {
    async fn list_parcels(&self) -> Result<Vec<Parcel>> {
        let parcels = self.parcels.read().unwrap();
        let mut list: Vec<Parcel> = parcels.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn create_parcel(&self, parcel: &NewParcel) -> Result<Parcel> {
        require_name(&parcel.name)?;
        validate_parcel_ring(&parcel.ring).into_result()?;

        let created = Parcel {
            id: ParcelId(Self::next_id()),
            name: parcel.name.trim().to_string(),
            ring: parcel.ring.clone(),
            area_hectares: polygon_area(parcel.ring.points()),
        };

        let mut parcels = self.parcels.write().unwrap();
        parcels.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn delete_parcel(&self, id: &ParcelId) -> Result<()> {
        let mut parcels = self.parcels.write().unwrap();
        parcels.remove(id).map(|_| ()).ok_or_else(|| LahanError::NotFound {
            kind: "Parcel".to_string(),
            id: id.to_string(),
        })
    }

    async fn list_warehouses(&self) -> Result<Vec<Warehouse>> {
        let warehouses = self.warehouses.read().unwrap();
        let mut list: Vec<Warehouse> = warehouses.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn create_warehouse(&self, warehouse: &NewWarehouse) -> Result<Warehouse> {
        require_name(&warehouse.name)?;
        validate_point(&warehouse.location).into_result()?;

        let created = Warehouse {
            id: WarehouseId(Self::next_id()),
            name: warehouse.name.trim().to_string(),
            location: warehouse.location,
        };

        let mut warehouses = self.warehouses.write().unwrap();
        warehouses.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn delete_warehouse(&self, id: &WarehouseId) -> Result<()> {
        let mut warehouses = self.warehouses.write().unwrap();
        warehouses.remove(id).map(|_| ()).ok_or_else(|| LahanError::NotFound {
            kind: "Warehouse".to_string(),
            id: id.to_string(),
        })
    }
}
