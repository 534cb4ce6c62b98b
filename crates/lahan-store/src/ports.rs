use async_trait::async_trait;
use lahan_core::error::Result;
use lahan_core::models::{
    NewParcel, NewRecord, NewWarehouse, Parcel, ParcelId, Record, RecordKind, Warehouse,
    WarehouseId,
};

/// Port for the remote parcel/warehouse store.
///
/// Every call is asynchronous and fallible; implementations assign ids on create.
#[async_trait]
pub trait ParcelStore: Send + Sync {
    /// List all persisted parcels
    async fn list_parcels(&self) -> Result<Vec<Parcel>>;

    /// Create a parcel, returning it with its assigned id
    async fn create_parcel(&self, parcel: &NewParcel) -> Result<Parcel>;

    /// Delete a parcel by id
    async fn delete_parcel(&self, id: &ParcelId) -> Result<()>;

    /// List all persisted warehouses
    async fn list_warehouses(&self) -> Result<Vec<Warehouse>>;

    /// Create a warehouse, returning it with its assigned id
    async fn create_warehouse(&self, warehouse: &NewWarehouse) -> Result<Warehouse>;

    /// Delete a warehouse by id
    async fn delete_warehouse(&self, id: &WarehouseId) -> Result<()>;

    /// Create either record type
    async fn create(&self, record: &NewRecord) -> Result<Record> {
        match record {
            NewRecord::Parcel(parcel) => self.create_parcel(parcel).await.map(Record::Parcel),
            NewRecord::Warehouse(warehouse) => {
                self.create_warehouse(warehouse).await.map(Record::Warehouse)
            }
        }
    }

    /// Delete either record type
    async fn delete(&self, kind: RecordKind, id: &str) -> Result<()> {
        match kind {
            RecordKind::Parcel => self.delete_parcel(&ParcelId(id.to_string())).await,
            RecordKind::Warehouse => self.delete_warehouse(&WarehouseId(id.to_string())).await,
        }
    }
}
