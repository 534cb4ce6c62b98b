//! Local mirror of every persisted parcel and warehouse.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use lahan_core::error::{LahanError, Result};
use lahan_core::models::{Parcel, ParcelId, Record, RecordKind, Ring, Warehouse, WarehouseId};
use lahan_geo::models::RingExt;
use lahan_store::ports::ParcelStore;
use std::collections::HashMap;

/// Persisted parcels and warehouses keyed by id.
///
/// Populated once by [`Catalog::load`], then mutated only by successful saves
/// and confirmed deletes. Source of truth for cross-parcel checks.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    parcels: HashMap<ParcelId, Parcel>,
    warehouses: HashMap<WarehouseId, Warehouse>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch parcels and warehouses concurrently and build the catalog.
    ///
    /// The catalog is populated only when both requests succeed; any failure
    /// is reported as `LoadFailed`.
    pub async fn load(store: &dyn ParcelStore) -> Result<Self> {
        let (parcels, warehouses) =
            futures::future::try_join(store.list_parcels(), store.list_warehouses())
                .await
                .map_err(|e| LahanError::LoadFailed { reason: e.to_string() })?;

        tracing::info!(
            parcels = parcels.len(),
            warehouses = warehouses.len(),
            "Catalog loaded"
        );

        let mut catalog = Self::new();
        for parcel in parcels {
            catalog.add(Record::Parcel(parcel));
        }
        for warehouse in warehouses {
            catalog.add(Record::Warehouse(warehouse));
        }
        Ok(catalog)
    }

    /// Rings of every persisted parcel
    pub fn all_parcel_rings(&self) -> Vec<&Ring> {
        self.parcels.values().map(|p| &p.ring).collect()
    }

    /// Every persisted warehouse
    pub fn all_warehouses(&self) -> Vec<&Warehouse> {
        self.warehouses.values().collect()
    }

    /// Parcels sorted by name, for display
    pub fn parcels_sorted(&self) -> Vec<&Parcel> {
        let mut parcels: Vec<&Parcel> = self.parcels.values().collect();
        parcels.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        parcels
    }

    /// Warehouses sorted by name, for display
    pub fn warehouses_sorted(&self) -> Vec<&Warehouse> {
        let mut warehouses: Vec<&Warehouse> = self.warehouses.values().collect();
        warehouses.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        warehouses
    }

    pub fn parcel(&self, id: &ParcelId) -> Option<&Parcel> {
        self.parcels.get(id)
    }

    pub fn warehouse(&self, id: &WarehouseId) -> Option<&Warehouse> {
        self.warehouses.get(id)
    }

    /// Whether a record of this kind and id is present
    pub fn contains(&self, kind: RecordKind, id: &str) -> bool {
        match kind {
            RecordKind::Parcel => self.parcels.contains_key(&ParcelId(id.to_string())),
            RecordKind::Warehouse => self.warehouses.contains_key(&WarehouseId(id.to_string())),
        }
    }

    /// Insert a record, replacing any record with the same id
    pub fn add(&mut self, record: Record) {
        match record {
            Record::Parcel(parcel) => {
                self.parcels.insert(parcel.id.clone(), parcel);
            }
            Record::Warehouse(warehouse) => {
                self.warehouses.insert(warehouse.id.clone(), warehouse);
            }
        }
    }

    /// Remove the record with exactly this kind and id
    pub fn remove(&mut self, kind: RecordKind, id: &str) -> Option<Record> {
        match kind {
            RecordKind::Parcel => {
                self.parcels.remove(&ParcelId(id.to_string())).map(Record::Parcel)
            }
            RecordKind::Warehouse => {
                self.warehouses.remove(&WarehouseId(id.to_string())).map(Record::Warehouse)
            }
        }
    }

    pub fn parcel_count(&self) -> usize {
        self.parcels.len()
    }

    pub fn warehouse_count(&self) -> usize {
        self.warehouses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty() && self.warehouses.is_empty()
    }

    /// Sum of all parcel areas in hectares
    pub fn total_area_hectares(&self) -> f64 {
        self.parcels.values().map(|p| p.area_hectares).sum()
    }

    /// Export as a GeoJSON FeatureCollection: parcels as Polygons,
    /// warehouses as Points, coordinates in `[lng, lat]` order
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let mut features = Vec::with_capacity(self.parcels.len() + self.warehouses.len());

        for parcel in self.parcels_sorted() {
            let mut properties = JsonObject::new();
            properties.insert("kind".to_string(), "parcel".into());
            properties.insert("name".to_string(), parcel.name.clone().into());
            properties.insert("area_ha".to_string(), parcel.area_hectares.into());
            if let Some(label) = parcel.ring.centroid() {
                properties.insert("label".to_string(), label.to_lng_lat().to_vec().into());
            }

            let exterior: Vec<Vec<f64>> =
                parcel.ring.to_lng_lat().into_iter().map(|pair| pair.to_vec()).collect();

            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Polygon(vec![exterior]))),
                id: Some(geojson::feature::Id::String(parcel.id.0.clone())),
                properties: Some(properties),
                foreign_members: None,
            });
        }

        for warehouse in self.warehouses_sorted() {
            let mut properties = JsonObject::new();
            properties.insert("kind".to_string(), "warehouse".into());
            properties.insert("name".to_string(), warehouse.name.clone().into());

            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(
                    warehouse.location.to_lng_lat().to_vec(),
                ))),
                id: Some(geojson::feature::Id::String(warehouse.id.0.clone())),
                properties: Some(properties),
                foreign_members: None,
            });
        }

        FeatureCollection { bbox: None, features, foreign_members: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lahan_core::models::{NewParcel, NewWarehouse, Point};
    use lahan_store::MemoryParcelStore;

    fn parcel(id: &str, name: &str) -> Parcel {
        Parcel {
            id: ParcelId(id.to_string()),
            name: name.to_string(),
            ring: Ring::new(vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 1.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 0.0),
            ]),
            area_hectares: 600_000.0,
        }
    }

    fn warehouse(id: &str) -> Warehouse {
        Warehouse {
            id: WarehouseId(id.to_string()),
            name: "Gudang".to_string(),
            location: Point::new(-5.35, 105.5),
        }
    }

    #[test]
    fn test_add_replaces_whole_record() {
        let mut catalog = Catalog::new();
        catalog.add(Record::Parcel(parcel("1", "Old")));
        catalog.add(Record::Parcel(parcel("1", "New")));

        assert_eq!(catalog.parcel_count(), 1);
        assert_eq!(catalog.parcel(&ParcelId("1".to_string())).unwrap().name, "New");
    }

    #[test]
    fn test_remove_matches_kind_and_id() {
        let mut catalog = Catalog::new();
        catalog.add(Record::Parcel(parcel("1", "A")));
        catalog.add(Record::Warehouse(warehouse("1")));

        assert!(catalog.remove(RecordKind::Parcel, "2").is_none());
        let removed = catalog.remove(RecordKind::Warehouse, "1").unwrap();
        assert_eq!(removed.kind(), RecordKind::Warehouse);

        assert_eq!(catalog.parcel_count(), 1);
        assert_eq!(catalog.warehouse_count(), 0);
        assert!(catalog.contains(RecordKind::Parcel, "1"));
    }

    #[test]
    fn test_feature_collection_export() {
        let mut catalog = Catalog::new();
        catalog.add(Record::Parcel(parcel("p1", "Kebun A")));
        catalog.add(Record::Warehouse(warehouse("w1")));

        let collection = catalog.to_feature_collection();
        assert_eq!(collection.features.len(), 2);

        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["geometry"]["type"], "Polygon");
        assert_eq!(json["features"][0]["properties"]["name"], "Kebun A");
        assert!(json["features"][0]["properties"]["label"].is_array());
        assert_eq!(json["features"][1]["geometry"]["coordinates"], serde_json::json!([105.5, -5.35]));
    }

    #[tokio::test]
    async fn test_load_from_store() {
        let store = MemoryParcelStore::new();
        store
            .create_parcel(&NewParcel { name: "Kebun A".to_string(), ring: parcel("x", "x").ring })
            .await
            .unwrap();
        store
            .create_warehouse(&NewWarehouse {
                name: "Gudang".to_string(),
                location: Point::new(-5.35, 105.5),
            })
            .await
            .unwrap();

        let catalog = Catalog::load(&store).await.unwrap();
        assert_eq!(catalog.parcel_count(), 1);
        assert_eq!(catalog.warehouse_count(), 1);
        assert_eq!(catalog.all_parcel_rings().len(), 1);
    }

    struct HalfBrokenStore {
        inner: MemoryParcelStore,
    }

    #[async_trait]
    impl ParcelStore for HalfBrokenStore {
        async fn list_parcels(&self) -> Result<Vec<Parcel>> {
            self.inner.list_parcels().await
        }
        async fn create_parcel(&self, parcel: &NewParcel) -> Result<Parcel> {
            self.inner.create_parcel(parcel).await
        }
        async fn delete_parcel(&self, id: &ParcelId) -> Result<()> {
            self.inner.delete_parcel(id).await
        }
        async fn list_warehouses(&self) -> Result<Vec<Warehouse>> {
            Err(LahanError::Store { status: 500, body: "boom".to_string() })
        }
        async fn create_warehouse(&self, warehouse: &NewWarehouse) -> Result<Warehouse> {
            self.inner.create_warehouse(warehouse).await
        }
        async fn delete_warehouse(&self, id: &WarehouseId) -> Result<()> {
            self.inner.delete_warehouse(id).await
        }
    }

    #[tokio::test]
    async fn test_load_fails_when_either_fetch_fails() {
        let store = HalfBrokenStore { inner: MemoryParcelStore::new() };
        store
            .create_parcel(&NewParcel { name: "Kebun A".to_string(), ring: parcel("x", "x").ring })
            .await
            .unwrap();

        let err = Catalog::load(&store).await.unwrap_err();
        assert!(matches!(err, LahanError::LoadFailed { .. }));
        assert!(err.to_string().contains("boom"));
    }
}
