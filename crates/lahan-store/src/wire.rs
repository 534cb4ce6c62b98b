//! Store wire records.
//!
//! The store keeps coordinates as `[longitude, latitude]` pairs under
//! Indonesian field names (`lahan` = parcel, `gudang` = warehouse,
//! `nama` = name, `koordinat` = coordinates, `lokasi` = location,
//! `luas` = area). These types are the only place the axis order is swapped.

use lahan_core::error::LahanError;
use lahan_core::models::{
    NewParcel, NewWarehouse, Parcel, ParcelId, Point, Ring, Warehouse, WarehouseId,
};
use lahan_geo::polygon_area;
use lahan_geo::validation::{validate_parcel_ring, validate_point};
use serde::{Deserialize, Deserializer, Serialize};

/// Parcel record as served by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LahanRecord {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    pub nama: String,
    pub koordinat: Vec<[f64; 2]>,
    /// Area in hectares, when the store reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub luas: Option<f64>,
}

/// Body of a create-parcel request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLahan {
    pub nama: String,
    pub koordinat: Vec<[f64; 2]>,
}

/// Warehouse record as served by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GudangRecord {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    pub nama: String,
    pub lokasi: [f64; 2],
}

/// Body of a create-warehouse request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGudang {
    pub nama: String,
    pub lokasi: [f64; 2],
}

/// Ids arrive as strings from some backends and integers from others
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Integer(n) => n.to_string(),
    })
}

impl TryFrom<LahanRecord> for Parcel {
    type Error = LahanError;

    fn try_from(record: LahanRecord) -> Result<Self, Self::Error> {
        let ring = Ring::from_lng_lat(&record.koordinat);
        validate_parcel_ring(&ring).into_result()?;

        Ok(Parcel {
            area_hectares: polygon_area(ring.points()),
            id: ParcelId(record.id),
            name: record.nama,
            ring,
        })
    }
}

impl From<&Parcel> for LahanRecord {
    fn from(parcel: &Parcel) -> Self {
        Self {
            id: parcel.id.0.clone(),
            nama: parcel.name.clone(),
            koordinat: parcel.ring.to_lng_lat(),
            luas: Some(parcel.area_hectares),
        }
    }
}

impl From<&NewParcel> for CreateLahan {
    fn from(parcel: &NewParcel) -> Self {
        Self { nama: parcel.name.clone(), koordinat: parcel.ring.to_lng_lat() }
    }
}

impl From<CreateLahan> for NewParcel {
    fn from(body: CreateLahan) -> Self {
        Self { name: body.nama, ring: Ring::from_lng_lat(&body.koordinat) }
    }
}

impl TryFrom<GudangRecord> for Warehouse {
    type Error = LahanError;

    fn try_from(record: GudangRecord) -> Result<Self, Self::Error> {
        let location = Point::from_lng_lat(record.lokasi);
        validate_point(&location).into_result()?;

        Ok(Warehouse { id: WarehouseId(record.id), name: record.nama, location })
    }
}

impl From<&Warehouse> for GudangRecord {
    fn from(warehouse: &Warehouse) -> Self {
        Self {
            id: warehouse.id.0.clone(),
            nama: warehouse.name.clone(),
            lokasi: warehouse.location.to_lng_lat(),
        }
    }
}

impl From<&NewWarehouse> for CreateGudang {
    fn from(warehouse: &NewWarehouse) -> Self {
        Self { nama: warehouse.name.clone(), lokasi: warehouse.location.to_lng_lat() }
    }
}

impl From<CreateGudang> for NewWarehouse {
    fn from(body: CreateGudang) -> Self {
        Self { name: body.nama, location: Point::from_lng_lat(body.lokasi) }
    }
}
