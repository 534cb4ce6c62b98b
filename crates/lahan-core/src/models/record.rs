//! Persisted parcel and warehouse records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::geometry::{Point, Ring};
use crate::error::LahanError;

/// Store-assigned parcel identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParcelId(pub String);

/// Store-assigned warehouse identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WarehouseId(pub String);

impl fmt::Display for ParcelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two record types held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Parcel,
    Warehouse,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Parcel => f.write_str("Parcel"),
            RecordKind::Warehouse => f.write_str("Warehouse"),
        }
    }
}

impl FromStr for RecordKind {
    type Err = LahanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "parcel" | "lahan" => Ok(RecordKind::Parcel),
            "warehouse" | "gudang" => Ok(RecordKind::Warehouse),
            _ => Err(LahanError::validation(format!(
                "Unknown record kind: {}. Use parcel or warehouse",
                s
            ))),
        }
    }
}

/// A persisted land parcel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub id: ParcelId,
    pub name: String,
    /// Closed ring, first point repeated as last
    pub ring: Ring,
    pub area_hectares: f64,
}

/// A parcel not yet saved; the store assigns its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewParcel {
    pub name: String,
    pub ring: Ring,
}

/// A persisted warehouse marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub location: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWarehouse {
    pub name: String,
    pub location: Point,
}

/// Any persisted record
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Parcel(Parcel),
    Warehouse(Warehouse),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Parcel(_) => RecordKind::Parcel,
            Record::Warehouse(_) => RecordKind::Warehouse,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::Parcel(p) => &p.id.0,
            Record::Warehouse(w) => &w.id.0,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Record::Parcel(p) => &p.name,
            Record::Warehouse(w) => &w.name,
        }
    }
}

/// Any record awaiting creation
#[derive(Debug, Clone, PartialEq)]
pub enum NewRecord {
    Parcel(NewParcel),
    Warehouse(NewWarehouse),
}

impl NewRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            NewRecord::Parcel(_) => RecordKind::Parcel,
            NewRecord::Warehouse(_) => RecordKind::Warehouse,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NewRecord::Parcel(p) => &p.name,
            NewRecord::Warehouse(w) => &w.name,
        }
    }
}
