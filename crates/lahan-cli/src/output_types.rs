use lahan_core::config::ConfigSource;
use lahan_core::models::{Parcel, Warehouse};
use serde::Serialize;
use tabled::Tabled;

/// One parcel in `list` output
#[derive(Debug, Serialize, Tabled)]
pub struct ParcelRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Vertices")]
    pub vertices: usize,
    #[tabled(rename = "Area (ha)", display_with = "format_hectares")]
    pub area_hectares: f64,
}

impl From<&Parcel> for ParcelRow {
    fn from(parcel: &Parcel) -> Self {
        Self {
            id: parcel.id.to_string(),
            name: parcel.name.clone(),
            // Closing repeat is not a vertex
            vertices: parcel.ring.len().saturating_sub(1),
            area_hectares: parcel.area_hectares,
        }
    }
}

/// One warehouse in `list` output
#[derive(Debug, Serialize, Tabled)]
pub struct WarehouseRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Latitude")]
    pub lat: f64,
    #[tabled(rename = "Longitude")]
    pub lng: f64,
}

impl From<&Warehouse> for WarehouseRow {
    fn from(warehouse: &Warehouse) -> Self {
        Self {
            id: warehouse.id.to_string(),
            name: warehouse.name.clone(),
            lat: warehouse.location.lat,
            lng: warehouse.location.lng,
        }
    }
}

fn format_hectares(value: &f64) -> String {
    format!("{:.2}", value)
}

/// Output for list command
#[derive(Debug, Serialize)]
pub struct ListOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parcels: Option<Vec<ParcelRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouses: Option<Vec<WarehouseRow>>,
    pub total_area_hectares: f64,
}

/// One configuration entry in `config` output
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source", display_with = "format_source")]
    pub source: ConfigSource,
}

fn format_source(source: &ConfigSource) -> String {
    format!("{:?}", source).to_lowercase()
}

/// Output for export command
#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub path: String,
    pub parcels: usize,
    pub warehouses: usize,
}

/// Output for delete command
#[derive(Debug, Serialize)]
pub struct DeleteOutput {
    pub kind: String,
    pub id: String,
    pub deleted: bool,
}
