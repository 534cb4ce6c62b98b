//! List command implementation

use crate::cli::ListArgs;
use crate::output::OutputWriter;
use crate::output_types::{ListOutput, ParcelRow, WarehouseRow};
use anyhow::Result;
use lahan_core::models::RecordKind;
use lahan_editor::Catalog;
use lahan_store::ports::ParcelStore;

use super::load_catalog;

pub async fn execute(args: &ListArgs, store: &dyn ParcelStore, output: &OutputWriter) -> Result<()> {
    let kind = args.kind.as_deref().map(str::parse::<RecordKind>).transpose()?;
    let catalog = load_catalog(store, output).await?;
    print_catalog(&catalog, kind, output)
}

/// Print the catalog, optionally limited to one record kind
pub fn print_catalog(catalog: &Catalog, kind: Option<RecordKind>, output: &OutputWriter) -> Result<()> {
    let show_parcels = kind != Some(RecordKind::Warehouse);
    let show_warehouses = kind != Some(RecordKind::Parcel);

    let parcels: Vec<ParcelRow> = catalog.parcels_sorted().into_iter().map(ParcelRow::from).collect();
    let warehouses: Vec<WarehouseRow> =
        catalog.warehouses_sorted().into_iter().map(WarehouseRow::from).collect();
    let total_area_hectares = catalog.total_area_hectares();

    if output.is_json() {
        return output.result(ListOutput {
            parcels: show_parcels.then_some(parcels),
            warehouses: show_warehouses.then_some(warehouses),
            total_area_hectares,
        });
    }

    if show_parcels {
        output.section(format!("Parcels ({})", parcels.len()));
        output.table(parcels);
        output.kv("Total area", format!("{:.2} ha", total_area_hectares));
    }
    if show_warehouses {
        output.section(format!("Warehouses ({})", warehouses.len()));
        output.table(warehouses);
    }
    Ok(())
}
