//! Export command implementation

use crate::cli::ExportArgs;
use crate::output::OutputWriter;
use crate::output_types::ExportOutput;
use anyhow::{Context, Result};
use lahan_store::ports::ParcelStore;
use std::fs;

use super::load_catalog;

pub async fn execute(args: &ExportArgs, store: &dyn ParcelStore, output: &OutputWriter) -> Result<()> {
    let catalog = load_catalog(store, output).await?;
    let collection = catalog.to_feature_collection();
    let geojson = serde_json::to_string_pretty(&collection)?;

    let Some(path) = &args.output else {
        println!("{}", geojson);
        return Ok(());
    };

    fs::write(path, geojson).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), features = collection.features.len(), "Exported catalog");

    if output.is_json() {
        output.result(ExportOutput {
            path: path.display().to_string(),
            parcels: catalog.parcel_count(),
            warehouses: catalog.warehouse_count(),
        })?;
    } else {
        output.success(format!(
            "Exported {} parcels and {} warehouses to {}",
            catalog.parcel_count(),
            catalog.warehouse_count(),
            path.display()
        ));
    }
    Ok(())
}
