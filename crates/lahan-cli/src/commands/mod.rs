//! Command implementations

mod config;
mod delete;
mod draw;
mod export;
mod list;

use crate::cli::{Cli, Commands};
use crate::config_loader::{load_config, open_store};
use crate::output::OutputWriter;
use crate::progress::{create_spinner, finish_error, finish_success};
use anyhow::Result;
use lahan_editor::Catalog;
use lahan_store::ports::ParcelStore;
use std::sync::Arc;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = Arc::new(OutputWriter::new(cli.json));
    let config = load_config(&cli)?;

    if let Commands::Config = cli.command {
        return config::execute(&config, &output);
    }

    let store = open_store(&cli, &config)?;

    match &cli.command {
        Commands::Draw(args) => draw::execute(args, store, &config, output).await,
        Commands::List(args) => list::execute(args, store.as_ref(), &output).await,
        Commands::Export(args) => export::execute(args, store.as_ref(), &output).await,
        Commands::Delete(args) => delete::execute(args, store, output).await,
        Commands::Config => Ok(()),
    }
}

/// Fetch the catalog behind a spinner
pub(crate) async fn load_catalog(store: &dyn ParcelStore, output: &OutputWriter) -> Result<Catalog> {
    let spinner = create_spinner("Loading parcels and warehouses...", output.is_json());

    match Catalog::load(store).await {
        Ok(catalog) => {
            finish_success(
                &spinner,
                &format!(
                    "Loaded {} parcels and {} warehouses",
                    catalog.parcel_count(),
                    catalog.warehouse_count()
                ),
            );
            Ok(catalog)
        }
        Err(e) => {
            finish_error(&spinner, "Failed to load catalog");
            Err(e.into())
        }
    }
}
