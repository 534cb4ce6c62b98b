//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use lahan_core::config::{CliConfigOverrides, LayeredConfig};
use lahan_store::ports::ParcelStore;
use lahan_store::{HttpParcelStore, MemoryParcelStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::Cli;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "lahan.toml";

/// Resolve the config file to read, if any
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            candidate.is_file().then_some(candidate)
        }
    }
}

/// Load layered configuration: defaults, file, environment, then CLI flags
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_path(cli.config.as_deref()) {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides(cli))?;
    Ok(config)
}

fn overrides(cli: &Cli) -> CliConfigOverrides {
    CliConfigOverrides {
        store_url: cli.store_url.clone(),
        proximity_tolerance: cli.tolerance,
        cross_check_parcels: cli.no_cross_check.then_some(false),
        request_timeout_secs: cli.timeout,
    }
}

/// Open the store selected by the flags
pub fn open_store(cli: &Cli, config: &LayeredConfig) -> Result<Arc<dyn ParcelStore>> {
    if cli.memory {
        tracing::info!("Using in-memory store; records are discarded on exit");
        return Ok(Arc::new(MemoryParcelStore::new()));
    }

    let store = HttpParcelStore::from_config(config).context("Failed to create store client")?;
    tracing::debug!(url = %store.base_url(), "Using remote store");
    Ok(Arc::new(store))
}
