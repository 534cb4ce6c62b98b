use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Lahan - Land parcel boundary capture
#[derive(Parser, Debug)]
#[command(name = "lahan")]
#[command(about = "Trace land-parcel boundaries and place warehouse markers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML config file (defaults to ./lahan.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL of the parcel store
    #[arg(long, global = true, value_name = "URL")]
    pub store_url: Option<String>,

    /// Proximity tolerance in degrees
    #[arg(long, global = true, value_name = "DEGREES")]
    pub tolerance: Option<f64>,

    /// Do not check new boundaries against saved parcels
    #[arg(long, global = true)]
    pub no_cross_check: bool,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Use a throwaway in-memory store instead of the remote one
    #[arg(long, global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive drawing console
    Draw(DrawArgs),

    /// List saved parcels and warehouses
    List(ListArgs),

    /// Export saved records as a GeoJSON FeatureCollection
    Export(ExportArgs),

    /// Delete a saved parcel or warehouse
    Delete(DeleteArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

#[derive(Args, Debug, Default)]
pub struct DrawArgs {
    /// Pre-fill the name used by the next save
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list one record kind (parcel or warehouse)
    #[arg(long, value_name = "KIND")]
    pub kind: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Record kind (parcel or warehouse)
    pub kind: String,

    /// Record id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["lahan", "delete", "parcel", "12", "--yes", "--memory", "--tolerance", "0.002"]);
        assert!(cli.memory);
        assert_eq!(cli.tolerance, Some(0.002));
        match cli.command {
            Commands::Delete(args) => {
                assert_eq!(args.kind, "parcel");
                assert_eq!(args.id, "12");
                assert!(args.yes);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
