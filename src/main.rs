use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

mod catalog;
mod generate;
mod serve;
mod types;
mod utils;

/// Catalog location used when neither the flag nor the env var is set.
pub const DEFAULT_CATALOG: &str = "assets/wine.xlsx";
/// Environment variable consulted when --catalog is not given.
pub const CATALOG_ENV: &str = "WINERY_CATALOG";

#[derive(Parser)]
#[command(name = "winery-site")]
#[command(about = "Wine catalog static site generator")]
struct Cli {
    /// Catalog file (.xlsx/.xls/.csv); falls back to $WINERY_CATALOG, then assets/wine.xlsx
    #[arg(short, long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the catalog to index.html
    Build,
    /// Render the catalog, then serve the current directory over HTTP
    Serve {
        /// Address to bind the HTTP server to
        #[arg(long, default_value = "0.0.0.0:8000")]
        bind: String,
    },
    /// Remove the generated index.html
    Clean,
}

/// Resolve the catalog path: CLI flag, then env var, then the default.
/// An env var set to the empty string counts as unset.
fn resolve_catalog(flag: Option<PathBuf>, env_value: Option<OsString>) -> PathBuf {
    flag.or_else(|| {
        env_value
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
}

fn run_clean() -> Result<()> {
    let path = Path::new(generate::OUTPUT_FILE);
    if path.exists() {
        fs::remove_file(path)?;
        println!("Removed {}", generate::OUTPUT_FILE);
    } else {
        println!("Nothing to clean");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    let catalog_path = resolve_catalog(cli.catalog, env::var_os(CATALOG_ENV));

    match cli.command {
        Commands::Build => generate::run_build(&catalog_path),
        Commands::Serve { bind } => {
            generate::run_build(&catalog_path)?;
            serve::run_serve(&bind)
        }
        Commands::Clean => run_clean(),
    }
}
