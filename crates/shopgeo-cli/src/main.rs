mod query;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopgeo_core::DEFAULT_GEOHASH_PRECISION;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopgeo-cli")]
#[command(about = "Query a shopgeo data directory from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank products of shops near a point and print them as JSON
    Search {
        /// Directory holding shops.csv, products.csv, taggings.csv and tags.csv
        #[arg(long, env = "SHOPGEO_DATA_PATH", default_value = "./data")]
        data_dir: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Search radius in kilometers
        #[arg(long, default_value_t = 1.0)]
        radius_km: f64,
        /// Comma-separated tag ids; a shop matching any of them qualifies
        #[arg(long)]
        tags: Option<String>,
        /// Maximum number of products to print
        #[arg(long, default_value_t = 50, allow_hyphen_values = true)]
        limit: i64,
        /// Geohash length of the spatial index
        #[arg(long, env = "SHOPGEO_GEOHASH_PRECISION", default_value_t = DEFAULT_GEOHASH_PRECISION)]
        precision: usize,
    },
    /// Print catalog sizes and grid occupancy
    Stats {
        #[arg(long, env = "SHOPGEO_DATA_PATH", default_value = "./data")]
        data_dir: PathBuf,
        #[arg(long, env = "SHOPGEO_GEOHASH_PRECISION", default_value_t = DEFAULT_GEOHASH_PRECISION)]
        precision: usize,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Search {
            data_dir,
            lat,
            lng,
            radius_km,
            tags,
            limit,
            precision,
        } => {
            let args = query::SearchArgs {
                lat,
                lng,
                radius_km,
                tags,
                limit,
            };
            query::run_search(&data_dir, precision, &args, &mut out)?;
        }
        Commands::Stats {
            data_dir,
            precision,
        } => query::run_stats(&data_dir, precision, &mut out)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
