mod import;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "scoopdb-cli")]
#[command(about = "ScoopDB directory import command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the directory without importing anything
    Search {
        /// Free-text query
        #[arg(long)]
        query: Option<String>,
        /// Address to geocode and search around
        #[arg(long)]
        address: Option<String>,
        /// Latitude of an explicit search center
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude of an explicit search center
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
        /// Search radius in meters (location searches only)
        #[arg(long)]
        radius: Option<u32>,
        /// Only return places at or above this rating
        #[arg(long)]
        min_rating: Option<f64>,
        /// Only return places currently open
        #[arg(long)]
        open_only: bool,
    },
    /// Import or reconcile a single place by external id
    ImportOne {
        external_id: String,
        #[command(flatten)]
        flags: ImportFlags,
    },
    /// Import a list of external ids as a paced batch
    ImportBatch {
        /// External ids to import, in order
        #[arg(required = true)]
        external_ids: Vec<String>,
        #[command(flatten)]
        flags: ImportFlags,
    },
    /// Import every qualifying place around an address
    ImportArea {
        /// Address to geocode as the search center
        address: String,
        /// Search radius in meters
        #[arg(long)]
        radius: Option<u32>,
        #[command(flatten)]
        flags: ImportFlags,
    },
    /// Sweep the configured regions
    ImportRegions {
        /// Override the regions file from configuration
        #[arg(long)]
        regions_file: Option<PathBuf>,
        /// List the regions that would be swept without importing
        #[arg(long)]
        dry_run: bool,
        #[command(flatten)]
        flags: ImportFlags,
    },
    /// Re-fetch and update every shop already linked to the directory
    RefreshAll {
        #[command(flatten)]
        flags: ImportFlags,
    },
}

/// Shared import behavior flags.
#[derive(Debug, Args)]
struct ImportFlags {
    /// Update already-known shops in place instead of skipping them
    #[arg(long)]
    update: bool,
    /// Treat already-known shops as failures instead of skips
    #[arg(long, conflicts_with = "update")]
    no_skip: bool,
    /// Persist records without running the pre-import validator
    #[arg(long)]
    no_validate: bool,
    /// Also import the provider's reviews for each shop
    #[arg(long)]
    reviews: bool,
    /// Cap on candidates imported per region or search
    #[arg(long)]
    max_per_region: Option<usize>,
    /// Recorded as the importing actor on created shops
    #[arg(long, default_value = "cli")]
    actor: String,
}

impl ImportFlags {
    fn to_options(&self) -> scoopdb_import::ImportOptions {
        scoopdb_import::ImportOptions {
            validate_before_import: !self.no_validate,
            skip_existing: !self.no_skip,
            update_existing: self.update,
            import_reviews: self.reviews,
            max_results_per_region: self.max_per_region,
            actor_id: Some(self.actor.clone()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = scoopdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            query,
            address,
            lat,
            lng,
            radius,
            min_rating,
            open_only,
        } => {
            let location = match (lat, lng) {
                (Some(lat), Some(lng)) => Some(scoopdb_core::Coordinates { lat, lng }),
                _ => None,
            };
            let params = scoopdb_import::SearchParams {
                query,
                address,
                location,
                radius_m: radius,
                filters: scoopdb_directory::SearchFilters {
                    min_rating,
                    open_only,
                },
            };
            import::run_search(&config, &params).await
        }
        Commands::ImportOne { external_id, flags } => {
            import::run_import_one(&config, &external_id, &flags.to_options()).await
        }
        Commands::ImportBatch {
            external_ids,
            flags,
        } => import::run_import_batch(&config, &external_ids, &flags.to_options()).await,
        Commands::ImportArea {
            address,
            radius,
            flags,
        } => import::run_import_area(&config, &address, radius, &flags.to_options()).await,
        Commands::ImportRegions {
            regions_file,
            dry_run,
            flags,
        } => {
            import::run_import_regions(&config, regions_file, dry_run, &flags.to_options()).await
        }
        Commands::RefreshAll { flags } => {
            import::run_refresh_all(&config, &flags.to_options()).await
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
