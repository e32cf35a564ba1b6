//! Import command handlers for the CLI.
//!
//! These are called from `main` after configuration is loaded. Each handler
//! wires the directory client and the Postgres store into an importer, runs
//! one operation, and prints its structured result. Per-item failures are
//! reported in the summary rather than aborting the run.

use std::path::PathBuf;

use scoopdb_core::AppConfig;
use scoopdb_directory::DirectoryClient;
use scoopdb_import::{
    ImportOptions, ImportResult, Importer, ImporterConfig, PgShopStore, SearchParams,
};

/// Builds the directory client from configuration.
///
/// # Errors
///
/// Returns an error when no API key is configured or the client cannot be
/// constructed.
fn build_directory_client(config: &AppConfig) -> anyhow::Result<DirectoryClient> {
    let api_key = config.directory_api_key.as_deref().ok_or_else(|| {
        anyhow::anyhow!("SCOOPDB_DIRECTORY_API_KEY is not set; directory access needs an API key")
    })?;
    let client = match config.directory_base_url.as_deref() {
        Some(base_url) => DirectoryClient::with_base_url(
            api_key,
            config.directory_request_timeout_secs,
            &config.directory_user_agent,
            config.directory_max_retries,
            config.directory_retry_backoff_base_ms,
            base_url,
        )?,
        None => DirectoryClient::new(
            api_key,
            config.directory_request_timeout_secs,
            &config.directory_user_agent,
            config.directory_max_retries,
            config.directory_retry_backoff_base_ms,
        )?,
    };
    Ok(client)
}

async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = scoopdb_db::PoolConfig::from_app_config(config);
    let pool = scoopdb_db::connect_pool(&config.database_url, pool_config).await?;
    scoopdb_db::run_migrations(&pool).await?;
    Ok(pool)
}

/// Builds the production importer and wires ctrl-c to its cancel token so a
/// long sweep stops at the next item boundary instead of mid-write.
async fn build_importer(
    config: &AppConfig,
) -> anyhow::Result<Importer<DirectoryClient, PgShopStore>> {
    let client = build_directory_client(config)?;
    let pool = connect(config).await?;
    let importer = Importer::new(
        client,
        PgShopStore::new(pool),
        ImporterConfig::from_app_config(config),
    );

    let token = importer.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("ctrl-c received, finishing the current item then stopping");
            token.cancel();
        }
    });

    Ok(importer)
}

fn print_result(result: &ImportResult) {
    println!("{}", result.message);
    for error in &result.errors {
        println!("  error: {error}");
    }
}

// Read-only lookup: builds just the directory client, so it works without
// a reachable database.
pub(crate) async fn run_search(config: &AppConfig, params: &SearchParams) -> anyhow::Result<()> {
    let client = build_directory_client(config)?;
    let default_radius_m = ImporterConfig::from_app_config(config).area_radius_m;
    let candidates = scoopdb_import::resolve_search(&client, params, default_radius_m).await?;
    if candidates.is_empty() {
        println!("no places found");
        return Ok(());
    }
    println!("{} places found:", candidates.len());
    for c in &candidates {
        let rating = c
            .rating
            .map_or_else(|| "unrated".to_owned(), |r| format!("{r:.1}"));
        println!(
            "  {}  {}  [{}]  {}",
            c.external_id,
            c.name,
            rating,
            c.address.as_deref().unwrap_or("address unknown")
        );
    }
    Ok(())
}

pub(crate) async fn run_import_one(
    config: &AppConfig,
    external_id: &str,
    options: &ImportOptions,
) -> anyhow::Result<()> {
    let importer = build_importer(config).await?;
    let result = importer.import_one(external_id, options).await;
    print_result(&result);
    if result.success {
        Ok(())
    } else {
        anyhow::bail!("import of {external_id} failed")
    }
}

pub(crate) async fn run_import_batch(
    config: &AppConfig,
    external_ids: &[String],
    options: &ImportOptions,
) -> anyhow::Result<()> {
    let importer = build_importer(config).await?;
    let result = importer.import_batch(external_ids, options).await;
    print_result(&result);
    Ok(())
}

pub(crate) async fn run_import_area(
    config: &AppConfig,
    address: &str,
    radius_m: Option<u32>,
    options: &ImportOptions,
) -> anyhow::Result<()> {
    let importer = build_importer(config).await?;
    let result = importer.import_area(address, radius_m, options).await;
    print_result(&result);
    Ok(())
}

pub(crate) async fn run_import_regions(
    config: &AppConfig,
    regions_file: Option<PathBuf>,
    dry_run: bool,
    options: &ImportOptions,
) -> anyhow::Result<()> {
    let path = regions_file.unwrap_or_else(|| config.regions_path.clone());
    // Loading rejects empty or malformed region lists up front.
    let regions = scoopdb_core::load_regions(&path)?.regions;

    if dry_run {
        println!("dry-run: would sweep {} regions:", regions.len());
        for region in &regions {
            match &region.notes {
                Some(notes) => println!("  {}  ({notes})", region.name),
                None => println!("  {}", region.name),
            }
        }
        return Ok(());
    }

    let importer = build_importer(config).await?;
    let result = importer.import_regions(&regions, options).await;
    print_result(&result);
    Ok(())
}

pub(crate) async fn run_refresh_all(
    config: &AppConfig,
    options: &ImportOptions,
) -> anyhow::Result<()> {
    let importer = build_importer(config).await?;
    let result = importer.refresh_all(options).await;
    print_result(&result);
    Ok(())
}
