//! The import orchestrator.
//!
//! One `Importer` composes a [`DirectoryProvider`] and a [`ShopStore`] into
//! the full pipeline: single-record reconciliation, paced batches, and
//! region sweeps. The per-operation entry points live in sibling files;
//! this module holds the shared state and configuration.

mod batch;
mod refresh;
mod regions;
mod search;
mod single;

pub use search::resolve_search;

use tokio::time::Duration;

use scoopdb_core::AppConfig;

use crate::cancel::CancelToken;
use crate::provider::DirectoryProvider;
use crate::store::ShopStore;

/// Default minimum rating filter for area and region sweeps.
pub(crate) const DEFAULT_MIN_RATING: f64 = 3.5;

/// Default cap on candidates processed per region.
pub(crate) const DEFAULT_MAX_RESULTS_PER_REGION: usize = 5;

/// Tuning for the importer's pacing and search geometry.
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Minimum delay between single-record imports within a batch.
    pub item_delay: Duration,
    /// Minimum delay between region sweeps.
    pub region_delay: Duration,
    /// Search radius for `import_area` when the caller does not supply one.
    pub area_radius_m: u32,
    /// Search radius used for each region sweep.
    pub region_radius_m: u32,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            item_delay: Duration::from_millis(100),
            region_delay: Duration::from_secs(1),
            area_radius_m: 5_000,
            region_radius_m: 10_000,
        }
    }
}

impl ImporterConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            item_delay: Duration::from_millis(config.import_item_delay_ms),
            region_delay: Duration::from_millis(config.import_region_delay_ms),
            ..Self::default()
        }
    }
}

/// The import pipeline, generic over its two external seams.
pub struct Importer<P, S> {
    pub(crate) provider: P,
    pub(crate) store: S,
    pub(crate) config: ImporterConfig,
    pub(crate) cancel: CancelToken,
}

impl<P: DirectoryProvider, S: ShopStore> Importer<P, S> {
    pub fn new(provider: P, store: S, config: ImporterConfig) -> Self {
        Self {
            provider,
            store,
            config,
            cancel: CancelToken::new(),
        }
    }

    /// A handle the caller can use to abort a running sweep between items.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}
