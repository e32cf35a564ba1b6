//! Multi-region sweeps over the configured region list.

use tracing::info;

use scoopdb_core::RegionConfig;
use scoopdb_directory::SearchFilters;

use crate::importer::{Importer, DEFAULT_MIN_RATING};
use crate::options::{ImportOptions, SearchParams};
use crate::pacing::Pacer;
use crate::provider::DirectoryProvider;
use crate::result::ImportResult;
use crate::store::ShopStore;

impl<P: DirectoryProvider, S: ShopStore> Importer<P, S> {
    /// Sweeps every configured region in order, pacing regions against the
    /// directory's rate limits. Regions are isolated: one region's geocode
    /// or search failure becomes an error entry and the sweep moves on.
    ///
    /// Checks the cancel token between regions; on cancellation the partial
    /// aggregate is returned with a note listing the regions left
    /// unswept.
    pub async fn import_regions(
        &self,
        regions: &[RegionConfig],
        options: &ImportOptions,
    ) -> ImportResult {
        let mut aggregate = ImportResult::default();
        let mut pacer = Pacer::new(self.config.region_delay);

        for (index, region) in regions.iter().enumerate() {
            if self.cancel.is_cancelled() {
                let remaining = regions.len() - index;
                info!(remaining, "region sweep cancelled");
                aggregate
                    .errors
                    .push(format!("cancelled with {remaining} regions unprocessed"));
                break;
            }
            pacer.wait().await;
            info!(region = %region.name, "sweeping region");
            let result = self.import_region(region, options).await;
            aggregate.fold_with_context(&region.name, result);
        }

        aggregate.finish()
    }

    /// Sweeps one region: geocodes its name, searches nearby with the
    /// default minimum-rating filter, and imports the capped candidates.
    pub async fn import_region(
        &self,
        region: &RegionConfig,
        options: &ImportOptions,
    ) -> ImportResult {
        let params = SearchParams {
            address: Some(region.name.clone()),
            radius_m: Some(self.config.region_radius_m),
            filters: SearchFilters {
                min_rating: Some(DEFAULT_MIN_RATING),
                ..SearchFilters::default()
            },
            ..SearchParams::default()
        };
        match self.import_from_search(&params, options).await {
            Ok(result) => result,
            // Unreachable: the params always carry an address.
            Err(e) => ImportResult::sweep_failure(e.to_string()),
        }
    }
}
