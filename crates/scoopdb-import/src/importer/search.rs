//! Search-driven discovery and import.

use tracing::info;

use scoopdb_directory::{PlaceCandidate, SearchFilters};

use crate::error::ImportError;
use crate::importer::{Importer, DEFAULT_MAX_RESULTS_PER_REGION, DEFAULT_MIN_RATING};
use crate::options::{ImportOptions, SearchParams};
use crate::provider::DirectoryProvider;
use crate::result::ImportResult;
use crate::store::ShopStore;

/// Resolves search parameters against a provider, with no storage involved.
///
/// Resolution order: explicit coordinates win over an address (geocoded
/// first), which wins over a free-text query. Callers that only want to
/// look, like the CLI `search` subcommand, use this directly and never open
/// a database connection.
///
/// # Errors
///
/// [`ImportError::InvalidSearch`] when neither a query, an address, nor
/// coordinates are supplied; directory failures otherwise.
pub async fn resolve_search<P: DirectoryProvider>(
    provider: &P,
    params: &SearchParams,
    default_radius_m: u32,
) -> Result<Vec<PlaceCandidate>, ImportError> {
    if let Some(center) = params.location {
        let radius = params.radius_m.unwrap_or(default_radius_m);
        return Ok(provider.search_nearby(center, radius, &params.filters).await?);
    }
    if let Some(address) = params.address.as_deref() {
        let center = provider.geocode(address).await?;
        let radius = params.radius_m.unwrap_or(default_radius_m);
        return Ok(provider.search_nearby(center, radius, &params.filters).await?);
    }
    if let Some(query) = params.query.as_deref() {
        return Ok(provider.search_text(query, &params.filters).await?);
    }
    Err(ImportError::InvalidSearch)
}

impl<P: DirectoryProvider, S: ShopStore> Importer<P, S> {
    /// Resolves the search parameters and returns raw candidates without
    /// persisting anything. See [`resolve_search`].
    ///
    /// # Errors
    ///
    /// [`ImportError::InvalidSearch`] when neither a query, an address, nor
    /// coordinates are supplied; directory failures otherwise.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<PlaceCandidate>, ImportError> {
        resolve_search(&self.provider, params, self.config.area_radius_m).await
    }

    /// Searches, then imports the resulting candidates as a paced batch.
    ///
    /// A failed search is a sweep-level failure folded into the result, not
    /// a propagated error; a search that yields nothing produces the
    /// zero-count non-success result. Candidates beyond the per-sweep cap
    /// are dropped before importing.
    ///
    /// # Errors
    ///
    /// Only [`ImportError::InvalidSearch`] — everything else is captured in
    /// the returned result.
    pub async fn import_from_search(
        &self,
        params: &SearchParams,
        options: &ImportOptions,
    ) -> Result<ImportResult, ImportError> {
        let candidates = match self.search(params).await {
            Ok(candidates) => candidates,
            Err(ImportError::InvalidSearch) => return Err(ImportError::InvalidSearch),
            Err(e) => return Ok(ImportResult::sweep_failure(format!("search failed: {e}"))),
        };
        if candidates.is_empty() {
            return Ok(ImportResult::no_candidates());
        }

        let cap = options
            .max_results_per_region
            .unwrap_or(DEFAULT_MAX_RESULTS_PER_REGION);
        if candidates.len() > cap {
            info!(
                found = candidates.len(),
                cap, "capping search candidates before import"
            );
        }
        let ids: Vec<String> = candidates
            .into_iter()
            .take(cap)
            .map(|c| c.external_id)
            .collect();

        Ok(self.import_batch(&ids, options).await)
    }

    /// Imports every qualifying place around an address: one geocode, then
    /// a nearby search filtered to open places at or above the default
    /// minimum rating.
    pub async fn import_area(
        &self,
        address: &str,
        radius_m: Option<u32>,
        options: &ImportOptions,
    ) -> ImportResult {
        let params = SearchParams {
            address: Some(address.to_owned()),
            radius_m: Some(radius_m.unwrap_or(self.config.area_radius_m)),
            filters: SearchFilters {
                min_rating: Some(DEFAULT_MIN_RATING),
                open_only: true,
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
