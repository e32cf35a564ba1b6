use scoopdb_core::Coordinates;
use scoopdb_directory::SearchFilters;

/// Per-call knobs for the import pipeline. Not persisted.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Run the validator before any insert/update. Trusted bulk refreshes
    /// may turn this off.
    pub validate_before_import: bool,
    /// An already-known external id is counted as skipped instead of failed.
    pub skip_existing: bool,
    /// Re-fetch details for already-known external ids and update them in
    /// place. Takes precedence over `skip_existing`.
    pub update_existing: bool,
    /// Persist the provider's review list after a successful create/update.
    pub import_reviews: bool,
    /// Cap on candidates processed per region sweep. `None` uses the
    /// built-in default.
    pub max_results_per_region: Option<usize>,
    /// Recorded in `imported_by` on created shops.
    pub actor_id: Option<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            validate_before_import: true,
            skip_existing: true,
            update_existing: false,
            import_reviews: false,
            max_results_per_region: None,
            actor_id: None,
        }
    }
}

/// Parameters for the pure-search entry point and search-driven imports.
///
/// Exactly one of `query`, `address`, or `location` must be supplied;
/// `location` wins over `address` wins over `query` when several are set.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub address: Option<String>,
    pub location: Option<Coordinates>,
    pub radius_m: Option<u32>,
    pub filters: SearchFilters,
}
