//! Bulk refresh of every shop already linked to the directory.

use tracing::info;

use crate::importer::Importer;
use crate::options::ImportOptions;
use crate::provider::DirectoryProvider;
use crate::result::ImportResult;
use crate::store::ShopStore;

impl<P: DirectoryProvider, S: ShopStore> Importer<P, S> {
    /// Re-fetches details for every persisted shop with an external id and
    /// updates each in place, regardless of the skip/update flags passed in.
    ///
    /// Runs as a paced batch, so it shares cancellation and per-item
    /// isolation with [`Importer::import_batch`].
    pub async fn refresh_all(&self, options: &ImportOptions) -> ImportResult {
        let external_ids = match self.store.list_external_ids().await {
            Ok(ids) => ids,
            Err(e) => return ImportResult::sweep_failure(format!("listing shops failed: {e}")),
        };
        if external_ids.is_empty() {
            return ImportResult::default().finish();
        }
        info!(count = external_ids.len(), "refreshing linked shops");

        let options = ImportOptions {
            update_existing: true,
            skip_existing: false,
            ..options.clone()
        };
        self.import_batch(&external_ids, &options).await
    }
}
