//! Paced batch imports over a list of external ids.

use tracing::info;

use crate::importer::Importer;
use crate::options::ImportOptions;
use crate::pacing::Pacer;
use crate::provider::DirectoryProvider;
use crate::result::ImportResult;
use crate::store::ShopStore;

impl<P: DirectoryProvider, S: ShopStore> Importer<P, S> {
    /// Imports each external id in order, pacing items against the
    /// directory's rate limits and folding every per-item result into one
    /// aggregate. One item's failure never aborts the rest.
    ///
    /// Checks the cancel token between items; on cancellation the partial
    /// aggregate is returned with a note listing how many ids were left
    /// unprocessed.
    pub async fn import_batch(
        &self,
        external_ids: &[String],
        options: &ImportOptions,
    ) -> ImportResult {
        let mut aggregate = ImportResult::default();
        let mut pacer = Pacer::new(self.config.item_delay);

        for (index, external_id) in external_ids.iter().enumerate() {
            if self.cancel.is_cancelled() {
                let remaining = external_ids.len() - index;
                info!(remaining, "batch cancelled");
                aggregate
                    .errors
                    .push(format!("cancelled with {remaining} ids unprocessed"));
                break;
            }
            pacer.wait().await;
            aggregate.fold(self.import_one(external_id, options).await);
        }

        aggregate.finish()
    }
}
