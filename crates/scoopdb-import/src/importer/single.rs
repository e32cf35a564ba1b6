//! Single-record reconciliation: the decision core every batch and sweep
//! ultimately funnels through.

use tracing::{debug, warn};

use scoopdb_directory::{reviews_from_detail, shop_from_detail, PlaceDetail};

use crate::error::ImportError;
use crate::importer::Importer;
use crate::options::ImportOptions;
use crate::provider::DirectoryProvider;
use crate::result::ImportResult;
use crate::store::{InsertOutcome, ShopStore};
use crate::validate::validate_shop;

impl<P: DirectoryProvider, S: ShopStore> Importer<P, S> {
    /// Imports or reconciles one directory place by external id.
    ///
    /// Never propagates an error: any failure is captured as a `failed`
    /// count with a traceable error entry, so batch callers can fold the
    /// result without aborting siblings.
    pub async fn import_one(&self, external_id: &str, options: &ImportOptions) -> ImportResult {
        match self.reconcile_one(external_id, options).await {
            Ok(result) => result,
            Err(e) => {
                warn!(external_id, error = %e, "import failed");
                ImportResult::failed_one(external_id, &e.to_string())
            }
        }
    }

    /// The fallible inner machine behind [`Importer::import_one`].
    ///
    /// Decision order: an existing record is updated when `update_existing`
    /// is set, skipped when `skip_existing` is set, and a failure otherwise.
    /// The skip path never touches the provider. A missing record is
    /// fetched, converted, optionally validated, and inserted; an insert
    /// conflict means a concurrent import won the race and is resolved by
    /// the same skip/fail rule.
    async fn reconcile_one(
        &self,
        external_id: &str,
        options: &ImportOptions,
    ) -> Result<ImportResult, ImportError> {
        let existing = self.store.find_by_external_id(external_id).await?;

        if let Some(existing) = existing {
            if options.update_existing {
                let detail = self.provider.place_details(external_id).await?;
                let shop = shop_from_detail(&detail, options.actor_id.as_deref());
                if options.validate_before_import {
                    let report = validate_shop(&shop);
                    if !report.valid {
                        return Err(ImportError::ValidationFailed {
                            errors: report.errors,
                        });
                    }
                }
                self.store.update_shop(existing.id, &shop).await?;
                debug!(external_id, shop_id = existing.id, "updated existing shop");
                if options.import_reviews {
                    self.import_reviews_best_effort(existing.id, &detail).await;
                }
                return Ok(ImportResult::updated_one(existing.id));
            }
            if options.skip_existing {
                debug!(external_id, shop_id = existing.id, "skipped existing shop");
                return Ok(ImportResult::skipped_one(Some(existing.id)));
            }
            return Err(ImportError::AlreadyExists {
                external_id: external_id.to_owned(),
            });
        }

        let detail = self.provider.place_details(external_id).await?;
        let shop = shop_from_detail(&detail, options.actor_id.as_deref());
        if options.validate_before_import {
            let report = validate_shop(&shop);
            if !report.valid {
                return Err(ImportError::ValidationFailed {
                    errors: report.errors,
                });
            }
        }

        match self.store.insert_shop(&shop).await? {
            InsertOutcome::Inserted(shop_id) => {
                debug!(external_id, shop_id, "created shop");
                if options.import_reviews {
                    self.import_reviews_best_effort(shop_id, &detail).await;
                }
                Ok(ImportResult::created_one(shop_id))
            }
            InsertOutcome::Conflict => {
                // Lost a race with a concurrent import of the same place.
                if options.skip_existing {
                    let id = self
                        .store
                        .find_by_external_id(external_id)
                        .await?
                        .map(|e| e.id);
                    Ok(ImportResult::skipped_one(id))
                } else {
                    Err(ImportError::AlreadyExists {
                        external_id: external_id.to_owned(),
                    })
                }
            }
        }
    }

    /// Persists the detail's reviews for a shop, logging instead of failing:
    /// review data is auxiliary and must never undo a successful shop import.
    pub(crate) async fn import_reviews_best_effort(&self, shop_id: i64, detail: &PlaceDetail) {
        let reviews = reviews_from_detail(detail);
        if reviews.is_empty() {
            return;
        }
        match self.store.insert_reviews(shop_id, &reviews).await {
            Ok(count) => debug!(shop_id, count, "imported reviews"),
            Err(e) => warn!(shop_id, error = %e, "review import failed, shop kept"),
        }
    }
}
