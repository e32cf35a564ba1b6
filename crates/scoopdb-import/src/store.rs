//! Seam between the pipeline and shop persistence.
//!
//! The storage layer — not application code — enforces the one-row-per-
//! external-id invariant: [`ShopStore::insert_shop`] reports a conflict as a
//! value instead of racing a lookup against an insert. Production wires this
//! to Postgres through [`PgShopStore`]; tests use an in-memory fake.

use sqlx::PgPool;

use scoopdb_core::{NewImportedReview, NewShopRecord};

use crate::error::StoreError;

/// The slice of a persisted shop the reconciler needs to decide
/// create/update/skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingShop {
    pub id: i64,
    pub external_id: Option<String>,
}

/// Result of an insert attempt against the unique external-id constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(i64),
    /// A row with this external id already exists — possibly created by a
    /// concurrent import between our lookup and our insert.
    Conflict,
}

#[allow(async_fn_in_trait)]
pub trait ShopStore {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<ExistingShop>, StoreError>;

    /// Upsert-free insert: the database decides whether the external id is
    /// taken and the caller observes the outcome as a value.
    async fn insert_shop(&self, shop: &NewShopRecord) -> Result<InsertOutcome, StoreError>;

    async fn update_shop(&self, id: i64, shop: &NewShopRecord) -> Result<(), StoreError>;

    /// External ids of every persisted shop that originates from the
    /// directory, in a stable order.
    async fn list_external_ids(&self) -> Result<Vec<String>, StoreError>;

    async fn insert_reviews(
        &self,
        shop_id: i64,
        reviews: &[NewImportedReview],
    ) -> Result<u64, StoreError>;
}

/// Postgres-backed [`ShopStore`] delegating to the `scoopdb-db` queries.
#[derive(Clone)]
pub struct PgShopStore {
    pool: PgPool,
}

impl PgShopStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ShopStore for PgShopStore {
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<ExistingShop>, StoreError> {
        let row = scoopdb_db::find_shop_by_external_id(&self.pool, external_id)
            .await
            .map_err(backend)?;
        Ok(row.map(|r| ExistingShop {
            id: r.id,
            external_id: r.external_id,
        }))
    }

    async fn insert_shop(&self, shop: &NewShopRecord) -> Result<InsertOutcome, StoreError> {
        let inserted = scoopdb_db::insert_shop(&self.pool, shop)
            .await
            .map_err(backend)?;
        Ok(match inserted {
            Some(id) => InsertOutcome::Inserted(id),
            None => InsertOutcome::Conflict,
        })
    }

    async fn update_shop(&self, id: i64, shop: &NewShopRecord) -> Result<(), StoreError> {
        let updated = scoopdb_db::update_shop(&self.pool, id, shop)
            .await
            .map_err(backend)?;
        if updated {
            Ok(())
        } else {
            Err(StoreError::NotFound { id })
        }
    }

    async fn list_external_ids(&self) -> Result<Vec<String>, StoreError> {
        let rows = scoopdb_db::list_shops_with_external_id(&self.pool)
            .await
            .map_err(backend)?;
        Ok(rows.into_iter().filter_map(|r| r.external_id).collect())
    }

    async fn insert_reviews(
        &self,
        shop_id: i64,
        reviews: &[NewImportedReview],
    ) -> Result<u64, StoreError> {
        scoopdb_db::insert_imported_reviews(&self.pool, shop_id, reviews)
            .await
            .map_err(backend)
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}
