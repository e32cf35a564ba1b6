//! Database operations for the `shops` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use scoopdb_core::NewShopRecord;

/// A row from the `shops` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShopRow {
    pub id: i64,
    pub public_id: Uuid,
    pub external_id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub hours: Option<serde_json::Value>,
    pub rating: Option<f64>,
    pub imported_by: Option<String>,
    pub last_synced: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Look up a shop by its directory external id.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn find_shop_by_external_id(
    pool: &PgPool,
    external_id: &str,
) -> Result<Option<ShopRow>, sqlx::Error> {
    sqlx::query_as::<_, ShopRow>(
        "SELECT id, public_id, external_id, name, address, latitude, longitude, \
                phone, website, hours, rating, imported_by, \
                last_synced, last_updated, created_at, updated_at \
         FROM shops \
         WHERE external_id = $1",
    )
    .bind(external_id)
    .fetch_optional(pool)
    .await
}

/// Insert a new shop, returning `Some(id)` on success or `None` when a row
/// with the same `external_id` already exists.
///
/// Uses `ON CONFLICT (external_id) DO NOTHING` so the external-id uniqueness
/// invariant is enforced by the database rather than by check-then-act in
/// application code. A concurrent import racing on the same external id sees
/// `None` here and can re-read the winner's row.
///
/// Sets `last_synced` to `NOW()` on the inserted row.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn insert_shop(pool: &PgPool, shop: &NewShopRecord) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO shops \
             (external_id, name, address, latitude, longitude, phone, website, \
              hours, rating, imported_by, last_synced) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8::JSONB, $9, $10, NOW()) \
         ON CONFLICT (external_id) DO NOTHING \
         RETURNING id",
    )
    .bind(&shop.external_id)
    .bind(&shop.name)
    .bind(&shop.address)
    .bind(shop.latitude)
    .bind(shop.longitude)
    .bind(&shop.phone)
    .bind(&shop.website)
    .bind(&shop.hours)
    .bind(shop.rating)
    .bind(&shop.imported_by)
    .fetch_optional(pool)
    .await
}

/// Update the mutable fields of an existing shop to the latest fetched values.
///
/// The internal `id`, `public_id`, and `external_id` are never touched.
/// `last_synced`, `last_updated`, and `updated_at` are all set to `NOW()`,
/// keeping them monotonically increasing across reconciliations.
///
/// Returns `true` if a row was updated, `false` if `id` does not exist.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn update_shop(
    pool: &PgPool,
    id: i64,
    shop: &NewShopRecord,
) -> Result<bool, sqlx::Error> {
    let rows_affected = sqlx::query(
        "UPDATE shops SET \
             name         = $2, \
             address      = $3, \
             latitude     = $4, \
             longitude    = $5, \
             phone        = $6, \
             website      = $7, \
             hours        = $8::JSONB, \
             rating       = $9, \
             last_synced  = NOW(), \
             last_updated = NOW(), \
             updated_at   = NOW() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(&shop.name)
    .bind(&shop.address)
    .bind(shop.latitude)
    .bind(shop.longitude)
    .bind(&shop.phone)
    .bind(&shop.website)
    .bind(&shop.hours)
    .bind(shop.rating)
    .execute(pool)
    .await?
    .rows_affected();

    Ok(rows_affected > 0)
}

/// List all shops that originate from the external directory (non-null
/// `external_id`), ordered by `id` for a stable refresh sequence.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_shops_with_external_id(pool: &PgPool) -> Result<Vec<ShopRow>, sqlx::Error> {
    sqlx::query_as::<_, ShopRow>(
        "SELECT id, public_id, external_id, name, address, latitude, longitude, \
                phone, website, hours, rating, imported_by, \
                last_synced, last_updated, created_at, updated_at \
         FROM shops \
         WHERE external_id IS NOT NULL \
         ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
}
