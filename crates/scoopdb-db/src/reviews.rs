//! Database operations for the `imported_reviews` table.

use sqlx::PgPool;

use scoopdb_core::NewImportedReview;

/// Bulk-insert externally-sourced reviews for a shop.
///
/// Rows are append-only and tagged `source = 'directory'` by the column
/// default. There is deliberately no dedup key — a repeated refresh inserts
/// the provider's current review set again (see DESIGN.md).
///
/// Returns the number of rows inserted.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if any insert fails; earlier rows from the same
/// call remain inserted.
pub async fn insert_imported_reviews(
    pool: &PgPool,
    shop_id: i64,
    reviews: &[NewImportedReview],
) -> Result<u64, sqlx::Error> {
    let mut inserted: u64 = 0;

    for review in reviews {
        sqlx::query(
            "INSERT INTO imported_reviews \
                 (shop_id, author_name, rating, text, source_timestamp) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(shop_id)
        .bind(&review.author_name)
        .bind(review.rating)
        .bind(&review.text)
        .bind(review.source_timestamp)
        .execute(pool)
        .await?;

        inserted += 1;
    }

    Ok(inserted)
}
