//! Conversion from provider place details to canonical shop records.
//!
//! Pure and deterministic: the same [`PlaceDetail`] always yields the same
//! [`NewShopRecord`]. No network or database access happens here.

use scoopdb_core::{NewImportedReview, NewShopRecord};

use crate::types::PlaceDetail;

/// Maps an external place detail to an unpersisted canonical shop record.
///
/// `actor_id` identifies who triggered the import and lands in
/// `imported_by`. Empty strings from the provider are treated as absent.
#[must_use]
pub fn shop_from_detail(detail: &PlaceDetail, actor_id: Option<&str>) -> NewShopRecord {
    NewShopRecord {
        external_id: Some(detail.external_id.clone()),
        name: detail.name.trim().to_owned(),
        address: non_empty(detail.address.as_deref()),
        latitude: detail.lat,
        longitude: detail.lng,
        phone: non_empty(detail.phone.as_deref()),
        website: non_empty(detail.website.as_deref()),
        hours: detail.hours.clone(),
        rating: detail.rating,
        imported_by: actor_id.map(str::to_owned),
    }
}

/// Maps the detail's review list to unpersisted imported-review rows.
///
/// Reviews with neither text nor rating carry no signal and are dropped.
#[must_use]
pub fn reviews_from_detail(detail: &PlaceDetail) -> Vec<NewImportedReview> {
    detail
        .reviews
        .iter()
        .filter(|r| r.text.as_deref().is_some_and(|t| !t.trim().is_empty()) || r.rating.is_some())
        .map(|r| NewImportedReview {
            author_name: non_empty(r.author.as_deref()),
            rating: r.rating,
            text: non_empty(r.text.as_deref()),
            source_timestamp: r.published_at,
        })
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
