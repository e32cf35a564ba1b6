//! Pre-persistence checks for canonical shop records.
//!
//! Pure: never mutates input, no I/O. Only invoked when
//! `validate_before_import` is set — trusted bulk refreshes may run without
//! it.

use scoopdb_core::NewShopRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Checks a shop record for required fields and plausible values.
///
/// Rules: non-empty name, address present, coordinates present and within
/// WGS84 bounds (null island rejected as a sentinel for missing data), and
/// rating within 0..=5 when set.
#[must_use]
pub fn validate_shop(shop: &NewShopRecord) -> ValidationReport {
    let mut errors = Vec::new();

    if shop.name.trim().is_empty() {
        errors.push("name is empty".to_owned());
    }

    if shop.address.as_deref().map_or(true, |a| a.trim().is_empty()) {
        errors.push("address is missing".to_owned());
    }

    match (shop.latitude, shop.longitude) {
        (Some(lat), Some(lng)) => {
            if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
                errors.push(format!("latitude {lat} is out of range"));
            }
            if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
                errors.push(format!("longitude {lng} is out of range"));
            }
            if lat == 0.0 && lng == 0.0 {
                errors.push("coordinates are (0, 0)".to_owned());
            }
        }
        _ => errors.push("coordinates are missing".to_owned()),
    }

    if let Some(rating) = shop.rating {
        if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
            errors.push(format!("rating {rating} is out of range"));
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}
