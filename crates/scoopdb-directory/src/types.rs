//! Wire types for the place-directory provider API.
//!
//! Candidates and details are ephemeral: they live only within one import
//! attempt and are never persisted directly.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use scoopdb_core::Coordinates;

/// A lightweight search hit: enough to identify a place and decide whether a
/// full detail fetch is worth the call.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceCandidate {
    #[serde(rename = "id")]
    pub external_id: String,
    pub name: String,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub open: bool,
}

impl PlaceCandidate {
    #[must_use]
    pub fn location(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        }
    }
}

/// The full external record for one place, fetched per import attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetail {
    #[serde(rename = "id")]
    pub external_id: String,
    pub name: String,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Opening hours in the provider's own shape; passed through opaquely.
    pub hours: Option<serde_json::Value>,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacePhoto {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceReview {
    pub author: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Search filters applied server-side by the directory provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchFilters {
    pub min_rating: Option<f64>,
    pub open_only: bool,
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub places: Vec<PlaceCandidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    #[serde(default)]
    pub matches: Vec<GeocodeMatch>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeMatch {
    pub lat: f64,
    pub lng: f64,
}
