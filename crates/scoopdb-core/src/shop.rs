//! Canonical shapes shared across the directory client, persistence layer,
//! and import pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic point in WGS84 decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A canonical shop record that has not been persisted yet.
///
/// Produced by the converter from a fetched place detail; the internal `id`
/// is assigned by the database on insert and never appears here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShopRecord {
    pub external_id: Option<String>,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Opening hours as returned by the directory provider, stored verbatim
    /// as JSONB.
    pub hours: Option<serde_json::Value>,
    pub rating: Option<f64>,
    pub imported_by: Option<String>,
}

/// An externally-sourced review ready for insertion, linked to a shop by the
/// caller. Rows are append-only and carry a fixed `source = 'directory'` tag
/// at the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewImportedReview {
    pub author_name: Option<String>,
    pub rating: Option<f64>,
    pub text: Option<String>,
    pub source_timestamp: Option<DateTime<Utc>>,
}
