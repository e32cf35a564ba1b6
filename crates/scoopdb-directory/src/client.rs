//! HTTP client for the place-directory provider REST API.
//!
//! Wraps `reqwest` with typed error handling, API key management, and
//! transparent retry on transient failures (429, network errors, 5xx).
//! The three endpoint families — geocode, search, place details — are the
//! only outbound calls the import pipeline makes.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use scoopdb_core::Coordinates;

use crate::error::DirectoryError;
use crate::retry::retry_with_backoff;
use crate::types::{GeocodeResponse, PlaceCandidate, PlaceDetail, SearchFilters, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://api.scoopscout.io/v1/";

/// Category filter sent with every search. The platform only tracks
/// ice-cream shops; letting the provider filter server-side keeps candidate
/// lists small.
const PLACE_CATEGORY: &str = "ice_cream_shop";

/// Client for the place-directory provider.
///
/// Use [`DirectoryClient::new`] for production or
/// [`DirectoryClient::with_base_url`] to point at a mock server in tests.
pub struct DirectoryClient {
    client: Client,
    api_key: String,
    base_url: Url,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in milliseconds for exponential backoff.
    backoff_base_ms: u64,
}

impl DirectoryClient {
    /// Creates a new client pointed at the production directory API.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, DirectoryError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`DirectoryError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining relative endpoint paths appends rather than replaces the
        // last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalised).map_err(|e| DirectoryError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Resolves a free-text address to coordinates.
    ///
    /// Takes the provider's first match; no retries happen beyond the shared
    /// transient-error policy, since an address the provider cannot resolve
    /// today will not resolve on the next attempt either.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::GeocodeNotFound`] if the provider returns no match.
    /// - [`DirectoryError::Http`] / [`DirectoryError::RateLimited`] /
    ///   [`DirectoryError::UnexpectedStatus`] on transport-level failures
    ///   after retries are exhausted.
    /// - [`DirectoryError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn geocode(&self, address: &str) -> Result<Coordinates, DirectoryError> {
        let url = self.endpoint("geocode", &[("address", address.to_owned())])?;
        let response: GeocodeResponse = self
            .get_json(url, &format!("geocode(\"{address}\")"))
            .await?;

        response
            .matches
            .first()
            .map(|m| Coordinates {
                lat: m.lat,
                lng: m.lng,
            })
            .ok_or_else(|| DirectoryError::GeocodeNotFound {
                address: address.to_owned(),
            })
    }

    /// Searches the directory by free-text query.
    ///
    /// An empty candidate list is a valid result, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on transport failure or a malformed response.
    pub async fn search_text(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<PlaceCandidate>, DirectoryError> {
        let mut params = vec![
            ("query", query.to_owned()),
            ("category", PLACE_CATEGORY.to_owned()),
        ];
        push_filter_params(&mut params, filters);

        let url = self.endpoint("places/search", &params)?;
        let response: SearchResponse = self
            .get_json(url, &format!("search_text(\"{query}\")"))
            .await?;
        Ok(response.places)
    }

    /// Searches the directory for places within `radius_m` meters of `center`.
    ///
    /// An empty candidate list is a valid result, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on transport failure or a malformed response.
    pub async fn search_nearby(
        &self,
        center: Coordinates,
        radius_m: u32,
        filters: &SearchFilters,
    ) -> Result<Vec<PlaceCandidate>, DirectoryError> {
        let mut params = vec![
            ("lat", center.lat.to_string()),
            ("lng", center.lng.to_string()),
            ("radius_m", radius_m.to_string()),
            ("category", PLACE_CATEGORY.to_owned()),
        ];
        push_filter_params(&mut params, filters);

        let url = self.endpoint("places/nearby", &params)?;
        let context = format!(
            "search_nearby({:.4},{:.4},{radius_m}m)",
            center.lat, center.lng
        );
        let response: SearchResponse = self.get_json(url, &context).await?;
        Ok(response.places)
    }

    /// Fetches the full external record for one place.
    ///
    /// This is the most expensive and most failure-prone call in the
    /// pipeline; callers are expected to isolate its failure to the single
    /// record being imported.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::NotFound`] if the external id does not exist.
    /// - [`DirectoryError::RateLimited`] / [`DirectoryError::Http`] /
    ///   [`DirectoryError::UnexpectedStatus`] after retries are exhausted.
    /// - [`DirectoryError::Deserialize`] on a malformed response.
    pub async fn place_details(&self, external_id: &str) -> Result<PlaceDetail, DirectoryError> {
        let url = self.endpoint(&format!("places/{external_id}"), &[])?;
        self.get_json(url, &format!("place_details({external_id})"))
            .await
    }

    /// Builds an endpoint URL from a relative path and query parameters.
    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> Result<Url, DirectoryError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| DirectoryError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join endpoint path \"{path}\": {e}"),
            })?;

        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }

        Ok(url)
    }

    /// Sends a GET request and deserializes the JSON body, with automatic
    /// retry on transient errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, DirectoryError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header("X-Api-Key", &self.api_key)
                    .send()
                    .await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(DirectoryError::RateLimited { retry_after_secs });
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(DirectoryError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(DirectoryError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<T>(&body).map_err(|e| DirectoryError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }
}

fn push_filter_params(params: &mut Vec<(&str, String)>, filters: &SearchFilters) {
    if let Some(min_rating) = filters.min_rating {
        params.push(("min_rating", min_rating.to_string()));
    }
    if filters.open_only {
        params.push(("open_only", "true".to_owned()));
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
