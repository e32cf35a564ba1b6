//! Seam between the pipeline and the external directory provider.
//!
//! The pipeline is generic over this trait so tests can drive it with an
//! in-memory fake; production uses [`DirectoryClient`].

use scoopdb_core::Coordinates;
use scoopdb_directory::{DirectoryClient, DirectoryError, PlaceCandidate, PlaceDetail, SearchFilters};

/// The four failure-prone external calls the pipeline composes.
#[allow(async_fn_in_trait)]
pub trait DirectoryProvider {
    /// Resolves a free-text address to coordinates.
    async fn geocode(&self, address: &str) -> Result<Coordinates, DirectoryError>;

    /// Searches the directory by free-text query.
    async fn search_text(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<PlaceCandidate>, DirectoryError>;

    /// Searches the directory within a radius of a center point.
    async fn search_nearby(
        &self,
        center: Coordinates,
        radius_m: u32,
        filters: &SearchFilters,
    ) -> Result<Vec<PlaceCandidate>, DirectoryError>;

    /// Fetches the full external record for one place.
    async fn place_details(&self, external_id: &str) -> Result<PlaceDetail, DirectoryError>;
}

impl DirectoryProvider for DirectoryClient {
    async fn geocode(&self, address: &str) -> Result<Coordinates, DirectoryError> {
        DirectoryClient::geocode(self, address).await
    }

    async fn search_text(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> Result<Vec<PlaceCandidate>, DirectoryError> {
        DirectoryClient::search_text(self, query, filters).await
    }

    async fn search_nearby(
        &self,
        center: Coordinates,
        radius_m: u32,
        filters: &SearchFilters,
    ) -> Result<Vec<PlaceCandidate>, DirectoryError> {
        DirectoryClient::search_nearby(self, center, radius_m, filters).await
    }

    async fn place_details(&self, external_id: &str) -> Result<PlaceDetail, DirectoryError> {
        DirectoryClient::place_details(self, external_id).await
    }
}
