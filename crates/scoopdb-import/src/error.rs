use thiserror::Error;

use scoopdb_directory::DirectoryError;

/// Errors surfaced by [`ShopStore`](crate::store::ShopStore) implementations.
///
/// Kept deliberately narrow so in-memory test stores can construct them
/// without pulling in a database driver.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("shop {id} not found")]
    NotFound { id: i64 },
    #[error("storage error: {0}")]
    Backend(String),
}

/// Errors inside one import attempt.
///
/// All variants except [`ImportError::InvalidSearch`] are caught at the
/// single-item or region boundary and folded into the structured result;
/// `InvalidSearch` indicates a caller programming mistake and is the only
/// error allowed to propagate to the top level.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("validation failed: {}", errors.join("; "))]
    ValidationFailed { errors: Vec<String> },

    #[error("shop with external id {external_id} already exists")]
    AlreadyExists { external_id: String },

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("search request needs a query or a location (address or coordinates)")]
    InvalidSearch,
}
