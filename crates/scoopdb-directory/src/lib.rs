pub mod client;
pub mod convert;
pub mod error;
pub mod retry;
pub mod types;

pub use client::DirectoryClient;
pub use convert::{reviews_from_detail, shop_from_detail};
pub use error::DirectoryError;
pub use types::{PlaceCandidate, PlaceDetail, PlaceReview, SearchFilters};
