//! The external directory import & reconciliation pipeline.
//!
//! Composes the directory client, the converter, validation, and persistence
//! into retryable, idempotent import operations with granular success/failure
//! reporting at three nesting levels: single record, batch, and multi-region
//! sweep. Failures at the single-item level never abort siblings; failures at
//! the region level never abort other regions.

pub mod cancel;
pub mod error;
pub mod importer;
pub mod options;
pub mod pacing;
pub mod provider;
pub mod result;
pub mod store;
pub mod validate;

pub use cancel::CancelToken;
pub use error::{ImportError, StoreError};
pub use importer::{resolve_search, Importer, ImporterConfig};
pub use options::{ImportOptions, SearchParams};
pub use pacing::Pacer;
pub use provider::DirectoryProvider;
pub use result::ImportResult;
pub use store::{ExistingShop, InsertOutcome, PgShopStore, ShopStore};
pub use validate::{validate_shop, ValidationReport};
