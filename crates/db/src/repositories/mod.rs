//! Store implementations of the core lookup traits.
//!
//! Stores provide the `SeaORM` side of the core `ProviderRegistry` and
//! `RateRepository` traits, hiding the query details from the rest of the application.

pub mod provider;
pub mod rate;

pub use provider::ProviderStore;
pub use rate::RateStore;

use fxrates_core::QuoteError;
use sea_orm::DbErr;
use tracing::error;

/// Converts a database failure into the core storage error, logging it.
pub(crate) fn storage_error(operation: &'static str, err: &DbErr) -> QuoteError {
    error!(error = %err, operation, "Database query failed");
    QuoteError::Storage(err.to_string())
}
