//! Provider catalog lookups.

use std::future::Future;

use super::types::Provider;
use crate::error::QuoteError;

/// Read-only catalog of rate providers.
///
/// This trait is implemented by the db crate to provide actual database lookups.
pub trait ProviderRegistry: Send + Sync {
    /// Lists every provider, ordered by code.
    fn all(&self) -> impl Future<Output = Result<Vec<Provider>, QuoteError>> + Send;

    /// Finds a provider by code.
    fn find(&self, code: &str) -> impl Future<Output = Result<Option<Provider>, QuoteError>> + Send;

    /// Finds the provider natively publishing against `currency`.
    ///
    /// When several match, the one with the lowest code wins.
    fn find_by_native_base(
        &self,
        currency: &str,
    ) -> impl Future<Output = Result<Option<Provider>, QuoteError>> + Send;

    /// Returns true if the provider has recorded at least one rate, on any date.
    fn has_any_data(&self, code: &str) -> impl Future<Output = Result<bool, QuoteError>> + Send;
}
