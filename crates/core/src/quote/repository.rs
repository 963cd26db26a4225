//! Rate storage boundary.

use std::future::Future;

use super::types::{RateQuery, RateRecord};
use crate::error::QuoteError;

/// Supplies stored rate rows.
///
/// This trait is implemented by the db crate to provide actual database queries.
/// Provider and currency filters are applied by the implementation.
pub trait RateRepository: Send + Sync {
    /// Fetches the rows matching `query`.
    ///
    /// For [`DateScope::On`](super::DateScope::On) the rows come from the most
    /// recent date on or before the requested one that has data, so weekends,
    /// holidays and future dates still yield a quote. For
    /// [`DateScope::Between`](super::DateScope::Between) every row in the
    /// inclusive range is returned.
    fn fetch(
        &self,
        query: &RateQuery,
    ) -> impl Future<Output = Result<Vec<RateRecord>, QuoteError>> + Send;

    /// Distinct currency codes with at least one stored row, sorted.
    fn currency_codes(&self) -> impl Future<Output = Result<Vec<String>, QuoteError>> + Send;
}
