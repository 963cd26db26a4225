//! Shared quote pipeline.
//!
//! A quote is built (resolving its source), then evaluated once with
//! [`Quote::perform`]: fetch the rows for the kind's date scope, scale them by
//! the amount, and rebase them onto the requested base when it is not EUR.
//! End-of-day and interval quotes differ only in their [`QuoteKind`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use fxrates_shared::types::DEFAULT_BASE;
use rust_decimal::Decimal;
use serde::Serialize;

use super::repository::RateRepository;
use super::rounding::round_rate;
use super::types::{DateScope, MAX_AMOUNT, MAX_AMOUNT_SCALE, QuoteRequest, QuoteResult, RateQuery, RateRecord};
use crate::error::QuoteError;
use crate::provider::{ProviderRegistry, SourceResolver};

/// What distinguishes one kind of quote from another: the dates it reads
/// and the shape of its response.
pub trait QuoteKind: Send + Sync {
    /// Serialized response body.
    type Output: Serialize;

    /// Dates to fetch.
    fn scope(&self) -> DateScope;

    /// Shapes an evaluated quote into its response body.
    fn format(&self, summary: QuoteSummary<'_>) -> Self::Output;

    /// Cache key for a non-empty result. `source` is empty when no provider was resolved.
    fn cache_key(&self, result: &QuoteResult, source: &str) -> String;
}

/// Everything a [`QuoteKind`] needs to format a response.
#[derive(Debug, Clone, Copy)]
pub struct QuoteSummary<'a> {
    /// Requested amount.
    pub amount: Decimal,
    /// Requested base currency.
    pub base: &'a str,
    /// Resolved provider, if any.
    pub source: Option<&'a str>,
    /// Evaluated rates.
    pub result: &'a QuoteResult,
}

/// Evaluation state of a quote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuoteState {
    /// Not computed yet.
    #[default]
    Unevaluated,
    /// Computed; never recomputed.
    Evaluated(QuoteResult),
}

/// A quote request bound to its resolved source.
#[derive(Debug, Clone)]
pub struct Quote<K: QuoteKind> {
    kind: K,
    request: QuoteRequest,
    source: Option<String>,
    state: QuoteState,
}

impl<K: QuoteKind> Quote<K> {
    /// Creates a quote with an already resolved source.
    #[must_use]
    pub fn new(kind: K, request: QuoteRequest, source: Option<String>) -> Self {
        Self {
            kind,
            request,
            source,
            state: QuoteState::Unevaluated,
        }
    }

    /// Creates a quote, resolving its source according to `request.source`.
    ///
    /// # Errors
    ///
    /// Returns a resolution error when the requested or implied provider
    /// cannot be used, or `Storage` if a registry lookup fails.
    pub async fn build<P: ProviderRegistry>(
        kind: K,
        request: QuoteRequest,
        registry: &P,
    ) -> Result<Self, QuoteError> {
        let source = SourceResolver::new(registry)
            .select(&request.base, &request.source)
            .await?;
        Ok(Self::new(kind, request, source))
    }

    /// Fetches and computes the quote.
    ///
    /// Returns `Ok(false)` without fetching when the quote was already evaluated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for amounts outside `(0, MAX_AMOUNT]` or with
    /// more than `MAX_AMOUNT_SCALE` decimal places, or
    /// propagates the repository error unchanged. The quote stays unevaluated
    /// on error.
    pub async fn perform<R: RateRepository>(&mut self, rates: &R) -> Result<bool, QuoteError> {
        if self.is_evaluated() {
            return Ok(false);
        }

        let amount = self.request.amount;
        if amount <= Decimal::ZERO
            || amount > MAX_AMOUNT
            || amount.normalize().scale() > MAX_AMOUNT_SCALE
        {
            return Err(QuoteError::InvalidAmount(amount.to_string()));
        }

        let records = rates.fetch(&self.query()).await?;
        self.state = QuoteState::Evaluated(compute_rates(&records, &self.request));
        Ok(true)
    }

    /// Query pushed down to the rate repository.
    #[must_use]
    pub fn query(&self) -> RateQuery {
        RateQuery {
            scope: self.kind.scope(),
            provider: self.source.clone(),
            currencies: self.request.currencies_to_fetch(),
        }
    }

    /// Returns true once [`Self::perform`] has succeeded.
    #[must_use]
    pub const fn is_evaluated(&self) -> bool {
        matches!(self.state, QuoteState::Evaluated(_))
    }

    /// Evaluation state.
    #[must_use]
    pub const fn state(&self) -> &QuoteState {
        &self.state
    }

    /// Evaluated rates, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&QuoteResult> {
        match &self.state {
            QuoteState::Evaluated(result) => Some(result),
            QuoteState::Unevaluated => None,
        }
    }

    /// Returns true if no date has rates.
    #[must_use]
    pub fn not_found(&self) -> bool {
        self.result().is_none_or(QuoteResult::is_empty)
    }

    /// Response body.
    #[must_use]
    pub fn formatted(&self) -> K::Output {
        let empty = QuoteResult::default();
        self.kind.format(QuoteSummary {
            amount: self.request.amount,
            base: &self.request.base,
            source: self.source.as_deref(),
            result: self.result().unwrap_or(&empty),
        })
    }

    /// Cache key, or `None` when there is nothing to cache.
    #[must_use]
    pub fn cache_key(&self) -> Option<String> {
        match self.result() {
            Some(result) if !result.is_empty() => Some(
                self.kind
                    .cache_key(result, self.source.as_deref().unwrap_or_default()),
            ),
            _ => None,
        }
    }

    /// Resolved provider code.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Request this quote answers.
    #[must_use]
    pub const fn request(&self) -> &QuoteRequest {
        &self.request
    }

    /// Quote kind.
    #[must_use]
    pub const fn kind(&self) -> &K {
        &self.kind
    }
}

/// Turns fetched EUR-relative rows into quoted rates.
///
/// Rows are grouped by date and scaled by the amount. For a base other than
/// EUR, each date is divided through by the base's own value; dates with no
/// base rate, or nothing left besides it, are dropped.
#[must_use]
pub fn compute_rates(records: &[RateRecord], request: &QuoteRequest) -> QuoteResult {
    let mut days: BTreeMap<NaiveDate, BTreeMap<String, Decimal>> = BTreeMap::new();
    for record in records {
        let Some(value) = request.amount.checked_mul(record.rate) else {
            continue;
        };
        days.entry(record.date)
            .or_default()
            .insert(record.currency_code.clone(), round_rate(value));
    }

    if !request.must_rebase() {
        return days.into();
    }

    days.into_iter()
        .filter_map(|(date, rates)| rebase_day(rates, request).map(|rates| (date, rates)))
        .collect::<BTreeMap<_, _>>()
        .into()
}

/// Rebases one date's amount-scaled rates onto `request.base`.
fn rebase_day(
    mut rates: BTreeMap<String, Decimal>,
    request: &QuoteRequest,
) -> Option<BTreeMap<String, Decimal>> {
    // EUR against itself is always 1, whatever happens to be stored.
    if request.wants(DEFAULT_BASE) {
        rates.insert(DEFAULT_BASE.to_string(), request.amount);
    }

    let divisor = rates.remove(&request.base)?;
    if divisor.is_zero() || rates.is_empty() {
        return None;
    }

    Some(
        rates
            .into_iter()
            .filter_map(|(code, value)| {
                let rebased = value.checked_div(divisor)?.checked_mul(request.amount)?;
                Some((code, round_rate(rebased)))
            })
            .collect(),
    )
}
