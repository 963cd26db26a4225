//! Single-date quotes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::engine::{Quote, QuoteKind, QuoteSummary};
use super::types::{DateScope, QuoteResult};

/// Quote for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfDay {
    /// Requested date. The quoted date may be earlier when it has no data.
    pub date: NaiveDate,
}

impl EndOfDay {
    /// Creates an end-of-day quote kind.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self { date }
    }
}

/// End-of-day quote.
pub type EndOfDayQuote = Quote<EndOfDay>;

/// Response body of an end-of-day quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndOfDayResponse {
    /// Requested amount.
    pub amount: Decimal,
    /// Base currency.
    pub base: String,
    /// Date the rates were published.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Rates by currency code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates: Option<BTreeMap<String, Decimal>>,
    /// Provider the rates came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl QuoteKind for EndOfDay {
    type Output = EndOfDayResponse;

    fn scope(&self) -> DateScope {
        DateScope::On(self.date)
    }

    fn format(&self, summary: QuoteSummary<'_>) -> EndOfDayResponse {
        let first = summary.result.first();
        EndOfDayResponse {
            amount: summary.amount,
            base: summary.base.to_string(),
            date: first.map(|(date, _)| *date),
            rates: first.map(|(_, rates)| rates.clone()),
            source: summary.source.map(str::to_string),
        }
    }

    fn cache_key(&self, result: &QuoteResult, source: &str) -> String {
        let date = result.first().map(|(date, _)| date.to_string()).unwrap_or_default();
        format!("{date}-{source}")
    }
}
