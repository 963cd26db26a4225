//! Date range quotes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::engine::{Quote, QuoteKind, QuoteSummary};
use super::types::{DateScope, QuoteResult};

/// Quote over an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// First requested day.
    pub start: NaiveDate,
    /// Last requested day.
    pub end: NaiveDate,
}

impl Interval {
    /// Creates an interval quote kind.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// Interval quote.
pub type IntervalQuote = Quote<Interval>;

/// Response body of an interval quote.
///
/// `start_date` and `end_date` are the first and last dates that have rates,
/// which can lie inside the requested range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalResponse {
    /// Requested amount.
    pub amount: Decimal,
    /// Base currency.
    pub base: String,
    /// First quoted date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last quoted date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Rates by date, then currency code.
    pub rates: QuoteResult,
    /// Provider the rates came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl QuoteKind for Interval {
    type Output = IntervalResponse;

    fn scope(&self) -> DateScope {
        DateScope::Between {
            start: self.start,
            end: self.end,
        }
    }

    fn format(&self, summary: QuoteSummary<'_>) -> IntervalResponse {
        IntervalResponse {
            amount: summary.amount,
            base: summary.base.to_string(),
            start_date: summary.result.first().map(|(date, _)| *date),
            end_date: summary.result.last().map(|(date, _)| *date),
            rates: summary.result.clone(),
            source: summary.source.map(str::to_string),
        }
    }

    fn cache_key(&self, result: &QuoteResult, source: &str) -> String {
        let first = result.first().map(|(date, _)| date.to_string()).unwrap_or_default();
        let last = result.last().map(|(date, _)| date.to_string()).unwrap_or_default();
        format!("{first}_{last}-{source}")
    }
}
