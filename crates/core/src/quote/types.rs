//! Quote domain types.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use fxrates_shared::types::DEFAULT_BASE;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::provider::SourceSelection;

/// Largest amount a quote accepts.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Most decimal places an amount may carry. Stored rates carry at most ten
/// as well, so amount-scaled values stay exact and non-zero.
pub const MAX_AMOUNT_SCALE: u32 = 10;

/// A stored rate. `rate` is relative to EUR = 1 on `date`, whichever provider
/// published it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRecord {
    /// Publication date.
    pub date: NaiveDate,
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// EUR-relative rate.
    pub rate: Decimal,
    /// Publishing provider.
    pub provider_code: String,
}

/// The dates a quote reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateScope {
    /// One day. The store falls back to the latest date on or before it.
    On(NaiveDate),
    /// Inclusive range.
    Between {
        /// First day.
        start: NaiveDate,
        /// Last day.
        end: NaiveDate,
    },
}

/// Parameters pushed down to the [`RateRepository`](super::RateRepository).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateQuery {
    /// Dates to read.
    pub scope: DateScope,
    /// Only rows from this provider.
    pub provider: Option<String>,
    /// Only rows for these currencies.
    pub currencies: Option<BTreeSet<String>>,
}

/// What a caller asks a quote for, apart from its dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Amount of the base currency being converted.
    pub amount: Decimal,
    /// Currency rates are expressed against.
    pub base: String,
    /// Target currencies; `None` means all.
    pub symbols: Option<BTreeSet<String>>,
    /// Provider resolution mode.
    pub source: SourceSelection,
}

impl Default for QuoteRequest {
    fn default() -> Self {
        Self {
            amount: Decimal::ONE,
            base: DEFAULT_BASE.to_string(),
            symbols: None,
            source: SourceSelection::Unset,
        }
    }
}

impl QuoteRequest {
    /// Sets the amount.
    #[must_use]
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the base currency.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Restricts the quote to the given target currencies.
    #[must_use]
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = Some(symbols.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the provider resolution mode.
    #[must_use]
    pub fn with_source(mut self, source: SourceSelection) -> Self {
        self.source = source;
        self
    }

    /// Returns true if the rates must be divided through by the base currency.
    #[must_use]
    pub fn must_rebase(&self) -> bool {
        self.base != DEFAULT_BASE
    }

    /// Currencies to fetch: the requested symbols plus the base, which is
    /// needed as the rebasing divisor.
    #[must_use]
    pub fn currencies_to_fetch(&self) -> Option<BTreeSet<String>> {
        self.symbols.as_ref().map(|symbols| {
            let mut currencies = symbols.clone();
            currencies.insert(self.base.clone());
            currencies
        })
    }

    /// Returns true if `code` is part of the requested symbols, or no symbols were requested.
    #[must_use]
    pub fn wants(&self, code: &str) -> bool {
        self.symbols.as_ref().is_none_or(|symbols| symbols.contains(code))
    }
}

/// Quoted rates by date, then by currency code. Both levels iterate in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuoteResult(BTreeMap<NaiveDate, BTreeMap<String, Decimal>>);

impl QuoteResult {
    /// Returns true if no date survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First date and its rates.
    #[must_use]
    pub fn first(&self) -> Option<(&NaiveDate, &BTreeMap<String, Decimal>)> {
        self.0.iter().next()
    }

    /// Last date and its rates.
    #[must_use]
    pub fn last(&self) -> Option<(&NaiveDate, &BTreeMap<String, Decimal>)> {
        self.0.iter().next_back()
    }

    /// Rates on `date`.
    #[must_use]
    pub fn get(&self, date: &NaiveDate) -> Option<&BTreeMap<String, Decimal>> {
        self.0.get(date)
    }

    /// Iterates dates in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &BTreeMap<String, Decimal>)> {
        self.0.iter()
    }
}

impl From<BTreeMap<NaiveDate, BTreeMap<String, Decimal>>> for QuoteResult {
    fn from(rates: BTreeMap<NaiveDate, BTreeMap<String, Decimal>>) -> Self {
        Self(rates)
    }
}
