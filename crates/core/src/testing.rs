//! In-memory rate store for tests.
//!
//! Implements both [`RateRepository`] and [`ProviderRegistry`] with the same
//! fetch semantics as the database store: single-date fetches fall back to
//! the latest date on or before the requested one that has rows for the
//! provider filter.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::QuoteError;
use crate::provider::{Provider, ProviderRegistry};
use crate::quote::{DateScope, RateQuery, RateRecord, RateRepository};

/// In-memory provider catalog and rate rows.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    providers: Vec<Provider>,
    records: Vec<RateRecord>,
    failing: bool,
    fetches: AtomicUsize,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a provider.
    #[must_use]
    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Adds a EUR-relative rate.
    #[must_use]
    pub fn with_rate(mut self, date: NaiveDate, currency: &str, rate: Decimal, provider: &str) -> Self {
        self.records.push(RateRecord {
            date,
            currency_code: currency.to_string(),
            rate,
            provider_code: provider.to_string(),
        });
        self
    }

    /// Makes every lookup fail with a storage error.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Number of rate fetches served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), QuoteError> {
        if self.failing {
            Err(QuoteError::Storage("in-memory store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl RateRepository for InMemoryStore {
    async fn fetch(&self, query: &RateQuery) -> Result<Vec<RateRecord>, QuoteError> {
        self.check()?;
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let from_provider = |record: &&RateRecord| {
            query
                .provider
                .as_ref()
                .is_none_or(|code| &record.provider_code == code)
        };

        let (start, end) = match query.scope {
            DateScope::On(date) => {
                let latest = self
                    .records
                    .iter()
                    .filter(from_provider)
                    .filter(|record| record.date <= date)
                    .map(|record| record.date)
                    .max();
                match latest {
                    Some(latest) => (latest, latest),
                    None => return Ok(Vec::new()),
                }
            }
            DateScope::Between { start, end } => (start, end),
        };

        let mut rows: Vec<RateRecord> = self
            .records
            .iter()
            .filter(from_provider)
            .filter(|record| record.date >= start && record.date <= end)
            .filter(|record| {
                query
                    .currencies
                    .as_ref()
                    .is_none_or(|codes| codes.contains(&record.currency_code))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (a.date, &a.provider_code, &a.currency_code).cmp(&(b.date, &b.provider_code, &b.currency_code))
        });
        Ok(rows)
    }

    async fn currency_codes(&self) -> Result<Vec<String>, QuoteError> {
        self.check()?;
        let codes: BTreeSet<&str> = self
            .records
            .iter()
            .map(|record| record.currency_code.as_str())
            .collect();
        Ok(codes.into_iter().map(str::to_string).collect())
    }
}

impl ProviderRegistry for InMemoryStore {
    async fn all(&self) -> Result<Vec<Provider>, QuoteError> {
        self.check()?;
        let mut providers = self.providers.clone();
        providers.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(providers)
    }

    async fn find(&self, code: &str) -> Result<Option<Provider>, QuoteError> {
        self.check()?;
        Ok(self.providers.iter().find(|p| p.code == code).cloned())
    }

    async fn find_by_native_base(&self, currency: &str) -> Result<Option<Provider>, QuoteError> {
        self.check()?;
        Ok(self
            .providers
            .iter()
            .filter(|p| p.base_currency.as_deref() == Some(currency))
            .min_by(|a, b| a.code.cmp(&b.code))
            .cloned())
    }

    async fn has_any_data(&self, code: &str) -> Result<bool, QuoteError> {
        self.check()?;
        Ok(self.records.iter().any(|r| r.provider_code == code))
    }
}
