//! Rate rows backed by the `rates` table.
//!
//! Single-date fetches fall back to the most recent date on or before the
//! requested one that has rows for the provider filter. Weekends, holidays,
//! and future dates therefore resolve to the latest published day.

use chrono::NaiveDate;
use fxrates_core::QuoteError;
use fxrates_core::quote::{DateScope, RateQuery, RateRecord, RateRepository};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use tracing::debug;

use super::storage_error;
use crate::entities::rates;

/// Rate repository for the `rates` table.
#[derive(Debug, Clone)]
pub struct RateStore {
    db: DatabaseConnection,
}

impl RateStore {
    /// Creates a new rate store.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Most recent date with rows on or before `date`.
    async fn latest_date(
        &self,
        date: NaiveDate,
        provider: Option<&str>,
    ) -> Result<Option<NaiveDate>, QuoteError> {
        let row = latest_date_query(date, provider)
            .one(&self.db)
            .await
            .map_err(|e| storage_error("find latest rate date", &e))?;

        Ok(row.map(|row| row.date))
    }
}

fn by_provider(select: Select<rates::Entity>, provider: Option<&str>) -> Select<rates::Entity> {
    match provider {
        Some(code) => select.filter(rates::Column::ProviderCode.eq(code)),
        None => select,
    }
}

fn latest_date_query(date: NaiveDate, provider: Option<&str>) -> Select<rates::Entity> {
    by_provider(rates::Entity::find(), provider)
        .filter(rates::Column::Date.lte(date))
        .order_by_desc(rates::Column::Date)
}

/// Rows between `start` and `end` inclusive, honoring the query's filters.
///
/// Rows are ordered by provider within a date, so when no provider filter is
/// given the last provider wins a duplicated currency.
fn rows_query(query: &RateQuery, start: NaiveDate, end: NaiveDate) -> Select<rates::Entity> {
    let mut select = by_provider(rates::Entity::find(), query.provider.as_deref());
    select = if start == end {
        select.filter(rates::Column::Date.eq(start))
    } else {
        select.filter(rates::Column::Date.between(start, end))
    };
    if let Some(currencies) = &query.currencies {
        select = select.filter(rates::Column::CurrencyCode.is_in(currencies.iter().cloned()));
    }

    select
        .order_by_asc(rates::Column::Date)
        .order_by_asc(rates::Column::ProviderCode)
        .order_by_asc(rates::Column::CurrencyCode)
}

/// Every stored currency code once, in code order.
fn currency_codes_query() -> Select<rates::Entity> {
    rates::Entity::find()
        .select_only()
        .column(rates::Column::CurrencyCode)
        .distinct()
        .order_by_asc(rates::Column::CurrencyCode)
}

impl RateRepository for RateStore {
    async fn fetch(&self, query: &RateQuery) -> Result<Vec<RateRecord>, QuoteError> {
        let (start, end) = match query.scope {
            DateScope::On(date) => {
                match self.latest_date(date, query.provider.as_deref()).await? {
                    Some(latest) => (latest, latest),
                    None => {
                        debug!(%date, provider = ?query.provider, "No rates on or before date");
                        return Ok(Vec::new());
                    }
                }
            }
            DateScope::Between { start, end } => (start, end),
        };

        let rows = rows_query(query, start, end)
            .all(&self.db)
            .await
            .map_err(|e| storage_error("fetch rates", &e))?;

        debug!(
            %start,
            %end,
            provider = ?query.provider,
            currencies = ?query.currencies,
            rows = rows.len(),
            "Fetched rates"
        );

        Ok(rows.into_iter().map(RateRecord::from).collect())
    }

    async fn currency_codes(&self) -> Result<Vec<String>, QuoteError> {
        currency_codes_query()
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| storage_error("list currency codes", &e))
    }
}
