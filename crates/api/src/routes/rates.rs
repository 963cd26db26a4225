//! Quote routes.
//!
//! - `/latest` and `/current` quote today, falling back to the last published day
//! - `/YYYY-MM-DD` quotes one date with the same fallback
//! - `/YYYY-MM-DD..[YYYY-MM-DD]` quotes every published day in the range; the
//!   end defaults to today
//!
//! Every quote resolves its source: explicitly through `source`, otherwise
//! from the provider publishing natively against `from`.

use std::str::FromStr;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use fxrates_core::provider::{ProviderRegistry, SourceSelection};
use fxrates_core::quote::{
    EndOfDay, Interval, Quote, QuoteKind, QuoteRequest, RateRepository,
};
use fxrates_shared::types::normalize_currency_code;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::{AppState, ApiError, cache::cached_json};

/// Creates the quote routes.
pub fn routes<R, P>() -> Router<AppState<R, P>>
where
    R: RateRepository + 'static,
    P: ProviderRegistry + 'static,
{
    Router::new()
        .route("/latest", get(latest::<R, P>))
        .route("/current", get(latest::<R, P>))
        .route("/{period}", get(by_period::<R, P>))
}

/// Query parameters shared by every quote route.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteParams {
    /// Base currency, EUR when absent.
    pub from: Option<String>,
    /// Comma-separated target currencies, all when absent or empty.
    pub to: Option<String>,
    /// Amount of the base currency, 1 when absent.
    pub amount: Option<String>,
    /// Provider code; blank means resolve from the base currency.
    pub source: Option<String>,
}

impl QuoteParams {
    /// Validates the parameters into a quote request.
    ///
    /// # Errors
    ///
    /// Returns a bad request for a malformed amount or currency code.
    pub fn into_request(self) -> Result<QuoteRequest, ApiError> {
        let mut request = QuoteRequest::default()
            .with_source(SourceSelection::from_param(self.source.as_deref()));

        if let Some(amount) = non_blank(self.amount.as_deref()) {
            let amount = Decimal::from_str(amount)
                .map_err(|_| ApiError::bad_request(format!("Invalid amount: {amount}")))?;
            request = request.with_amount(amount);
        }

        if let Some(from) = non_blank(self.from.as_deref()) {
            let base = normalize_currency_code(from)
                .ok_or_else(|| ApiError::bad_request(format!("Invalid currency: {from}")))?;
            request = request.with_base(base);
        }

        if let Some(to) = non_blank(self.to.as_deref()) {
            let symbols = to
                .split(',')
                .filter(|code| !code.trim().is_empty())
                .map(|code| {
                    normalize_currency_code(code)
                        .ok_or_else(|| ApiError::bad_request(format!("Invalid currency: {code}")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            if !symbols.is_empty() {
                request = request.with_symbols(symbols);
            }
        }

        Ok(request)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// What a `/{period}` segment asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// One date.
    Day(NaiveDate),
    /// An inclusive range.
    Range(NaiveDate, NaiveDate),
}

impl Period {
    /// Parses `YYYY-MM-DD` or `YYYY-MM-DD..[YYYY-MM-DD]`, with an open end meaning `today`.
    ///
    /// Returns `None` for anything else, including a range that ends before it starts.
    pub fn parse(segment: &str, today: NaiveDate) -> Option<Self> {
        // chrono accepts unpadded fields, the route does not.
        let parse_date = |s: &str| {
            (s.len() == 10)
                .then(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                .flatten()
        };

        match segment.split_once("..") {
            Some((start, end)) => {
                let start = parse_date(start)?;
                let end = if end.is_empty() { today } else { parse_date(end)? };
                (start <= end).then_some(Self::Range(start, end))
            }
            None => parse_date(segment).map(Self::Day),
        }
    }
}

/// GET `/latest`, `/current` - Quote today.
async fn latest<R, P>(
    State(state): State<AppState<R, P>>,
    headers: HeaderMap,
    Query(params): Query<QuoteParams>,
) -> Result<Response, ApiError>
where
    R: RateRepository + 'static,
    P: ProviderRegistry + 'static,
{
    let request = params.into_request()?;
    quote(&state, &headers, EndOfDay::new(today()), request).await
}

/// GET `/{period}` - Quote a date or a date range.
async fn by_period<R, P>(
    State(state): State<AppState<R, P>>,
    Path(period): Path<String>,
    headers: HeaderMap,
    Query(params): Query<QuoteParams>,
) -> Result<Response, ApiError>
where
    R: RateRepository + 'static,
    P: ProviderRegistry + 'static,
{
    let period = Period::parse(&period, today()).ok_or_else(ApiError::not_found)?;
    let request = params.into_request()?;

    match period {
        Period::Day(date) => quote(&state, &headers, EndOfDay::new(date), request).await,
        Period::Range(start, end) => {
            quote(&state, &headers, Interval::new(start, end), request).await
        }
    }
}

/// Builds, performs, and renders a quote.
async fn quote<R, P, K>(
    state: &AppState<R, P>,
    headers: &HeaderMap,
    kind: K,
    request: QuoteRequest,
) -> Result<Response, ApiError>
where
    R: RateRepository + 'static,
    P: ProviderRegistry + 'static,
    K: QuoteKind,
{
    let mut quote = Quote::build(kind, request, state.providers.as_ref()).await?;
    debug!(
        base = %quote.request().base,
        source = ?quote.source(),
        "Resolved quote source"
    );

    quote.perform(state.rates.as_ref()).await?;
    if quote.not_found() {
        return Err(ApiError::not_found());
    }

    let key = quote.cache_key();
    Ok(cached_json(
        headers,
        &state.cache,
        key.as_deref(),
        &quote.formatted(),
    ))
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
