//! Router fixtures backed by the in-memory store.

use std::sync::Arc;

use axum::{Router, body::Body, response::Response};
use chrono::NaiveDate;
use fxrates_core::provider::Provider;
use fxrates_core::testing::InMemoryStore;
use fxrates_shared::config::CacheConfig;
use http_body_util::BodyExt;
use rust_decimal_macros::dec;

use crate::{AppState, create_router};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// ECB rows for 2012-11-19/20 and January 2010, BOC rows for 2012-11-20.
pub fn store() -> InMemoryStore {
    InMemoryStore::new()
        .with_provider(Provider::new("ECB", "European Central Bank", Some("EUR")))
        .with_provider(Provider::new("BOC", "Bank of Canada", Some("CAD")))
        .with_rate(date(2010, 1, 4), "USD", dec!(1.4389), "ECB")
        .with_rate(date(2010, 1, 4), "GBP", dec!(0.8890), "ECB")
        .with_rate(date(2010, 1, 5), "USD", dec!(1.4442), "ECB")
        .with_rate(date(2010, 1, 5), "GBP", dec!(0.8929), "ECB")
        .with_rate(date(2010, 1, 29), "USD", dec!(1.3966), "ECB")
        .with_rate(date(2010, 1, 29), "GBP", dec!(0.8674), "ECB")
        .with_rate(date(2012, 11, 19), "USD", dec!(1.2780), "ECB")
        .with_rate(date(2012, 11, 20), "USD", dec!(1.2795), "ECB")
        .with_rate(date(2012, 11, 20), "GBP", dec!(0.8045), "ECB")
        .with_rate(date(2012, 11, 20), "CAD", dec!(1.2767), "ECB")
        .with_rate(date(2012, 11, 20), "CAD", dec!(1.28), "BOC")
        .with_rate(date(2012, 11, 20), "USD", dec!(1.28), "BOC")
}

fn router(store: InMemoryStore) -> Router {
    let store = Arc::new(store);
    create_router(AppState::new(
        Arc::clone(&store),
        store,
        CacheConfig::default(),
    ))
}

/// Router over [`store`].
pub fn app() -> Router {
    router(store())
}

/// Router whose every lookup fails.
pub fn failing_app() -> Router {
    router(store().failing())
}

/// Collects a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
