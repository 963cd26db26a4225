//! API route definitions.

use axum::Router;
use fxrates_core::provider::ProviderRegistry;
use fxrates_core::quote::RateRepository;

use crate::AppState;

pub mod currencies;
pub mod health;
pub mod rates;
pub mod sources;

#[cfg(test)]
mod fixtures;

/// Creates the `/v2` routes.
pub fn v2_routes<R, P>() -> Router<AppState<R, P>>
where
    R: RateRepository + 'static,
    P: ProviderRegistry + 'static,
{
    Router::new()
        .merge(sources::routes())
        .merge(currencies::routes())
        .merge(rates::routes())
}
