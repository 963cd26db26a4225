//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The `/v2` quote, source, and currency routes
//! - Health check
//! - Conditional GET support (`ETag`, `Cache-Control`, `If-None-Match`)
//!
//! Handlers are generic over the rate and provider stores so the router can
//! run against Postgres or the in-memory store used in tests.

pub mod cache;
pub mod error;
pub mod routes;

use axum::Router;
use fxrates_core::provider::ProviderRegistry;
use fxrates_core::quote::RateRepository;
use fxrates_db::{ProviderStore, RateStore};
use fxrates_shared::config::CacheConfig;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
pub struct AppState<R, P> {
    /// Rate rows.
    pub rates: Arc<R>,
    /// Provider catalog.
    pub providers: Arc<P>,
    /// HTTP caching settings.
    pub cache: CacheConfig,
}

impl<R, P> Clone for AppState<R, P> {
    fn clone(&self) -> Self {
        Self {
            rates: Arc::clone(&self.rates),
            providers: Arc::clone(&self.providers),
            cache: self.cache.clone(),
        }
    }
}

impl<R, P> AppState<R, P> {
    /// Creates a new application state.
    pub const fn new(rates: Arc<R>, providers: Arc<P>, cache: CacheConfig) -> Self {
        Self {
            rates,
            providers,
            cache,
        }
    }
}

/// State backed by Postgres.
pub type PgAppState = AppState<RateStore, ProviderStore>;

impl PgAppState {
    /// Creates the Postgres-backed stores over a shared connection pool.
    pub fn from_connection(db: &DatabaseConnection, cache: CacheConfig) -> Self {
        Self::new(
            Arc::new(RateStore::new(db.clone())),
            Arc::new(ProviderStore::new(db.clone())),
            cache,
        )
    }
}

/// Creates the main application router.
pub fn create_router<R, P>(state: AppState<R, P>) -> Router
where
    R: RateRepository + 'static,
    P: ProviderRegistry + 'static,
{
    Router::new()
        .merge(routes::health::routes())
        .nest("/v2", routes::v2_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
