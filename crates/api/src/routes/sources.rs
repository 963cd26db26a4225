//! Provider catalog route.

use axum::{
    Router,
    extract::State,
    http::HeaderMap,
    response::Response,
    routing::get,
};
use fxrates_core::provider::{Provider, ProviderRegistry};
use fxrates_core::quote::RateRepository;
use fxrates_shared::AppError;
use serde::Serialize;

use crate::{
    AppState, ApiError,
    cache::{cached_json, digest_key},
};

/// Creates the source routes.
pub fn routes<R, P>() -> Router<AppState<R, P>>
where
    R: RateRepository + 'static,
    P: ProviderRegistry + 'static,
{
    Router::new().route("/sources", get(list_sources::<R, P>))
}

/// Response for the provider catalog.
#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    /// Providers ordered by code.
    pub sources: Vec<Provider>,
}

/// GET `/sources` - List every provider.
///
/// The entity tag is a digest of the serialized list, so it changes exactly
/// when the catalog does.
async fn list_sources<R, P>(
    State(state): State<AppState<R, P>>,
    headers: HeaderMap,
) -> Result<Response, ApiError>
where
    R: RateRepository + 'static,
    P: ProviderRegistry + 'static,
{
    let sources = state.providers.all().await?;
    let serialized =
        serde_json::to_vec(&sources).map_err(|e| AppError::Internal(e.to_string()))?;
    let key = digest_key(&serialized);

    Ok(cached_json(
        &headers,
        &state.cache,
        Some(&key),
        &SourcesResponse { sources },
    ))
}
