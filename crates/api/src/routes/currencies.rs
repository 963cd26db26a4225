//! Currency name route.

use std::collections::BTreeMap;

use axum::{
    Router,
    extract::State,
    http::HeaderMap,
    response::Response,
    routing::get,
};
use fxrates_core::provider::ProviderRegistry;
use fxrates_core::quote::RateRepository;
use fxrates_shared::types::{DEFAULT_BASE, currency_name};
use tracing::debug;

use crate::{
    AppState, ApiError,
    cache::{cached_json, digest_key},
};

/// Creates the currency routes.
pub fn routes<R, P>() -> Router<AppState<R, P>>
where
    R: RateRepository + 'static,
    P: ProviderRegistry + 'static,
{
    Router::new().route("/currencies", get(list_currencies::<R, P>))
}

/// Names for `codes` plus the EUR base, keyed by code.
///
/// Codes missing from the ISO 4217 table are named by their code.
fn currency_names(codes: Vec<String>) -> BTreeMap<String, String> {
    if codes.is_empty() {
        return BTreeMap::new();
    }

    codes
        .into_iter()
        .chain(std::iter::once(DEFAULT_BASE.to_string()))
        .map(|code| {
            let name = currency_name(&code).map_or_else(
                || {
                    debug!(%code, "No ISO 4217 name for stored currency");
                    code.clone()
                },
                str::to_string,
            );
            (code, name)
        })
        .collect()
}

/// GET `/currencies` - Name every quotable currency.
///
/// The entity tag is a digest of the listed codes.
async fn list_currencies<R, P>(
    State(state): State<AppState<R, P>>,
    headers: HeaderMap,
) -> Result<Response, ApiError>
where
    R: RateRepository + 'static,
    P: ProviderRegistry + 'static,
{
    let names = currency_names(state.rates.currency_codes().await?);
    let codes = names.keys().map(String::as_str).collect::<Vec<_>>().join(",");
    let key = digest_key(codes.as_bytes());

    Ok(cached_json(&headers, &state.cache, Some(&key), &names))
}


#[cfg(test)]
mod integration_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::{ETAG, IF_NONE_MATCH}},
    };
    use serde_json::json;
    use tower::ServiceExt;

    use crate::routes::fixtures::{app, body_json, failing_app};

    #[tokio::test]
    async fn test_list_currencies() {
        let response = app()
            .oneshot(Request::get("/v2/currencies").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(ETAG).is_some());
        assert_eq!(
            body_json(response).await,
            json!({
                "CAD": "Canadian Dollar",
                "EUR": "Euro",
                "GBP": "British Pound",
                "USD": "United States Dollar",
            })
        );
    }

    #[tokio::test]
    async fn test_list_currencies_not_modified() {
        let first = app()
            .oneshot(Request::get("/v2/currencies").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let etag = first.headers()[ETAG].clone();

        let second = app()
            .oneshot(
                Request::get("/v2/currencies")
                    .header(IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_list_currencies_storage_failure() {
        let response = failing_app()
            .oneshot(Request::get("/v2/currencies").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
