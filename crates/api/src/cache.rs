//! Conditional GET support.
//!
//! Every successful response is publicly cacheable for a fixed time. Responses
//! with a cache key also carry a strong entity tag, and a request presenting
//! a matching `If-None-Match` gets `304 Not Modified` without a body.

use axum::{
    Json,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_NONE_MATCH},
    },
    response::{IntoResponse, Response},
};
use fxrates_shared::config::CacheConfig;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// `Content-Type` of every JSON body, charset included.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// `Cache-Control` value for public responses.
pub fn cache_control(cache: &CacheConfig) -> HeaderValue {
    HeaderValue::from_str(&format!("public, max-age={}", cache.max_age_secs))
        .unwrap_or(HeaderValue::from_static("public"))
}

/// Strong entity tag for a cache key.
pub fn entity_tag(key: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("\"{key}\"")).ok()
}

/// SHA-256 hex digest, used as the key for bodies without a natural one.
pub fn digest_key(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Returns true if `If-None-Match` lists `etag` or `*`.
pub fn is_fresh(request: &HeaderMap, etag: &HeaderValue) -> bool {
    let Ok(etag) = etag.to_str() else {
        return false;
    };

    request
        .get_all(IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|candidate| {
            let candidate = candidate.trim();
            candidate.strip_prefix("W/").unwrap_or(candidate)
        })
        .any(|candidate| candidate == "*" || candidate == etag)
}

/// JSON response with caching headers, or `304` when the client copy is fresh.
pub fn cached_json<T: Serialize>(
    request: &HeaderMap,
    cache: &CacheConfig,
    key: Option<&str>,
    body: &T,
) -> Response {
    let etag = key.and_then(entity_tag);
    let fresh = etag.as_ref().is_some_and(|etag| is_fresh(request, etag));

    let mut response = if fresh {
        StatusCode::NOT_MODIFIED.into_response()
    } else {
        let mut response = (StatusCode::OK, Json(body)).into_response();
        if response.status().is_success() {
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }
        response
    };

    let headers = response.headers_mut();
    headers.insert(CACHE_CONTROL, cache_control(cache));
    if let Some(etag) = etag {
        headers.insert(ETAG, etag);
    }
    response
}
