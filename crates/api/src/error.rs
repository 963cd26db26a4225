//! Error responses.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use fxrates_core::QuoteError;
use fxrates_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

use crate::cache::JSON_CONTENT_TYPE;

/// An [`AppError`] rendered as an HTTP response.
///
/// Client errors carry their message verbatim as `{"error": ...}`; not found is
/// `{"message": "not found"}`; server errors are logged and reported generically.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// Not found response.
    pub fn not_found() -> Self {
        Self(AppError::NotFound("not found".to_string()))
    }

    /// Bad request with a message shown to the client.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(AppError::BadRequest(message.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match &self.0 {
            AppError::NotFound(_) => json!({ "message": "not found" }),
            AppError::BadRequest(message) => {
                warn!(error = %message, "Rejected request");
                json!({ "error": message })
            }
            AppError::Validation(_) => {
                warn!(error = %self.0, "Rejected request");
                json!({ "error": self.0.to_string() })
            }
            AppError::Database(_) | AppError::Internal(_) => {
                error!(error = %self.0, code = self.0.error_code(), "Request failed");
                json!({ "error": "An error occurred" })
            }
        };

        let mut response = (status, Json(body)).into_response();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_resolution_failure_is_bad_request_verbatim() {
        let response =
            ApiError::from(QuoteError::NoProviderForCurrency("USD".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "No source found for currency USD" })
        );
    }

    #[tokio::test]
    async fn test_storage_failure_is_hidden() {
        let response =
            ApiError::from(QuoteError::Storage("connection reset".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(!body.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = ApiError::not_found().into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "message": "not found" }));
    }

    #[test]
    fn test_error_bodies_declare_utf8() {
        for err in [
            ApiError::not_found(),
            ApiError::bad_request("bad"),
            ApiError(AppError::Internal("boom".to_string())),
        ] {
            let response = err.into_response();
            assert_eq!(
                response.headers()[CONTENT_TYPE],
                "application/json; charset=utf-8"
            );
        }
    }
}
