//! Quote error types.

use fxrates_shared::AppError;
use thiserror::Error;

/// Errors raised while resolving a source or fetching rates.
///
/// Rebase arithmetic never fails; an empty result is reported through
/// `not_found` rather than as an error.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// An explicitly requested provider does not exist.
    #[error("Source {0} not found")]
    ProviderNotFound(String),

    /// No provider publishes rates natively against the requested base.
    #[error("No source found for currency {0}")]
    NoProviderForCurrency(String),

    /// The provider matching the requested base has never recorded a rate.
    #[error("No data available for {currency} from {provider} source")]
    NoDataForProvider {
        /// Provider code.
        provider: String,
        /// Requested base currency.
        currency: String,
    },

    /// Amount is not a positive number within the supported range.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The storage collaborator failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl QuoteError {
    /// Returns true if the error came from source resolution.
    #[must_use]
    pub const fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Self::ProviderNotFound(_) | Self::NoProviderForCurrency(_) | Self::NoDataForProvider { .. }
        )
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::Storage(msg) => Self::Database(msg),
            other => Self::BadRequest(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_messages() {
        assert_eq!(
            QuoteError::ProviderNotFound("XYZ".into()).to_string(),
            "Source XYZ not found"
        );
        assert_eq!(
            QuoteError::NoProviderForCurrency("USD".into()).to_string(),
            "No source found for currency USD"
        );
        assert_eq!(
            QuoteError::NoDataForProvider {
                provider: "BOC".into(),
                currency: "CAD".into(),
            }
            .to_string(),
            "No data available for CAD from BOC source"
        );
    }

    #[test]
    fn test_is_resolution_failure() {
        assert!(QuoteError::ProviderNotFound("X".into()).is_resolution_failure());
        assert!(QuoteError::NoProviderForCurrency("USD".into()).is_resolution_failure());
        assert!(!QuoteError::InvalidAmount("0".into()).is_resolution_failure());
        assert!(!QuoteError::Storage("down".into()).is_resolution_failure());
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = QuoteError::ProviderNotFound("XYZ".into()).into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.to_string(), "Source XYZ not found");

        let app: AppError = QuoteError::Storage("connection reset".into()).into();
        assert_eq!(app.status_code(), 500);
    }
}
