//! Source resolution.
//!
//! Decides which provider's rows a quote reads. Cross-provider math is refused
//! unless the caller names a provider or asks for a base some provider
//! publishes natively.

use fxrates_shared::types::is_provider_code;

use super::registry::ProviderRegistry;
use super::types::SourceSelection;
use crate::error::QuoteError;

/// Resolves the provider for a requested base currency.
pub struct SourceResolver<'a, P: ProviderRegistry> {
    registry: &'a P,
}

impl<'a, P: ProviderRegistry> SourceResolver<'a, P> {
    /// Creates a resolver over a provider registry.
    #[must_use]
    pub const fn new(registry: &'a P) -> Self {
        Self { registry }
    }

    /// Resolves the provider code to query.
    ///
    /// An explicit provider only has to exist; it is not checked for data.
    /// Otherwise the provider natively anchored to `base_currency` is used,
    /// and it must have recorded at least one rate.
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotFound`, `NoProviderForCurrency` or
    /// `NoDataForProvider` when resolution fails, or `Storage` if a lookup fails.
    pub async fn resolve(
        &self,
        base_currency: &str,
        explicit_provider: Option<&str>,
    ) -> Result<String, QuoteError> {
        if let Some(code) = explicit_provider {
            if !is_provider_code(code) {
                return Err(QuoteError::ProviderNotFound(code.to_string()));
            }
            return match self.registry.find(code).await? {
                Some(provider) => Ok(provider.code),
                None => Err(QuoteError::ProviderNotFound(code.to_string())),
            };
        }

        let provider = self
            .registry
            .find_by_native_base(base_currency)
            .await?
            .ok_or_else(|| QuoteError::NoProviderForCurrency(base_currency.to_string()))?;

        if !self.registry.has_any_data(&provider.code).await? {
            return Err(QuoteError::NoDataForProvider {
                provider: provider.code,
                currency: base_currency.to_string(),
            });
        }

        Ok(provider.code)
    }

    /// Applies a [`SourceSelection`], returning `None` when resolution is not requested.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures from [`Self::resolve`].
    pub async fn select(
        &self,
        base_currency: &str,
        selection: &SourceSelection,
    ) -> Result<Option<String>, QuoteError> {
        match selection {
            SourceSelection::Unset => Ok(None),
            SourceSelection::Auto => self.resolve(base_currency, None).await.map(Some),
            SourceSelection::Explicit(code) => {
                self.resolve(base_currency, Some(code)).await.map(Some)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;
    use crate::testing::InMemoryStore;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> InMemoryStore {
        InMemoryStore::new()
            .with_provider(Provider::new("ECB", "European Central Bank", Some("EUR")))
            .with_provider(Provider::new("BOC", "Bank of Canada", Some("CAD")))
            .with_provider(Provider::new("TCMB", "Central Bank of Turkey", Some("TRY")))
            .with_provider(Provider::new("IMF", "International Monetary Fund", None))
            .with_rate(date(2024, 1, 2), "USD", dec!(1.0956), "ECB")
            .with_rate(date(2024, 1, 2), "CAD", dec!(1.4565), "BOC")
    }

    #[tokio::test]
    async fn test_explicit_provider_resolves_to_itself() {
        let store = store();
        let resolver = SourceResolver::new(&store);

        assert_eq!(resolver.resolve("EUR", Some("ECB")).await.unwrap(), "ECB");
        // no data and a foreign base do not matter on the explicit path
        assert_eq!(resolver.resolve("USD", Some("IMF")).await.unwrap(), "IMF");
        assert_eq!(resolver.resolve("CAD", Some("TCMB")).await.unwrap(), "TCMB");
    }

    #[tokio::test]
    async fn test_explicit_unknown_provider_fails() {
        let store = store();
        let resolver = SourceResolver::new(&store);

        let err = resolver.resolve("EUR", Some("XYZ")).await.unwrap_err();
        assert!(matches!(err, QuoteError::ProviderNotFound(ref code) if code == "XYZ"));
        assert_eq!(err.to_string(), "Source XYZ not found");
    }

    #[tokio::test]
    async fn test_malformed_provider_code_skips_lookup() {
        // a failing store proves the registry is never asked
        let store = store().failing();
        let resolver = SourceResolver::new(&store);

        let err = resolver.resolve("EUR", Some("E1")).await.unwrap_err();
        assert_eq!(err.to_string(), "Source E1 not found");
    }

    #[tokio::test]
    async fn test_auto_resolves_native_base() {
        let store = store();
        let resolver = SourceResolver::new(&store);

        assert_eq!(resolver.resolve("EUR", None).await.unwrap(), "ECB");
        assert_eq!(resolver.resolve("CAD", None).await.unwrap(), "BOC");
    }

    #[tokio::test]
    async fn test_auto_without_matching_provider_fails() {
        let store = store();
        let resolver = SourceResolver::new(&store);

        let err = resolver.resolve("USD", None).await.unwrap_err();
        assert!(matches!(err, QuoteError::NoProviderForCurrency(ref c) if c == "USD"));
        assert_eq!(err.to_string(), "No source found for currency USD");
    }

    #[tokio::test]
    async fn test_auto_with_empty_provider_fails() {
        let store = store();
        let resolver = SourceResolver::new(&store);

        let err = resolver.resolve("TRY", None).await.unwrap_err();
        assert!(matches!(
            err,
            QuoteError::NoDataForProvider { ref provider, ref currency }
                if provider == "TCMB" && currency == "TRY"
        ));
        assert_eq!(err.to_string(), "No data available for TRY from TCMB source");
    }

    #[tokio::test]
    async fn test_select() {
        let store = store();
        let resolver = SourceResolver::new(&store);

        assert_eq!(
            resolver.select("USD", &SourceSelection::Unset).await.unwrap(),
            None
        );
        assert_eq!(
            resolver.select("CAD", &SourceSelection::Auto).await.unwrap(),
            Some("BOC".to_string())
        );
        assert_eq!(
            resolver
                .select("USD", &SourceSelection::Explicit("ECB".into()))
                .await
                .unwrap(),
            Some("ECB".to_string())
        );
        assert!(resolver.select("USD", &SourceSelection::Auto).await.is_err());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let store = store().failing();
        let resolver = SourceResolver::new(&store);

        let err = resolver.resolve("EUR", None).await.unwrap_err();
        assert!(matches!(err, QuoteError::Storage(_)));
    }
}
