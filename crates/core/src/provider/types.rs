//! Provider types.

use serde::{Deserialize, Serialize};

/// An upstream publisher of exchange rates.
///
/// Stored rates are always EUR-relative; `base_currency` only records which
/// currency the provider publishes against, for source resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Unique code matching `[A-Z]{2,10}`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Native base currency, if the provider declares one.
    pub base_currency: Option<String>,
}

impl Provider {
    /// Creates a new provider.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        base_currency: Option<&str>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            base_currency: base_currency.map(str::to_string),
        }
    }
}

/// How a quote picks the provider whose rows it reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceSelection {
    /// No resolution; rows from every provider are read.
    #[default]
    Unset,
    /// Resolve the provider natively anchored to the requested base.
    Auto,
    /// Use this provider code, provided it exists.
    Explicit(String),
}

impl SourceSelection {
    /// Builds a selection from an optional request parameter.
    ///
    /// A present but blank value means automatic resolution.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            Some(code) if !code.is_empty() => Self::Explicit(code.to_ascii_uppercase()),
            _ => Self::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_param() {
        assert_eq!(SourceSelection::from_param(None), SourceSelection::Auto);
        assert_eq!(SourceSelection::from_param(Some("")), SourceSelection::Auto);
        assert_eq!(SourceSelection::from_param(Some("  ")), SourceSelection::Auto);
        assert_eq!(
            SourceSelection::from_param(Some("ecb")),
            SourceSelection::Explicit("ECB".to_string())
        );
    }

    #[test]
    fn test_provider_serializes_catalog_shape() {
        let provider = Provider::new("BOC", "Bank of Canada", Some("CAD"));
        let json = serde_json::to_value(&provider).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "BOC",
                "name": "Bank of Canada",
                "base_currency": "CAD"
            })
        );
    }
}
