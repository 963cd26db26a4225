//! Currency and provider code validation.
//!
//! Currency codes are ISO 4217 style three-letter codes. Provider codes are
//! short uppercase identifiers such as `ECB` or `BOC`.

/// Base currency every stored rate is expressed against.
pub const DEFAULT_BASE: &str = "EUR";

/// Returns true if `code` is exactly three uppercase ASCII letters.
#[must_use]
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Returns true if `code` matches `[A-Z]{2,10}`.
#[must_use]
pub fn is_provider_code(code: &str) -> bool {
    (2..=10).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_uppercase())
}

/// Trims and uppercases user input, returning `None` unless the result is a
/// valid currency code.
#[must_use]
pub fn normalize_currency_code(input: &str) -> Option<String> {
    let code = input.trim().to_ascii_uppercase();
    is_currency_code(&code).then_some(code)
}
