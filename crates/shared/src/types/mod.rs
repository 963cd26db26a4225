//! Common types used across the application.

pub mod codes;
pub mod names;

pub use codes::{DEFAULT_BASE, is_currency_code, is_provider_code, normalize_currency_code};
pub use names::currency_name;
