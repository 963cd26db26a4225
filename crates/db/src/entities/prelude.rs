//! Entity re-exports.

pub use super::providers::Entity as Providers;
pub use super::rates::Entity as Rates;
