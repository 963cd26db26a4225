//! Core quote logic for fxrates.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached only through the [`provider::ProviderRegistry`] and
//! [`quote::RateRepository`] traits, which the db crate implements.
//!
//! # Modules
//!
//! - `provider` - Rate provider catalog and source resolution
//! - `quote` - Rebasing of EUR-relative rates into end-of-day and interval quotes

pub mod error;
pub mod provider;
pub mod quote;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::QuoteError;
