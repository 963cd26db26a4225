//! Shared configuration, errors, and validation helpers for fxrates.
//!
//! This crate provides common pieces used across all other crates:
//! - Currency and provider code validation
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
