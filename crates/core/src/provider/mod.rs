//! Rate provider catalog and source resolution.

pub mod registry;
pub mod resolver;
pub mod types;

pub use registry::ProviderRegistry;
pub use resolver::SourceResolver;
pub use types::{Provider, SourceSelection};
