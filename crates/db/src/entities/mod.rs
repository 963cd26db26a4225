//! `SeaORM` entity definitions.

pub mod prelude;

pub mod providers;
pub mod rates;
