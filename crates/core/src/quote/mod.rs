//! Rebasing of EUR-relative rates into end-of-day and interval quotes.

pub mod end_of_day;
pub mod engine;
pub mod interval;
pub mod repository;
pub mod rounding;
pub mod types;

#[cfg(test)]
mod props;

pub use end_of_day::{EndOfDay, EndOfDayQuote, EndOfDayResponse};
pub use engine::{Quote, QuoteKind, QuoteState, QuoteSummary, compute_rates};
pub use interval::{Interval, IntervalQuote, IntervalResponse};
pub use repository::RateRepository;
pub use rounding::{RATE_DECIMAL_PLACES, RATE_SIGNIFICANT_DIGITS, round_rate};
pub use types::{
    DateScope, MAX_AMOUNT, MAX_AMOUNT_SCALE, QuoteRequest, QuoteResult, RateQuery, RateRecord,
};
