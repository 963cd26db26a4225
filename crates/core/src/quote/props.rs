//! Property-based tests for rate computation.
//!
//! - Rates against EUR are the stored rates scaled by the amount
//! - Rebased rates divide through by the base currency
//! - Dates without a base rate never appear
//! - Amount scaling is linear

use std::collections::BTreeSet;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::compute_rates;
use super::rounding::round_rate;
use super::types::{QuoteRequest, RateRecord};

const CURRENCIES: [&str; 6] = ["USD", "GBP", "JPY", "CHF", "CAD", "AUD"];

/// Strategy to generate positive EUR-relative rates (0.0001 to 1000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate one day of rates for a subset of currencies.
fn day_of_rates() -> impl Strategy<Value = Vec<(&'static str, Decimal)>> {
    prop::collection::vec(positive_rate(), CURRENCIES.len()).prop_flat_map(|rates| {
        prop::sample::subsequence(
            CURRENCIES.iter().copied().zip(rates).collect::<Vec<_>>(),
            1..=CURRENCIES.len(),
        )
    })
}

fn records_for(days: &[Vec<(&'static str, Decimal)>]) -> Vec<RateRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    days.iter()
        .enumerate()
        .flat_map(|(offset, rates)| {
            let date = start + chrono::Days::new(offset as u64);
            rates.iter().map(move |(code, rate)| RateRecord {
                date,
                currency_code: (*code).to_string(),
                rate: *rate,
                provider_code: "ECB".to_string(),
            })
        })
        .collect()
}

fn raw_rate(records: &[RateRecord], date: NaiveDate, code: &str) -> Option<Decimal> {
    records
        .iter()
        .find(|r| r.date == date && r.currency_code == code)
        .map(|r| r.rate)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Against EUR every value is round(amount * stored rate).
    #[test]
    fn prop_eur_base_is_scaled_stored_rate(
        days in prop::collection::vec(day_of_rates(), 1..5),
        amount in positive_amount(),
    ) {
        let records = records_for(&days);
        let request = QuoteRequest::default().with_amount(amount);
        let result = compute_rates(&records, &request);

        prop_assert_eq!(result.len(), days.len());
        for (date, rates) in result.iter() {
            for (code, value) in rates {
                let raw = raw_rate(&records, *date, code).unwrap();
                prop_assert_eq!(*value, round_rate(amount * raw));
            }
        }
    }

    /// Against another base every value is amount * v / divisor on the
    /// amount-scaled values, and EUR enters the division as exactly `amount`.
    #[test]
    fn prop_rebase_divides_by_base(
        days in prop::collection::vec(day_of_rates(), 1..5),
        amount in positive_amount(),
        base_index in 0..CURRENCIES.len(),
    ) {
        let base = CURRENCIES[base_index];
        let records = records_for(&days);
        let request = QuoteRequest::default().with_amount(amount).with_base(base);
        let result = compute_rates(&records, &request);

        for (date, rates) in result.iter() {
            let divisor = round_rate(amount * raw_rate(&records, *date, base).unwrap());
            prop_assert!(!rates.contains_key(base));
            for (code, value) in rates {
                let scaled = if code == "EUR" {
                    amount
                } else {
                    round_rate(amount * raw_rate(&records, *date, code).unwrap())
                };
                prop_assert_eq!(*value, round_rate(scaled / divisor * amount));
            }
            prop_assert!(rates.contains_key("EUR"));
        }
    }

    /// A date survives a rebase exactly when it has a rate for the base.
    #[test]
    fn prop_dates_without_base_are_dropped(
        days in prop::collection::vec(day_of_rates(), 1..8),
        base_index in 0..CURRENCIES.len(),
    ) {
        let base = CURRENCIES[base_index];
        let records = records_for(&days);
        let request = QuoteRequest::default().with_base(base);
        let result = compute_rates(&records, &request);

        let expected: BTreeSet<NaiveDate> = records
            .iter()
            .filter(|r| r.currency_code == base)
            .map(|r| r.date)
            .collect();
        let actual: BTreeSet<NaiveDate> = result.iter().map(|(date, _)| *date).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Whole-number amounts scale four-decimal rates exactly.
    #[test]
    fn prop_amount_scaling_is_linear(
        days in prop::collection::vec(day_of_rates(), 1..3),
        factor in 1i64..1000,
    ) {
        let records = records_for(&days);
        let factor = Decimal::from(factor);
        let unit = compute_rates(&records, &QuoteRequest::default());
        let scaled = compute_rates(&records, &QuoteRequest::default().with_amount(factor));

        for ((_, unit_rates), (_, scaled_rates)) in unit.iter().zip(scaled.iter()) {
            for (code, value) in unit_rates {
                prop_assert_eq!(scaled_rates[code], *value * factor);
            }
        }
    }

    /// Rebased values scale with the amount up to rounding.
    #[test]
    fn prop_rebased_scaling_within_rounding(
        days in prop::collection::vec(day_of_rates(), 1..3),
        factor in 2i64..100,
    ) {
        let records = records_for(&days);
        let factor = Decimal::from(factor);
        let unit = compute_rates(&records, &QuoteRequest::default().with_base("USD"));
        let scaled = compute_rates(
            &records,
            &QuoteRequest::default().with_base("USD").with_amount(factor),
        );

        for ((_, unit_rates), (_, scaled_rates)) in unit.iter().zip(scaled.iter()) {
            for (code, value) in unit_rates {
                let expected = *value * factor;
                let tolerance = Decimal::new(1, 4) * factor * (Decimal::ONE + expected.abs());
                prop_assert!(
                    (scaled_rates[code] - expected).abs() <= tolerance,
                    "{} scaled to {} but expected about {}", code, scaled_rates[code], expected
                );
            }
        }
    }
}
