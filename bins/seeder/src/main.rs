//! Database seeder for fxrates development and testing.
//!
//! Seeds the provider catalog, 30 weekdays of EUR-relative rates per
//! provider, and the historical days the API examples refer to.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use fxrates_db::entities::{providers, rates};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::str::FromStr;

/// Providers as (code, name, native base currency).
const PROVIDERS: [(&str, &str, Option<&str>); 3] = [
    ("ECB", "European Central Bank", Some("EUR")),
    ("BOC", "Bank of Canada", Some("CAD")),
    ("TCMB", "Central Bank of the Republic of Turkey", Some("TRY")),
];

/// Approximate EUR-relative rates per provider.
const RECENT_RATES: [(&str, &[(&str, &str)]); 3] = [
    (
        "ECB",
        &[
            ("USD", "1.0950"),
            ("GBP", "0.8600"),
            ("JPY", "157.20"),
            ("CAD", "1.4650"),
            ("CHF", "0.9400"),
            ("TRY", "33.10"),
            ("AUD", "1.6300"),
            ("CNY", "7.8100"),
        ],
    ),
    (
        "BOC",
        &[("CAD", "1.4640"), ("USD", "1.0945"), ("GBP", "0.8602"), ("JPY", "157.05")],
    ),
    (
        "TCMB",
        &[("TRY", "33.15"), ("USD", "1.0948"), ("GBP", "0.8598")],
    ),
];

/// Historical ECB reference days.
const HISTORICAL_RATES: [(&str, &str, &str); 8] = [
    ("2010-01-04", "USD", "1.4389"),
    ("2010-01-04", "GBP", "0.8890"),
    ("2010-01-05", "USD", "1.4442"),
    ("2010-01-05", "GBP", "0.8929"),
    ("2010-01-29", "USD", "1.3966"),
    ("2010-01-29", "GBP", "0.8674"),
    ("2012-11-20", "USD", "1.2795"),
    ("2012-11-20", "GBP", "0.8045"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")?;

    println!("Connecting to database...");
    let db = fxrates_db::connect(&database_url).await?;

    println!("Seeding providers...");
    seed_providers(&db).await;

    println!("Seeding recent rates...");
    seed_recent_rates(&db).await?;

    println!("Seeding historical rates...");
    seed_historical_rates(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Inserts a rate, returning whether a new row was written.
async fn insert_rate(
    db: &DatabaseConnection,
    date: NaiveDate,
    currency: &str,
    rate: Decimal,
    provider: &str,
) -> bool {
    let model = rates::ActiveModel {
        date: Set(date),
        currency_code: Set(currency.to_string()),
        provider_code: Set(provider.to_string()),
        rate: Set(rate),
    };

    match model.insert(db).await {
        Ok(_) => true,
        Err(e) => {
            // Ignore duplicate key errors (rate already exists)
            if !e.to_string().contains("duplicate key") {
                eprintln!("Failed to insert {provider} {currency} rate for {date}: {e}");
            }
            false
        }
    }
}

/// Seeds the provider catalog. The ECB row already exists after migrating.
async fn seed_providers(db: &DatabaseConnection) {
    for (code, name, base_currency) in PROVIDERS {
        if providers::Entity::find_by_id(code.to_string())
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Provider {code} already exists, skipping...");
            continue;
        }

        let provider = providers::ActiveModel {
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            base_currency: Set(base_currency.map(str::to_string)),
        };

        if let Err(e) = provider.insert(db).await {
            eprintln!("Failed to insert provider {code}: {e}");
        } else {
            println!("  Created provider: {name}");
        }
    }
}

/// Seeds rates for the last 30 weekdays, skipping weekends like the
/// publishing banks do.
async fn seed_recent_rates(db: &DatabaseConnection) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let step = Decimal::from_str("0.001")?;
    let mut inserted = 0;

    let weekdays = (0..)
        .map(|offset| (offset, today - Duration::days(offset)))
        .filter(|(_, date)| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .take(30);

    for (offset, date) in weekdays {
        // Small daily variation to simulate market movement
        let variation = if offset % 2 == 0 {
            Decimal::ONE + Decimal::from(offset % 7) * step
        } else {
            Decimal::ONE - Decimal::from(offset % 7) * step
        };

        for (provider, table) in RECENT_RATES {
            for (currency, base_rate) in table {
                let rate = (Decimal::from_str(base_rate)? * variation).round_dp(6);
                if insert_rate(db, date, currency, rate, provider).await {
                    inserted += 1;
                }
            }
        }
    }

    println!("  Inserted {inserted} recent rates");
    Ok(())
}

/// Seeds the fixed historical ECB days.
async fn seed_historical_rates(db: &DatabaseConnection) -> anyhow::Result<()> {
    let mut inserted = 0;

    for (date, currency, rate) in HISTORICAL_RATES {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
        let rate = Decimal::from_str(rate)?;
        if insert_rate(db, date, currency, rate, "ECB").await {
            inserted += 1;
        }
    }

    println!("  Inserted {inserted} historical rates");
    Ok(())
}
