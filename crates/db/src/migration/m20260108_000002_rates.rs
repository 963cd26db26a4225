//! Rates migration.
//!
//! One EUR-relative rate per date, currency, and provider.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(RATES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS rates CASCADE;")
            .await?;
        Ok(())
    }
}

const RATES_SQL: &str = r"
CREATE TABLE rates (
    date DATE NOT NULL,
    currency_code CHAR(3) NOT NULL,
    provider_code VARCHAR(10) NOT NULL DEFAULT 'ECB' REFERENCES providers(code),
    rate NUMERIC(20, 10) NOT NULL,
    CONSTRAINT chk_rate_positive CHECK (rate > 0),
    CONSTRAINT chk_rate_currency_code CHECK (currency_code ~ '^[A-Z]{3}$'),
    PRIMARY KEY (date, currency_code, provider_code)
);

-- Latest-date lookups and existence probes per provider
CREATE INDEX idx_rates_provider_date ON rates(provider_code, date DESC);

-- Latest-date lookups across all providers
CREATE INDEX idx_rates_date ON rates(date DESC);
";
