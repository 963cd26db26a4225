//! Providers migration.
//!
//! Creates the catalog of rate providers and registers the ECB, whose rows
//! every other provider's rates are normalized against.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(PROVIDERS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS providers CASCADE;")
            .await?;
        Ok(())
    }
}

const PROVIDERS_SQL: &str = r"
CREATE TABLE providers (
    code VARCHAR(10) PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    base_currency CHAR(3),
    CONSTRAINT chk_provider_code CHECK (code ~ '^[A-Z]{2,10}$'),
    CONSTRAINT chk_base_currency CHECK (base_currency IS NULL OR base_currency ~ '^[A-Z]{3}$')
);

-- Lookup by native base currency during source resolution
CREATE INDEX idx_providers_base_currency ON providers(base_currency, code);

INSERT INTO providers (code, name, base_currency) VALUES
    ('ECB', 'European Central Bank', 'EUR');
";
