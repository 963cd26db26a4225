//! Provider catalog backed by the `providers` table.

use fxrates_core::QuoteError;
use fxrates_core::provider::{Provider, ProviderRegistry};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select};

use super::storage_error;
use crate::entities::{providers, rates};

/// Provider registry for the `providers` table.
#[derive(Debug, Clone)]
pub struct ProviderStore {
    db: DatabaseConnection,
}

impl ProviderStore {
    /// Creates a new provider store.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Providers publishing natively against `currency`, lowest code first.
fn native_base_query(currency: &str) -> Select<providers::Entity> {
    providers::Entity::find()
        .filter(providers::Column::BaseCurrency.eq(currency))
        .order_by_asc(providers::Column::Code)
}

impl ProviderRegistry for ProviderStore {
    async fn all(&self) -> Result<Vec<Provider>, QuoteError> {
        let models = providers::Entity::find()
            .order_by_asc(providers::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| storage_error("list providers", &e))?;

        Ok(models.into_iter().map(Provider::from).collect())
    }

    async fn find(&self, code: &str) -> Result<Option<Provider>, QuoteError> {
        let model = providers::Entity::find_by_id(code.to_string())
            .one(&self.db)
            .await
            .map_err(|e| storage_error("find provider", &e))?;

        Ok(model.map(Provider::from))
    }

    async fn find_by_native_base(&self, currency: &str) -> Result<Option<Provider>, QuoteError> {
        let model = native_base_query(currency)
            .one(&self.db)
            .await
            .map_err(|e| storage_error("find provider by base", &e))?;

        Ok(model.map(Provider::from))
    }

    async fn has_any_data(&self, code: &str) -> Result<bool, QuoteError> {
        let row = rates::Entity::find()
            .filter(rates::Column::ProviderCode.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| storage_error("probe provider data", &e))?;

        Ok(row.is_some())
    }
}
