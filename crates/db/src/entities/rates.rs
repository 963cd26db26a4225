//! `SeaORM` Entity for rates table.
//!
//! Every rate is EUR-relative regardless of the provider that published it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub date: Date,
    #[sea_orm(primary_key, auto_increment = false)]
    pub currency_code: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub provider_code: String,
    #[sea_orm(column_type = "Decimal(Some((20, 10)))")]
    pub rate: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::providers::Entity",
        from = "Column::ProviderCode",
        to = "super::providers::Column::Code"
    )]
    Providers,
}

impl Related<super::providers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Providers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for fxrates_core::quote::RateRecord {
    fn from(model: Model) -> Self {
        Self {
            date: model.date,
            currency_code: model.currency_code,
            rate: model.rate,
            provider_code: model.provider_code,
        }
    }
}
