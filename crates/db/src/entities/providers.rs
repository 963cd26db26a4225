//! `SeaORM` Entity for providers table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "providers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    pub base_currency: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rates::Entity")]
    Rates,
}

impl Related<super::rates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for fxrates_core::provider::Provider {
    fn from(model: Model) -> Self {
        Self {
            code: model.code,
            name: model.name,
            base_currency: model.base_currency,
        }
    }
}
