#![allow(unreachable_pub)]

use sea_orm::{
    entity::prelude::{DeriveRelation, EnumIter},
    prelude::{
        ActiveModelBehavior, DateTimeUtc, DeriveEntityModel, DerivePrimaryKey, PrimaryKeyTrait,
    },
};

use crate::types::ModificationRecord;

/// Append-only modification-log row; `job_id` increases monotonically.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "modification")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub job_id: i64,
    pub method: String,
    pub resource_url: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ModificationRecord {
    fn from(model: Model) -> Self {
        ModificationRecord {
            job_id: model.job_id,
            method: model.method,
            resource_url: model.resource_url,
        }
    }
}
