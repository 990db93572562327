#![allow(unreachable_pub)]

use sea_orm::{
    entity::prelude::{DeriveRelation, EnumIter},
    prelude::{ActiveModelBehavior, DeriveEntityModel, DerivePrimaryKey, PrimaryKeyTrait},
};

use crate::types::LiteralEdge;

/// Instance -> instance property -> terminal edge (hydrus GraphIIT).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "graph_literal_edge")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject: i64,
    pub predicate: i64,
    pub object: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LiteralEdge {
    fn from(model: Model) -> Self {
        LiteralEdge {
            subject: model.subject,
            predicate: model.predicate,
            object: model.object,
        }
    }
}
