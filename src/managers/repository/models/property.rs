#![allow(unreachable_pub)]

use std::str::FromStr;

use sea_orm::{
    entity::prelude::{DeriveRelation, EnumIter},
    prelude::{ActiveModelBehavior, DeriveEntityModel, DerivePrimaryKey, PrimaryKeyTrait},
};

use crate::types::PropertyKind;

/// A property definition row. `kind` holds the database string
/// representation of [`PropertyKind`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "property")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub kind: String,
}

impl Model {
    /// Parse the kind string into a PropertyKind enum.
    ///
    /// Returns an error if the kind string is not a valid property kind.
    pub fn property_kind(&self) -> Result<PropertyKind, String> {
        PropertyKind::from_str(&self.kind)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
