use std::sync::Arc;

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::{
    managers::repository::{error::RepositoryError, models::property::{self, Entity, Model}},
    types::{PropertyKind, PropertyRecord},
};

pub struct PropertyRepository {
    conn: Arc<DatabaseConnection>,
}

impl PropertyRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    pub async fn get_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PropertyRecord>, RepositoryError> {
        let record = Entity::find()
            .filter(property::Column::Name.eq(name))
            .one(self.conn.as_ref())
            .await?;

        record.map(Self::to_record).transpose()
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<PropertyRecord>, RepositoryError> {
        let record = Entity::find_by_id(id).one(self.conn.as_ref()).await?;

        record.map(Self::to_record).transpose()
    }

    /// Insert a new property and return its generated id.
    pub async fn create(&self, name: &str, kind: PropertyKind) -> Result<i64, RepositoryError> {
        let active_model = property::ActiveModel {
            name: Set(name.to_string()),
            kind: Set(kind.as_str().to_string()),
            ..Default::default()
        };

        let result = Entity::insert(active_model).exec(self.conn.as_ref()).await?;

        Ok(result.last_insert_id)
    }

    /// Narrow a generic property to an instance or abstract property.
    pub async fn set_kind(&self, id: i64, kind: PropertyKind) -> Result<(), RepositoryError> {
        let existing = Entity::find_by_id(id)
            .one(self.conn.as_ref())
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("Property {} not found", id)))?;

        let mut active_model: property::ActiveModel = existing.into();
        active_model.kind = Set(kind.as_str().to_string());

        active_model.update(self.conn.as_ref()).await?;
        Ok(())
    }

    fn to_record(model: Model) -> Result<PropertyRecord, RepositoryError> {
        let kind = model
            .property_kind()
            .map_err(RepositoryError::Corrupted)?;

        Ok(PropertyRecord {
            id: model.id,
            name: model.name,
            kind,
        })
    }
}
