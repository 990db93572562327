use std::sync::Arc;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::{
    managers::repository::{error::RepositoryError, models::rdf_class::{self, Entity}},
    types::ClassRecord,
};

pub struct ClassRepository {
    conn: Arc<DatabaseConnection>,
}

impl ClassRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<ClassRecord>, RepositoryError> {
        let record = Entity::find()
            .filter(rdf_class::Column::Name.eq(name))
            .one(self.conn.as_ref())
            .await?;

        Ok(record.map(ClassRecord::from))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<ClassRecord>, RepositoryError> {
        let record = Entity::find_by_id(id).one(self.conn.as_ref()).await?;

        Ok(record.map(ClassRecord::from))
    }

    /// Insert a new RDF class and return its generated id.
    pub async fn create(&self, name: &str) -> Result<i64, RepositoryError> {
        let active_model = rdf_class::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = Entity::insert(active_model).exec(self.conn.as_ref()).await?;

        Ok(result.last_insert_id)
    }
}
