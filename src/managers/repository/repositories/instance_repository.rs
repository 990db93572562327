use std::sync::Arc;

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    managers::repository::{error::RepositoryError, models::instance::{self, Entity}},
    types::InstanceRecord,
};

pub struct InstanceRepository {
    conn: Arc<DatabaseConnection>,
}

impl InstanceRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    pub async fn get_by_id_and_class(
        &self,
        id: i64,
        class_id: i64,
    ) -> Result<Option<InstanceRecord>, RepositoryError> {
        let record = Entity::find()
            .filter(instance::Column::Id.eq(id))
            .filter(instance::Column::ClassId.eq(class_id))
            .one(self.conn.as_ref())
            .await?;

        Ok(record.map(InstanceRecord::from))
    }

    pub async fn exists(&self, id: i64) -> Result<bool, RepositoryError> {
        let record = Entity::find_by_id(id).one(self.conn.as_ref()).await?;

        Ok(record.is_some())
    }

    /// All instances of a class in insertion order.
    pub async fn get_all_of_class(
        &self,
        class_id: i64,
    ) -> Result<Vec<InstanceRecord>, RepositoryError> {
        let records = Entity::find()
            .filter(instance::Column::ClassId.eq(class_id))
            .order_by_asc(instance::Column::Id)
            .all(self.conn.as_ref())
            .await?;

        Ok(records.into_iter().map(InstanceRecord::from).collect())
    }

    /// The most recently inserted instance of a class, if any.
    pub async fn get_newest_of_class(
        &self,
        class_id: i64,
    ) -> Result<Option<InstanceRecord>, RepositoryError> {
        let record = Entity::find()
            .filter(instance::Column::ClassId.eq(class_id))
            .order_by_desc(instance::Column::Id)
            .one(self.conn.as_ref())
            .await?;

        Ok(record.map(InstanceRecord::from))
    }

    /// Insert an instance, honoring a caller-chosen id when one is given.
    pub async fn create(
        &self,
        id: Option<i64>,
        class_id: i64,
    ) -> Result<i64, RepositoryError> {
        let active_model = match id {
            Some(id) => instance::ActiveModel {
                id: Set(id),
                class_id: Set(class_id),
            },
            None => instance::ActiveModel {
                class_id: Set(class_id),
                ..Default::default()
            },
        };

        let result = Entity::insert(active_model).exec(self.conn.as_ref()).await?;

        // MySQL reports 0 for explicit primary keys
        Ok(id.unwrap_or(result.last_insert_id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        Entity::delete_by_id(id).exec(self.conn.as_ref()).await?;
        Ok(())
    }
}
