use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    managers::repository::{error::RepositoryError, models::modification::{self, Entity}},
    types::ModificationRecord,
};

pub struct ModificationRepository {
    conn: Arc<DatabaseConnection>,
}

impl ModificationRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    /// Append a log entry and return its job id.
    pub async fn create(&self, method: &str, resource_url: &str) -> Result<i64, RepositoryError> {
        let active_model = modification::ActiveModel {
            method: Set(method.to_string()),
            resource_url: Set(resource_url.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let result = Entity::insert(active_model).exec(self.conn.as_ref()).await?;

        Ok(result.last_insert_id)
    }

    pub async fn get_latest(&self) -> Result<Option<ModificationRecord>, RepositoryError> {
        let record = Entity::find()
            .order_by_desc(modification::Column::JobId)
            .one(self.conn.as_ref())
            .await?;

        Ok(record.map(ModificationRecord::from))
    }

    /// Entries appended after `job_id`. An unknown anchor yields nothing.
    pub async fn get_after(&self, job_id: i64) -> Result<Vec<ModificationRecord>, RepositoryError> {
        let anchor = Entity::find_by_id(job_id).one(self.conn.as_ref()).await?;
        if anchor.is_none() {
            return Ok(Vec::new());
        }

        let records = Entity::find()
            .filter(modification::Column::JobId.gt(job_id))
            .order_by_asc(modification::Column::JobId)
            .all(self.conn.as_ref())
            .await?;

        Ok(records.into_iter().map(ModificationRecord::from).collect())
    }

    pub async fn get_all(&self) -> Result<Vec<ModificationRecord>, RepositoryError> {
        let records = Entity::find()
            .order_by_asc(modification::Column::JobId)
            .all(self.conn.as_ref())
            .await?;

        Ok(records.into_iter().map(ModificationRecord::from).collect())
    }
}
