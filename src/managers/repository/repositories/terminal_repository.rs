use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::{
    managers::repository::{error::RepositoryError, models::terminal::{self, Entity}},
    types::TerminalRecord,
};

pub struct TerminalRepository {
    conn: Arc<DatabaseConnection>,
}

impl TerminalRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<TerminalRecord>, RepositoryError> {
        let record = Entity::find_by_id(id).one(self.conn.as_ref()).await?;

        Ok(record.map(TerminalRecord::from))
    }

    /// Store a literal value and return its terminal id.
    pub async fn create(&self, value: &str) -> Result<i64, RepositoryError> {
        let active_model = terminal::ActiveModel {
            value: Set(Some(value.to_string())),
            ..Default::default()
        };

        let result = Entity::insert(active_model).exec(self.conn.as_ref()).await?;

        Ok(result.last_insert_id)
    }
}
