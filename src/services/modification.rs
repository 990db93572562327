//! Modification-log queries used by synchronization clients.

use std::sync::Arc;

use crate::{
    error::DataError,
    types::{traits::ModificationLog, ModificationRecord},
};

pub struct ModificationService {
    log: Arc<dyn ModificationLog>,
}

impl ModificationService {
    pub fn new(log: Arc<dyn ModificationLog>) -> Self {
        Self { log }
    }

    /// Append a modification record; returns the new job id.
    pub async fn record(&self, method: &str, resource_url: &str) -> Result<i64, DataError> {
        Ok(self.log.append(method, resource_url).await?)
    }

    /// Job id of the most recent modification, `None` when the log is empty.
    pub async fn last_job_id(&self) -> Result<Option<i64>, DataError> {
        Ok(self
            .log
            .latest()
            .await?
            .map(|record| record.job_id))
    }

    /// All modifications after the given job id, ascending; all records
    /// when no anchor is given. An unknown anchor yields an empty list.
    pub async fn diff(
        &self,
        agent_job_id: Option<i64>,
    ) -> Result<Vec<ModificationRecord>, DataError> {
        match agent_job_id {
            Some(job_id) => Ok(self.log.records_after(job_id).await?),
            None => Ok(self.log.all_records().await?),
        }
    }
}
