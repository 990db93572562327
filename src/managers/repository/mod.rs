//! SeaORM-backed store over MySQL (or SQLite for tests).

pub mod config;
pub mod error;
mod migrations;
mod models;
mod repositories;

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

pub use crate::managers::repository::config::{
    RepositoryManagerConfig, RepositoryManagerConfigRaw,
};
use crate::{
    managers::repository::{
        error::RepositoryError,
        migrations::Migrator,
        repositories::{
            class_repository::ClassRepository, graph_repository::GraphRepository,
            instance_repository::InstanceRepository,
            modification_repository::ModificationRepository,
            property_repository::PropertyRepository, terminal_repository::TerminalRepository,
        },
    },
    types::{
        traits::{GraphStore, ModificationLog, StoreError},
        ClassEdge, ClassRecord, EdgeLookup, EntityEdge, InstanceRecord, LiteralEdge,
        ModificationRecord, PropertyKind, PropertyRecord, TerminalRecord,
    },
};

pub struct RepositoryManager {
    class_repository: ClassRepository,
    property_repository: PropertyRepository,
    instance_repository: InstanceRepository,
    terminal_repository: TerminalRepository,
    graph_repository: GraphRepository,
    modification_repository: ModificationRepository,
}

impl RepositoryManager {
    /// Creates a new RepositoryManager instance
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if:
    /// - Database connection fails (e.g. database missing, bad credentials)
    /// - Migrations fail
    pub async fn connect(config: &RepositoryManagerConfig) -> Result<Self, RepositoryError> {
        let mut opt = ConnectOptions::new(config.connection_string());
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(true)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Self::connect_with_options(opt).await
    }

    /// Connect from a raw database URL. Used by tests against SQLite.
    pub async fn connect_with_url(url: &str) -> Result<Self, RepositoryError> {
        Self::connect_with_options(ConnectOptions::new(url)).await
    }

    async fn connect_with_options(options: ConnectOptions) -> Result<Self, RepositoryError> {
        // Establish connection to the specific database
        let conn = Arc::new(Database::connect(options).await?);

        // Apply all pending migrations
        Migrator::up(conn.as_ref(), None).await?;

        Ok(RepositoryManager {
            class_repository: ClassRepository::new(Arc::clone(&conn)),
            property_repository: PropertyRepository::new(Arc::clone(&conn)),
            instance_repository: InstanceRepository::new(Arc::clone(&conn)),
            terminal_repository: TerminalRepository::new(Arc::clone(&conn)),
            graph_repository: GraphRepository::new(Arc::clone(&conn)),
            modification_repository: ModificationRepository::new(Arc::clone(&conn)),
        })
    }
}

#[async_trait]
impl GraphStore for RepositoryManager {
    async fn class_by_name(&self, name: &str) -> Result<Option<ClassRecord>, StoreError> {
        Ok(self.class_repository.get_by_name(name).await?)
    }

    async fn class_by_id(&self, id: i64) -> Result<Option<ClassRecord>, StoreError> {
        Ok(self.class_repository.get_by_id(id).await?)
    }

    async fn property_by_name(&self, name: &str) -> Result<Option<PropertyRecord>, StoreError> {
        Ok(self.property_repository.get_by_name(name).await?)
    }

    async fn property_by_id(&self, id: i64) -> Result<Option<PropertyRecord>, StoreError> {
        Ok(self.property_repository.get_by_id(id).await?)
    }

    async fn insert_class(&self, name: &str) -> Result<i64, StoreError> {
        Ok(self.class_repository.create(name).await?)
    }

    async fn insert_property(&self, name: &str, kind: PropertyKind) -> Result<i64, StoreError> {
        Ok(self.property_repository.create(name, kind).await?)
    }

    async fn specialize_property(&self, id: i64, kind: PropertyKind) -> Result<(), StoreError> {
        Ok(self.property_repository.set_kind(id, kind).await?)
    }

    async fn instance_by_id_and_class(
        &self,
        id: i64,
        class_id: i64,
    ) -> Result<Option<InstanceRecord>, StoreError> {
        Ok(self
            .instance_repository
            .get_by_id_and_class(id, class_id)
            .await?)
    }

    async fn instance_exists(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.instance_repository.exists(id).await?)
    }

    async fn instances_of_class(&self, class_id: i64) -> Result<Vec<InstanceRecord>, StoreError> {
        Ok(self.instance_repository.get_all_of_class(class_id).await?)
    }

    async fn newest_instance_of_class(
        &self,
        class_id: i64,
    ) -> Result<Option<InstanceRecord>, StoreError> {
        Ok(self
            .instance_repository
            .get_newest_of_class(class_id)
            .await?)
    }

    async fn insert_instance(&self, id: Option<i64>, class_id: i64) -> Result<i64, StoreError> {
        Ok(self.instance_repository.create(id, class_id).await?)
    }

    async fn delete_instance(&self, id: i64) -> Result<(), StoreError> {
        Ok(self.instance_repository.delete(id).await?)
    }

    async fn terminal_by_id(&self, id: i64) -> Result<Option<TerminalRecord>, StoreError> {
        Ok(self.terminal_repository.get_by_id(id).await?)
    }

    async fn insert_terminal(&self, value: &str) -> Result<i64, StoreError> {
        Ok(self.terminal_repository.create(value).await?)
    }

    async fn class_edges(&self, subject: i64) -> Result<Vec<ClassEdge>, StoreError> {
        Ok(self.graph_repository.class_edges_of(subject).await?)
    }

    async fn entity_edges(&self, subject: i64) -> Result<Vec<EntityEdge>, StoreError> {
        Ok(self.graph_repository.entity_edges_of(subject).await?)
    }

    async fn literal_edges(&self, subject: i64) -> Result<Vec<LiteralEdge>, StoreError> {
        Ok(self.graph_repository.literal_edges_of(subject).await?)
    }

    async fn entity_edge_one(
        &self,
        subject: i64,
        predicate: i64,
    ) -> Result<EdgeLookup<EntityEdge>, StoreError> {
        Ok(self
            .graph_repository
            .entity_edge_for(subject, predicate)
            .await?)
    }

    async fn literal_edge_one(
        &self,
        subject: i64,
        predicate: i64,
    ) -> Result<EdgeLookup<LiteralEdge>, StoreError> {
        Ok(self
            .graph_repository
            .literal_edge_for(subject, predicate)
            .await?)
    }

    async fn insert_class_edge(&self, edge: ClassEdge) -> Result<(), StoreError> {
        Ok(self.graph_repository.create_class_edge(edge).await?)
    }

    async fn insert_entity_edge(&self, edge: EntityEdge) -> Result<(), StoreError> {
        Ok(self.graph_repository.create_entity_edge(edge).await?)
    }

    async fn insert_literal_edge(&self, edge: LiteralEdge) -> Result<(), StoreError> {
        Ok(self.graph_repository.create_literal_edge(edge).await?)
    }

    async fn delete_edges_of(&self, subject: i64) -> Result<(), StoreError> {
        Ok(self.graph_repository.delete_edges_of(subject).await?)
    }
}

#[async_trait]
impl ModificationLog for RepositoryManager {
    async fn append(&self, method: &str, resource_url: &str) -> Result<i64, StoreError> {
        Ok(self
            .modification_repository
            .create(method, resource_url)
            .await?)
    }

    async fn latest(&self) -> Result<Option<ModificationRecord>, StoreError> {
        Ok(self.modification_repository.get_latest().await?)
    }

    async fn records_after(&self, job_id: i64) -> Result<Vec<ModificationRecord>, StoreError> {
        Ok(self.modification_repository.get_after(job_id).await?)
    }

    async fn all_records(&self) -> Result<Vec<ModificationRecord>, StoreError> {
        Ok(self.modification_repository.get_all().await?)
    }
}
