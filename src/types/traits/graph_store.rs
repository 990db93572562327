use async_trait::async_trait;
use thiserror::Error;

use crate::types::{
    ClassEdge, ClassRecord, EdgeLookup, EntityEdge, InstanceRecord, LiteralEdge,
    ModificationRecord, PropertyKind, PropertyRecord, TerminalRecord,
};

/// Storage backend failure surfaced through the store traits.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error - wraps all SeaORM errors
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Backend-agnostic failure (corrupt reference data, broken invariant)
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Edge-query and reference-data capability of the relational triple store.
///
/// Injected explicitly into the materializer, filter matcher and resource
/// service so each stays independently testable. Set queries must return
/// rows in a stable order for given parameters so that materializing the
/// same instance twice without intervening writes yields identical maps.
#[async_trait]
pub trait GraphStore: Send + Sync {
    // Reference data. Classes and properties are defined by the external
    // vocabulary loader through the two insert methods and are immutable
    // afterwards except for property-kind specialization.
    async fn class_by_name(&self, name: &str) -> Result<Option<ClassRecord>, StoreError>;
    async fn class_by_id(&self, id: i64) -> Result<Option<ClassRecord>, StoreError>;
    async fn property_by_name(&self, name: &str) -> Result<Option<PropertyRecord>, StoreError>;
    async fn property_by_id(&self, id: i64) -> Result<Option<PropertyRecord>, StoreError>;
    async fn insert_class(&self, name: &str) -> Result<i64, StoreError>;
    async fn insert_property(&self, name: &str, kind: PropertyKind) -> Result<i64, StoreError>;
    async fn specialize_property(&self, id: i64, kind: PropertyKind) -> Result<(), StoreError>;

    // Instances.
    async fn instance_by_id_and_class(
        &self,
        id: i64,
        class_id: i64,
    ) -> Result<Option<InstanceRecord>, StoreError>;
    async fn instance_exists(&self, id: i64) -> Result<bool, StoreError>;
    /// All instances of a class, in stable (insertion) order.
    async fn instances_of_class(&self, class_id: i64) -> Result<Vec<InstanceRecord>, StoreError>;
    /// Most recently inserted instance of a class, for singleton resources.
    async fn newest_instance_of_class(
        &self,
        class_id: i64,
    ) -> Result<Option<InstanceRecord>, StoreError>;
    /// Insert an instance; the store assigns the id unless one is given.
    async fn insert_instance(&self, id: Option<i64>, class_id: i64) -> Result<i64, StoreError>;
    async fn delete_instance(&self, id: i64) -> Result<(), StoreError>;

    // Terminals.
    async fn terminal_by_id(&self, id: i64) -> Result<Option<TerminalRecord>, StoreError>;
    async fn insert_terminal(&self, value: &str) -> Result<i64, StoreError>;

    // Edge set queries, one per edge kind, stable order per subject.
    async fn class_edges(&self, subject: i64) -> Result<Vec<ClassEdge>, StoreError>;
    async fn entity_edges(&self, subject: i64) -> Result<Vec<EntityEdge>, StoreError>;
    async fn literal_edges(&self, subject: i64) -> Result<Vec<LiteralEdge>, StoreError>;

    // Exactly-one edge lookups used by filter matching.
    async fn entity_edge_one(
        &self,
        subject: i64,
        predicate: i64,
    ) -> Result<EdgeLookup<EntityEdge>, StoreError>;
    async fn literal_edge_one(
        &self,
        subject: i64,
        predicate: i64,
    ) -> Result<EdgeLookup<LiteralEdge>, StoreError>;

    // Edge writes.
    async fn insert_class_edge(&self, edge: ClassEdge) -> Result<(), StoreError>;
    async fn insert_entity_edge(&self, edge: EntityEdge) -> Result<(), StoreError>;
    async fn insert_literal_edge(&self, edge: LiteralEdge) -> Result<(), StoreError>;
    /// Remove all edges of all three kinds whose subject is the given id.
    async fn delete_edges_of(&self, subject: i64) -> Result<(), StoreError>;
}

/// Append-only modification log ordered by monotonically increasing job id.
#[async_trait]
pub trait ModificationLog: Send + Sync {
    /// Append a record and commit it; returns the new job id.
    async fn append(&self, method: &str, resource_url: &str) -> Result<i64, StoreError>;
    /// Most recent record, `None` when the log is empty.
    async fn latest(&self) -> Result<Option<ModificationRecord>, StoreError>;
    /// All records strictly after the given job id, ascending. An unknown
    /// job id yields an empty list.
    async fn records_after(&self, job_id: i64) -> Result<Vec<ModificationRecord>, StoreError>;
    /// All records, ascending by job id.
    async fn all_records(&self) -> Result<Vec<ModificationRecord>, StoreError>;
}
