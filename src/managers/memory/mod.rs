//! In-memory store backend.
//!
//! Backs the store traits with plain vectors behind an async lock. Used by
//! the test suite and usable as a throwaway development backend; the
//! durable backend lives in [`crate::managers::repository`].

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::{
    traits::{GraphStore, ModificationLog, StoreError},
    ClassEdge, ClassRecord, EdgeLookup, EntityEdge, InstanceRecord, LiteralEdge,
    ModificationRecord, PropertyKind, PropertyRecord, TerminalRecord,
};

#[derive(Default)]
struct Inner {
    classes: Vec<ClassRecord>,
    properties: Vec<PropertyRecord>,
    instances: Vec<InstanceRecord>,
    terminals: Vec<TerminalRecord>,
    class_edges: Vec<ClassEdge>,
    entity_edges: Vec<EntityEdge>,
    literal_edges: Vec<LiteralEdge>,
    modifications: Vec<ModificationRecord>,
    next_class_id: i64,
    next_property_id: i64,
    next_instance_id: i64,
    next_terminal_id: i64,
    next_job_id: i64,
}

pub struct MemoryGraphStore {
    inner: RwLock<Inner>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_class_id: 1,
                next_property_id: 1,
                next_instance_id: 1,
                next_terminal_id: 1,
                next_job_id: 1,
                ..Inner::default()
            }),
        }
    }
}

impl Default for MemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

fn exactly_one<T>(mut matches: Vec<T>) -> EdgeLookup<T> {
    match matches.len() {
        0 => EdgeLookup::NotFound,
        1 => EdgeLookup::Found(matches.remove(0)),
        _ => EdgeLookup::Ambiguous,
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn class_by_name(&self, name: &str) -> Result<Option<ClassRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.classes.iter().find(|c| c.name == name).cloned())
    }

    async fn class_by_id(&self, id: i64) -> Result<Option<ClassRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.classes.iter().find(|c| c.id == id).cloned())
    }

    async fn property_by_name(&self, name: &str) -> Result<Option<PropertyRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.properties.iter().find(|p| p.name == name).cloned())
    }

    async fn property_by_id(&self, id: i64) -> Result<Option<PropertyRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.properties.iter().find(|p| p.id == id).cloned())
    }

    async fn insert_class(&self, name: &str) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_class_id;
        inner.next_class_id += 1;
        inner.classes.push(ClassRecord {
            id,
            name: name.to_string(),
        });
        Ok(id)
    }

    async fn insert_property(&self, name: &str, kind: PropertyKind) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_property_id;
        inner.next_property_id += 1;
        inner.properties.push(PropertyRecord {
            id,
            name: name.to_string(),
            kind,
        });
        Ok(id)
    }

    async fn specialize_property(&self, id: i64, kind: PropertyKind) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(property) = inner.properties.iter_mut().find(|p| p.id == id) {
            property.kind = kind;
        }
        Ok(())
    }

    async fn instance_by_id_and_class(
        &self,
        id: i64,
        class_id: i64,
    ) -> Result<Option<InstanceRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .instances
            .iter()
            .find(|i| i.id == id && i.class_id == class_id)
            .cloned())
    }

    async fn instance_exists(&self, id: i64) -> Result<bool, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.instances.iter().any(|i| i.id == id))
    }

    async fn instances_of_class(&self, class_id: i64) -> Result<Vec<InstanceRecord>, StoreError> {
        let inner = self.inner.read().await;
        let mut instances: Vec<InstanceRecord> = inner
            .instances
            .iter()
            .filter(|i| i.class_id == class_id)
            .cloned()
            .collect();
        instances.sort_by_key(|i| i.id);
        Ok(instances)
    }

    async fn newest_instance_of_class(
        &self,
        class_id: i64,
    ) -> Result<Option<InstanceRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .instances
            .iter()
            .filter(|i| i.class_id == class_id)
            .max_by_key(|i| i.id)
            .cloned())
    }

    async fn insert_instance(&self, id: Option<i64>, class_id: i64) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        let id = match id {
            Some(id) => {
                inner.next_instance_id = inner.next_instance_id.max(id + 1);
                id
            }
            None => {
                let id = inner.next_instance_id;
                inner.next_instance_id += 1;
                id
            }
        };
        inner.instances.push(InstanceRecord { id, class_id });
        Ok(id)
    }

    async fn delete_instance(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.instances.retain(|i| i.id != id);
        Ok(())
    }

    async fn terminal_by_id(&self, id: i64) -> Result<Option<TerminalRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.terminals.iter().find(|t| t.id == id).cloned())
    }

    async fn insert_terminal(&self, value: &str) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_terminal_id;
        inner.next_terminal_id += 1;
        inner.terminals.push(TerminalRecord {
            id,
            value: Some(value.to_string()),
        });
        Ok(id)
    }

    async fn class_edges(&self, subject: i64) -> Result<Vec<ClassEdge>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .class_edges
            .iter()
            .filter(|e| e.subject == subject)
            .cloned()
            .collect())
    }

    async fn entity_edges(&self, subject: i64) -> Result<Vec<EntityEdge>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .entity_edges
            .iter()
            .filter(|e| e.subject == subject)
            .cloned()
            .collect())
    }

    async fn literal_edges(&self, subject: i64) -> Result<Vec<LiteralEdge>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .literal_edges
            .iter()
            .filter(|e| e.subject == subject)
            .cloned()
            .collect())
    }

    async fn entity_edge_one(
        &self,
        subject: i64,
        predicate: i64,
    ) -> Result<EdgeLookup<EntityEdge>, StoreError> {
        let inner = self.inner.read().await;
        Ok(exactly_one(
            inner
                .entity_edges
                .iter()
                .filter(|e| e.subject == subject && e.predicate == predicate)
                .cloned()
                .collect(),
        ))
    }

    async fn literal_edge_one(
        &self,
        subject: i64,
        predicate: i64,
    ) -> Result<EdgeLookup<LiteralEdge>, StoreError> {
        let inner = self.inner.read().await;
        Ok(exactly_one(
            inner
                .literal_edges
                .iter()
                .filter(|e| e.subject == subject && e.predicate == predicate)
                .cloned()
                .collect(),
        ))
    }

    async fn insert_class_edge(&self, edge: ClassEdge) -> Result<(), StoreError> {
        self.inner.write().await.class_edges.push(edge);
        Ok(())
    }

    async fn insert_entity_edge(&self, edge: EntityEdge) -> Result<(), StoreError> {
        self.inner.write().await.entity_edges.push(edge);
        Ok(())
    }

    async fn insert_literal_edge(&self, edge: LiteralEdge) -> Result<(), StoreError> {
        self.inner.write().await.literal_edges.push(edge);
        Ok(())
    }

    async fn delete_edges_of(&self, subject: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.class_edges.retain(|e| e.subject != subject);
        inner.entity_edges.retain(|e| e.subject != subject);
        inner.literal_edges.retain(|e| e.subject != subject);
        Ok(())
    }
}

#[async_trait]
impl ModificationLog for MemoryGraphStore {
    async fn append(&self, method: &str, resource_url: &str) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        let job_id = inner.next_job_id;
        inner.next_job_id += 1;
        inner.modifications.push(ModificationRecord {
            job_id,
            method: method.to_string(),
            resource_url: resource_url.to_string(),
        });
        Ok(job_id)
    }

    async fn latest(&self) -> Result<Option<ModificationRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.modifications.last().cloned())
    }

    async fn records_after(&self, job_id: i64) -> Result<Vec<ModificationRecord>, StoreError> {
        let inner = self.inner.read().await;
        if !inner.modifications.iter().any(|r| r.job_id == job_id) {
            return Ok(Vec::new());
        }
        Ok(inner
            .modifications
            .iter()
            .filter(|r| r.job_id > job_id)
            .cloned()
            .collect())
    }

    async fn all_records(&self) -> Result<Vec<ModificationRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.modifications.clone())
    }
}
