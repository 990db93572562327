//! Graph materializer.
//!
//! Reconstructs an instance's full property map from the three labeled edge
//! kinds (class, entity, literal), joining predicate ids back to property
//! names and object ids back to class names, referenced instance ids or
//! terminal values.

use std::sync::Arc;

use serde_json::Value;

use crate::{
    error::DataError,
    types::{
        traits::{GraphStore, StoreError},
        ClassRecord, InstanceRecord, PropertyMap,
    },
};

pub struct GraphMaterializer {
    store: Arc<dyn GraphStore>,
}

impl GraphMaterializer {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Resolve an instance by id and expected class name.
    ///
    /// # Errors
    ///
    /// - `ClassNotFound` when the type name has no class definition.
    /// - `InstanceNotFound` when no instance matches both id and class.
    pub async fn resolve(
        &self,
        id: i64,
        type_: &str,
    ) -> Result<(ClassRecord, InstanceRecord), DataError> {
        let class = self
            .store
            .class_by_name(type_)
            .await?
            .ok_or_else(|| DataError::ClassNotFound(type_.to_string()))?;
        let instance = self
            .store
            .instance_by_id_and_class(id, class.id)
            .await?
            .ok_or_else(|| DataError::InstanceNotFound {
                type_: type_.to_string(),
                id: Some(id),
            })?;
        Ok((class, instance))
    }

    /// Materialize the property map of a resolved instance.
    ///
    /// Edge kinds are processed in fixed order: class edges, entity edges,
    /// literal edges. Property name collisions across kinds are not
    /// disambiguated; the last writer wins (a well-formed schema never
    /// assigns one property name two edge kinds for one instance).
    ///
    /// Quirk preserved from the original implementation: a literal edge
    /// whose terminal row is missing or NULL materializes as the empty
    /// string instead of an error.
    pub async fn materialize_into(
        &self,
        subject: i64,
        template: &mut PropertyMap,
    ) -> Result<(), DataError> {
        for edge in self.store.class_edges(subject).await? {
            let name = self.property_name(edge.predicate).await?;
            let class = self
                .store
                .class_by_id(edge.object)
                .await?
                .ok_or_else(|| dangling("class", edge.object))?;
            template.insert(name, Value::from(class.name));
        }

        for edge in self.store.entity_edges(subject).await? {
            let name = self.property_name(edge.predicate).await?;
            template.insert(name, Value::from(edge.object));
        }

        for edge in self.store.literal_edges(subject).await? {
            let name = self.property_name(edge.predicate).await?;
            let value = match self.store.terminal_by_id(edge.object).await? {
                Some(terminal) => terminal.value.unwrap_or_default(),
                None => {
                    tracing::debug!(
                        subject = subject,
                        terminal_id = edge.object,
                        "Literal edge points at a missing terminal; substituting empty string"
                    );
                    String::new()
                }
            };
            template.insert(name, Value::from(value));
        }

        Ok(())
    }

    /// Resolve an instance and materialize its property map in one step.
    pub async fn materialize(&self, id: i64, type_: &str) -> Result<PropertyMap, DataError> {
        let (class, instance) = self.resolve(id, type_).await?;
        let mut template = PropertyMap::new();
        template.insert("@type".to_string(), Value::from(class.name));
        self.materialize_into(instance.id, &mut template).await?;
        Ok(template)
    }

    async fn property_name(&self, predicate: i64) -> Result<String, DataError> {
        Ok(self
            .store
            .property_by_id(predicate)
            .await?
            .ok_or_else(|| dangling("property", predicate))?
            .name)
    }
}

/// An edge referencing missing reference data is a broken store invariant,
/// not a client error; fail loudly.
fn dangling(what: &str, id: i64) -> DataError {
    DataError::Store(StoreError::Backend(format!(
        "edge references missing {} row {}",
        what, id
    )))
}
