//! Resource CRUD and collection operations.
//!
//! Translates JSON-LD object graphs to and from the relational triple
//! representation, paginates collection reads, and records every
//! successful write in the modification log.

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use crate::{
    config::ApiConfig,
    error::DataError,
    services::{
        filter::{apply_filter, parse_search_params},
        materializer::GraphMaterializer,
        pagination::{
            build_view, last_page, navigation_param, preprocess_pagination_parameters,
            recreate_iri,
        },
    },
    types::{
        hydra::{Collection, CollectionMember},
        traits::{GraphStore, ModificationLog},
        ClassEdge, EntityEdge, LiteralEdge, PropertyKind, PropertyMap, RawParams,
    },
};

/// Payload keys that are JSON-LD metadata, not properties.
const META_KEYS: [&str; 4] = ["@type", "@context", "@id", "id"];

pub struct ResourceService {
    store: Arc<dyn GraphStore>,
    log: Arc<dyn ModificationLog>,
    materializer: GraphMaterializer,
    api_name: String,
    paginate: bool,
    page_size: i64,
}

/// Validated write plan for one object (and its nested objects). Building
/// the plan performs all payload validation up front so that no partial
/// state is written when the payload is rejected.
struct InsertPlan {
    class_id: i64,
    explicit_id: Option<i64>,
    specializations: Vec<(i64, PropertyKind)>,
    class_edges: Vec<(i64, i64)>,
    nested: Vec<(i64, InsertPlan)>,
    literals: Vec<(i64, String)>,
}

impl ResourceService {
    pub fn new(
        store: Arc<dyn GraphStore>,
        log: Arc<dyn ModificationLog>,
        config: &ApiConfig,
    ) -> Self {
        Self {
            materializer: GraphMaterializer::new(Arc::clone(&store)),
            store,
            log,
            api_name: config.api_name.clone(),
            paginate: config.paginate,
            page_size: config.page_size,
        }
    }

    /// Retrieve one instance as a JSON-LD-ready property map [GET].
    pub async fn get(
        &self,
        id: i64,
        type_: &str,
        path: Option<&str>,
    ) -> Result<PropertyMap, DataError> {
        let mut object = self.materializer.materialize(id, type_).await?;
        let collection_path = self.collection_path(type_, path);
        object.insert(
            "@id".to_string(),
            Value::from(format!("/{}/{}/{}", self.api_name, collection_path, id)),
        );
        Ok(object)
    }

    /// Insert an object (and any nested objects) [POST]; returns the new id.
    ///
    /// # Errors
    ///
    /// - `ClassNotFound` when `object["@type"]` has no class definition.
    /// - `InstanceExists` when an explicit id collides.
    /// - `PropertyNotFound` / `NotInstanceProperty` / `NotAbstractProperty`
    ///   when a payload key is undefined or of the wrong kind.
    pub async fn insert(&self, object: &Value, id: Option<i64>) -> Result<i64, DataError> {
        let plan = self.plan_insert(object, id, true).await?;
        let type_ = object_type(object)?.to_string();
        let id = self.apply_plan(plan).await?;
        self.record_write("POST", &type_, id).await?;
        Ok(id)
    }

    /// Insert a list of objects, positionally paired with explicit ids.
    pub async fn insert_multiple(
        &self,
        objects: &[Value],
        ids: &[i64],
    ) -> Result<Vec<i64>, DataError> {
        let mut inserted = Vec::with_capacity(objects.len());
        for (index, object) in objects.iter().enumerate() {
            inserted.push(self.insert(object, ids.get(index).copied()).await?);
        }
        Ok(inserted)
    }

    /// Replace an instance's full property set [PUT]; returns the id.
    ///
    /// The replacement payload is validated before the old state is
    /// removed, so a rejected payload leaves the instance untouched.
    pub async fn update(&self, id: i64, type_: &str, object: &Value) -> Result<i64, DataError> {
        self.materializer.resolve(id, type_).await?;
        let plan = self.plan_insert(object, Some(id), false).await?;
        self.store.delete_edges_of(id).await?;
        self.store.delete_instance(id).await?;
        let id = self.apply_plan(plan).await?;
        self.record_write("PUT", type_, id).await?;
        Ok(id)
    }

    /// Delete an instance and all its edges [DELETE].
    pub async fn delete(&self, id: i64, type_: &str) -> Result<(), DataError> {
        self.materializer.resolve(id, type_).await?;
        self.store.delete_edges_of(id).await?;
        self.store.delete_instance(id).await?;
        self.record_write("DELETE", type_, id).await?;
        Ok(())
    }

    /// Delete several instances of one type.
    pub async fn delete_multiple(&self, ids: &[i64], type_: &str) -> Result<(), DataError> {
        for id in ids {
            self.delete(*id, type_).await?;
        }
        Ok(())
    }

    /// Retrieve a page of a typed collection [GET].
    ///
    /// Instances are filtered by the search parameters, sliced per the
    /// pagination parameters, and (when pagination is enabled) decorated
    /// with `hydra:totalItems` and a `hydra:view` descriptor.
    pub async fn get_collection(
        &self,
        type_: &str,
        params: &RawParams,
        path: Option<&str>,
    ) -> Result<Collection, DataError> {
        let class = self
            .store
            .class_by_name(type_)
            .await?
            .ok_or_else(|| DataError::ClassNotFound(type_.to_string()))?;

        let filters = parse_search_params(self.store.as_ref(), params).await?;
        let mut filtered = Vec::new();
        for instance in self.store.instances_of_class(class.id).await? {
            if apply_filter(self.store.as_ref(), instance.id, &filters, 0).await? {
                filtered.push(instance);
            }
        }
        let result_length = filtered.len() as i64;

        let slice =
            preprocess_pagination_parameters(params, self.paginate, self.page_size, result_length)?;

        let collection_path = self.collection_path(type_, path);
        let mut collection = Collection {
            id: format!("/{}/{}/", self.api_name, collection_path),
            context: None,
            type_: format!("{}Collection", type_),
            members: Vec::new(),
            total_items: None,
            view: None,
        };

        // The slice is computed before the page-bound check; an
        // out-of-bounds page discards the members via the error below.
        // Saturating arithmetic keeps extreme offsets inside the clamp.
        let current_page_size = slice
            .page_size
            .min(result_length.saturating_sub(slice.offset));
        let start = slice.offset.clamp(0, result_length);
        let end = slice
            .offset
            .saturating_add(current_page_size)
            .clamp(start, result_length);
        for instance in &filtered[start as usize..end as usize] {
            collection.members.push(CollectionMember {
                id: format!("/{}/{}/{}", self.api_name, collection_path, instance.id),
                type_: type_.to_string(),
            });
        }

        if !self.paginate {
            return Ok(collection);
        }

        collection.total_items = Some(result_length);
        if slice.page_size <= 0 {
            // A zero or negative limit cannot form pages.
            return Err(DataError::PageNotFound(slice.page_size.to_string()));
        }
        let last = last_page(result_length, slice.page_size);
        if slice.page < 1 || slice.page > last {
            return Err(DataError::PageNotFound(slice.page.to_string()));
        }

        let iri = recreate_iri(&self.api_name, &collection_path, params);
        collection.view = Some(build_view(
            navigation_param(params),
            &iri,
            result_length,
            slice.page_size,
            slice.offset,
            slice.page,
            last,
        ));
        Ok(collection)
    }

    /// Retrieve the singleton instance of a class.
    pub async fn get_single(
        &self,
        type_: &str,
        path: Option<&str>,
    ) -> Result<PropertyMap, DataError> {
        let instance = self.singleton(type_).await?;
        let mut object = self.get(instance.id, type_, path).await?;
        object.insert(
            "@id".to_string(),
            Value::from(format!("/{}/{}", self.api_name, path.unwrap_or(type_))),
        );
        Ok(object)
    }

    /// Insert the singleton instance of a class; fails when one exists.
    pub async fn insert_single(&self, object: &Value) -> Result<i64, DataError> {
        let type_ = object_type(object)?;
        let class = self
            .store
            .class_by_name(type_)
            .await?
            .ok_or_else(|| DataError::ClassNotFound(type_.to_string()))?;
        if self
            .store
            .newest_instance_of_class(class.id)
            .await?
            .is_some()
        {
            return Err(DataError::InstanceExists(type_.to_string()));
        }
        self.insert(object, None).await
    }

    /// Replace the singleton instance of a class.
    pub async fn update_single(&self, object: &Value) -> Result<i64, DataError> {
        let type_ = object_type(object)?.to_string();
        let instance = self.singleton(&type_).await?;
        self.update(instance.id, &type_, object).await
    }

    /// Delete the singleton instance of a class.
    pub async fn delete_single(&self, type_: &str) -> Result<(), DataError> {
        let instance = self.singleton(type_).await?;
        self.delete(instance.id, type_).await
    }

    async fn singleton(&self, type_: &str) -> Result<crate::types::InstanceRecord, DataError> {
        let class = self
            .store
            .class_by_name(type_)
            .await?
            .ok_or_else(|| DataError::ClassNotFound(type_.to_string()))?;
        self.store
            .newest_instance_of_class(class.id)
            .await?
            .ok_or_else(|| DataError::InstanceNotFound {
                type_: type_.to_string(),
                id: None,
            })
    }

    /// Collection segment used in generated `@id`s. A caller-supplied path
    /// is taken verbatim everywhere (single-resource `@id`s and collection
    /// member links alike; no `Collection` suffix is appended to it), so
    /// the two always agree. `{type}Collection` is only the fallback.
    fn collection_path(&self, type_: &str, path: Option<&str>) -> String {
        match path {
            Some(path) => path.to_string(),
            None => format!("{}Collection", type_),
        }
    }

    async fn record_write(&self, method: &str, type_: &str, id: i64) -> Result<(), DataError> {
        let url = format!("/{}/{}Collection/{}", self.api_name, type_, id);
        let job_id = self.log.append(method, &url).await?;
        tracing::debug!(job_id = job_id, method = method, url = %url, "Recorded modification");
        Ok(())
    }

    /// Validate a payload and build its write plan. `expect_new` enforces
    /// the id-collision check; updates skip it since the old instance is
    /// removed before the plan is applied.
    fn plan_insert<'a>(
        &'a self,
        object: &'a Value,
        explicit_id: Option<i64>,
        expect_new: bool,
    ) -> Pin<Box<dyn Future<Output = Result<InsertPlan, DataError>> + Send + 'a>> {
        Box::pin(async move {
            let type_ = object_type(object)?;
            let class = self
                .store
                .class_by_name(type_)
                .await?
                .ok_or_else(|| DataError::ClassNotFound(type_.to_string()))?;

            if expect_new {
                if let Some(id) = explicit_id {
                    if self.store.instance_exists(id).await? {
                        return Err(DataError::InstanceExists(type_.to_string()));
                    }
                }
            }

            let entries = object
                .as_object()
                .ok_or_else(|| DataError::ClassNotFound(type_.to_string()))?;

            let mut plan = InsertPlan {
                class_id: class.id,
                explicit_id,
                specializations: Vec::new(),
                class_edges: Vec::new(),
                nested: Vec::new(),
                literals: Vec::new(),
            };

            for (key, value) in entries {
                if META_KEYS.contains(&key.as_str()) {
                    continue;
                }
                let property = self
                    .store
                    .property_by_name(key)
                    .await?
                    .ok_or_else(|| DataError::PropertyNotFound(key.clone()))?;

                if value.is_object() {
                    match property.kind {
                        PropertyKind::Abstract => {
                            return Err(DataError::NotInstanceProperty(key.clone()));
                        }
                        PropertyKind::Unspecified => {
                            plan.specializations.push((property.id, PropertyKind::Instance));
                        }
                        PropertyKind::Instance => {}
                    }
                    let child = self.plan_insert(value, None, true).await?;
                    plan.nested.push((property.id, child));
                    continue;
                }

                let text = literal_text(value);
                if let Some(target) = self.store.class_by_name(&text).await? {
                    match property.kind {
                        PropertyKind::Instance => {
                            return Err(DataError::NotAbstractProperty(key.clone()));
                        }
                        PropertyKind::Unspecified => {
                            plan.specializations.push((property.id, PropertyKind::Abstract));
                        }
                        PropertyKind::Abstract => {}
                    }
                    plan.class_edges.push((property.id, target.id));
                } else {
                    plan.literals.push((property.id, text));
                }
            }

            Ok(plan)
        })
    }

    /// Apply a validated plan: instance row first, then edges in the fixed
    /// kind order (class, entity, literal).
    fn apply_plan(
        &self,
        plan: InsertPlan,
    ) -> Pin<Box<dyn Future<Output = Result<i64, DataError>> + Send + '_>> {
        Box::pin(async move {
            let id = self
                .store
                .insert_instance(plan.explicit_id, plan.class_id)
                .await?;

            for (property_id, kind) in plan.specializations {
                self.store.specialize_property(property_id, kind).await?;
            }
            for (predicate, object) in plan.class_edges {
                self.store
                    .insert_class_edge(ClassEdge {
                        subject: id,
                        predicate,
                        object,
                    })
                    .await?;
            }
            for (predicate, child) in plan.nested {
                let object = self.apply_plan(child).await?;
                self.store
                    .insert_entity_edge(EntityEdge {
                        subject: id,
                        predicate,
                        object,
                    })
                    .await?;
            }
            for (predicate, value) in plan.literals {
                let object = self.store.insert_terminal(&value).await?;
                self.store
                    .insert_literal_edge(LiteralEdge {
                        subject: id,
                        predicate,
                        object,
                    })
                    .await?;
            }

            Ok(id)
        })
    }
}

/// Extract the class name of a payload, rejecting objects without `@type`.
fn object_type(object: &Value) -> Result<&str, DataError> {
    object
        .get("@type")
        .and_then(Value::as_str)
        .ok_or_else(|| DataError::ClassNotFound("(missing @type)".to_string()))
}

/// Render a scalar payload value as terminal text. Strings are taken as-is;
/// numbers and booleans use their JSON rendering.
fn literal_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
