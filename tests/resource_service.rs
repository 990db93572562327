#![allow(clippy::unwrap_used)]

//! End-to-end tests for the resource service over the in-memory store:
//! CRUD, collection filtering and pagination, singleton resources and the
//! modification log.

use std::sync::Arc;

use serde_json::json;

use hydra_engine::{
    config::ApiConfig,
    error::DataError,
    managers::memory::MemoryGraphStore,
    services::{
        filter::{apply_filter, FilterMap, FilterValue},
        ModificationService, ResourceService,
    },
    types::{traits::GraphStore, LiteralEdge, PropertyKind, RawParams},
};

fn api_config() -> ApiConfig {
    ApiConfig {
        api_name: "api".to_string(),
        paginate: true,
        page_size: 10,
    }
}

fn params(pairs: &[(&str, &str)]) -> RawParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Seed a small spacecraft vocabulary and return the service plus its store.
async fn spacecraft_service(config: ApiConfig) -> (ResourceService, Arc<MemoryGraphStore>) {
    let store = Arc::new(MemoryGraphStore::new());
    for class in ["Drone", "State", "Spacecraft", "Planet"] {
        store.insert_class(class).await.unwrap();
    }
    for property in ["name", "model", "speed"] {
        store
            .insert_property(property, PropertyKind::Unspecified)
            .await
            .unwrap();
    }
    store
        .insert_property("hasState", PropertyKind::Instance)
        .await
        .unwrap();
    store
        .insert_property("destination", PropertyKind::Instance)
        .await
        .unwrap();
    store
        .insert_property("dronetype", PropertyKind::Abstract)
        .await
        .unwrap();

    let service = ResourceService::new(store.clone(), store.clone(), &config);
    (service, store)
}

#[tokio::test]
async fn test_insert_and_get_roundtrip() {
    let (service, _) = spacecraft_service(api_config()).await;

    let id = service
        .insert(
            &json!({"@type": "Drone", "name": "X-1000", "model": "Mark II"}),
            None,
        )
        .await
        .unwrap();

    let object = service.get(id, "Drone", None).await.unwrap();
    assert_eq!(object["@type"], json!("Drone"));
    assert_eq!(object["name"], json!("X-1000"));
    assert_eq!(object["model"], json!("Mark II"));
    assert_eq!(object["@id"], json!(format!("/api/DroneCollection/{}", id)));
}

#[tokio::test]
async fn test_nested_object_materializes_as_reference() {
    let (service, _) = spacecraft_service(api_config()).await;

    let id = service
        .insert(
            &json!({
                "@type": "Drone",
                "name": "X-1000",
                "hasState": {"@type": "State", "speed": "250"},
            }),
            None,
        )
        .await
        .unwrap();

    let drone = service.get(id, "Drone", None).await.unwrap();
    let state_id = drone["hasState"].as_i64().unwrap();

    let state = service.get(state_id, "State", None).await.unwrap();
    assert_eq!(state["@type"], json!("State"));
    assert_eq!(state["speed"], json!("250"));
}

#[tokio::test]
async fn test_class_valued_property_materializes_as_class_name() {
    let (service, _) = spacecraft_service(api_config()).await;

    // "Spacecraft" names a defined class, so the value becomes a class edge
    let id = service
        .insert(&json!({"@type": "Drone", "dronetype": "Spacecraft"}), None)
        .await
        .unwrap();

    let drone = service.get(id, "Drone", None).await.unwrap();
    assert_eq!(drone["dronetype"], json!("Spacecraft"));
}

#[tokio::test]
async fn test_explicit_id_collision_is_rejected() {
    let (service, _) = spacecraft_service(api_config()).await;

    service
        .insert(&json!({"@type": "Drone", "name": "first"}), Some(7))
        .await
        .unwrap();
    let err = service
        .insert(&json!({"@type": "Drone", "name": "second"}), Some(7))
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::InstanceExists(type_) if type_ == "Drone"));
}

#[tokio::test]
async fn test_rejected_payload_writes_nothing() {
    let (service, _) = spacecraft_service(api_config()).await;

    let err = service
        .insert(
            &json!({"@type": "Drone", "name": "ok", "bogus": "value"}),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::PropertyNotFound(key) if key == "bogus"));

    // Validation failed before anything was written
    let collection = service
        .get_collection("Drone", &params(&[]), None)
        .await
        .unwrap();
    assert!(collection.members.is_empty());
}

#[tokio::test]
async fn test_nested_value_for_abstract_property_is_rejected() {
    let (service, _) = spacecraft_service(api_config()).await;

    let err = service
        .insert(
            &json!({"@type": "Drone", "dronetype": {"@type": "State", "speed": "1"}}),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::NotInstanceProperty(key) if key == "dronetype"));
}

#[tokio::test]
async fn test_class_name_for_instance_property_is_rejected() {
    let (service, _) = spacecraft_service(api_config()).await;

    let err = service
        .insert(&json!({"@type": "Drone", "hasState": "State"}), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::NotAbstractProperty(key) if key == "hasState"));
}

#[tokio::test]
async fn test_update_replaces_the_property_set() {
    let (service, _) = spacecraft_service(api_config()).await;

    let id = service
        .insert(
            &json!({"@type": "Drone", "name": "old", "model": "Mark I"}),
            None,
        )
        .await
        .unwrap();

    service
        .update(id, "Drone", &json!({"@type": "Drone", "name": "new"}))
        .await
        .unwrap();

    let drone = service.get(id, "Drone", None).await.unwrap();
    assert_eq!(drone["name"], json!("new"));
    assert!(!drone.contains_key("model"));
}

#[tokio::test]
async fn test_rejected_update_leaves_the_instance_untouched() {
    let (service, _) = spacecraft_service(api_config()).await;

    let id = service
        .insert(&json!({"@type": "Drone", "name": "keep"}), None)
        .await
        .unwrap();

    let err = service
        .update(id, "Drone", &json!({"@type": "Drone", "bogus": "x"}))
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::PropertyNotFound(_)));

    let drone = service.get(id, "Drone", None).await.unwrap();
    assert_eq!(drone["name"], json!("keep"));
}

#[tokio::test]
async fn test_delete_removes_instance_and_edges() {
    let (service, store) = spacecraft_service(api_config()).await;

    let id = service
        .insert(&json!({"@type": "Drone", "name": "gone"}), None)
        .await
        .unwrap();
    service.delete(id, "Drone").await.unwrap();

    let err = service.get(id, "Drone", None).await.unwrap_err();
    assert!(matches!(
        err,
        DataError::InstanceNotFound { id: Some(missing), .. } if missing == id
    ));
    assert!(store.literal_edges(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_collection_pages_and_bounds() {
    let (service, _) = spacecraft_service(api_config()).await;
    for n in 0..25 {
        service
            .insert(&json!({"@type": "Drone", "name": format!("d{}", n)}), None)
            .await
            .unwrap();
    }

    let page3 = service
        .get_collection("Drone", &params(&[("page", "3")]), None)
        .await
        .unwrap();
    assert_eq!(page3.members.len(), 5);
    assert_eq!(page3.total_items, Some(25));
    assert_eq!(page3.type_, "DroneCollection");

    let err = service
        .get_collection("Drone", &params(&[("page", "4")]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::PageNotFound(page) if page == "4"));
}

#[tokio::test]
async fn test_collection_view_navigation_links() {
    let (service, _) = spacecraft_service(api_config()).await;
    for n in 0..25 {
        service
            .insert(&json!({"@type": "Drone", "name": format!("d{}", n)}), None)
            .await
            .unwrap();
    }

    let page2 = service
        .get_collection("Drone", &params(&[("page", "2")]), None)
        .await
        .unwrap();
    let view = page2.view.unwrap();
    assert_eq!(view.id, "/api/DroneCollection?page=2");
    assert_eq!(view.first, "/api/DroneCollection?page=1");
    assert_eq!(view.last, "/api/DroneCollection?page=3");
    assert_eq!(view.previous.as_deref(), Some("/api/DroneCollection?page=1"));
    assert_eq!(view.next.as_deref(), Some("/api/DroneCollection?page=3"));
}

#[tokio::test]
async fn test_collection_offset_style() {
    let (service, _) = spacecraft_service(api_config()).await;
    for n in 0..25 {
        service
            .insert(&json!({"@type": "Drone", "name": format!("d{}", n)}), None)
            .await
            .unwrap();
    }

    let collection = service
        .get_collection("Drone", &params(&[("offset", "20")]), None)
        .await
        .unwrap();
    assert_eq!(collection.members.len(), 5);
    let view = collection.view.unwrap();
    assert_eq!(view.id, "/api/DroneCollection?offset=20");
    assert_eq!(view.previous.as_deref(), Some("/api/DroneCollection?offset=10"));
    assert!(view.next.is_none());

    let err = service
        .get_collection("Drone", &params(&[("offset", "26")]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::OffsetOutOfRange(26)));
}

#[tokio::test]
async fn test_extreme_page_numbers_are_page_not_found() {
    let (service, _) = spacecraft_service(api_config()).await;
    for n in 0..25 {
        service
            .insert(&json!({"@type": "Drone", "name": format!("d{}", n)}), None)
            .await
            .unwrap();
    }

    let err = service
        .get_collection("Drone", &params(&[("page", &i64::MAX.to_string())]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::PageNotFound(page) if page == i64::MAX.to_string()));

    // A hugely negative offset derives a page below 1
    let err = service
        .get_collection("Drone", &params(&[("offset", &i64::MIN.to_string())]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::PageNotFound(_)));
}

#[tokio::test]
async fn test_conflicting_pagination_styles_are_rejected() {
    let (service, _) = spacecraft_service(api_config()).await;

    let err = service
        .get_collection(
            "Drone",
            &params(&[("page", "1"), ("offset", "0")]),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DataError::IncompatibleParameters("page", "offset")
    ));
}

#[tokio::test]
async fn test_limit_overrides_page_size_per_request() {
    let (service, _) = spacecraft_service(api_config()).await;
    for n in 0..25 {
        service
            .insert(&json!({"@type": "Drone", "name": format!("d{}", n)}), None)
            .await
            .unwrap();
    }

    let collection = service
        .get_collection("Drone", &params(&[("page", "2"), ("limit", "5")]), None)
        .await
        .unwrap();
    assert_eq!(collection.members.len(), 5);
    let view = collection.view.unwrap();
    // 25 items at 5 per page
    assert_eq!(view.last, "/api/DroneCollection?limit=5&page=5");
}

#[tokio::test]
async fn test_unpaginated_collection_returns_everything() {
    let config = ApiConfig {
        paginate: false,
        ..api_config()
    };
    let (service, _) = spacecraft_service(config).await;
    for n in 0..25 {
        service
            .insert(&json!({"@type": "Drone", "name": format!("d{}", n)}), None)
            .await
            .unwrap();
    }

    let collection = service
        .get_collection("Drone", &params(&[]), None)
        .await
        .unwrap();
    assert_eq!(collection.members.len(), 25);
    assert!(collection.view.is_none());
    assert!(collection.total_items.is_none());
}

#[tokio::test]
async fn test_nested_filter_matches_conjunctively() {
    let (service, _) = spacecraft_service(api_config()).await;

    service
        .insert(
            &json!({
                "@type": "Spacecraft",
                "name": "Rover-1",
                "destination": {"@type": "Planet", "name": "Mars"},
            }),
            None,
        )
        .await
        .unwrap();
    service
        .insert(
            &json!({
                "@type": "Spacecraft",
                "name": "Orbiter-1",
                "destination": {"@type": "Planet", "name": "Venus"},
            }),
            None,
        )
        .await
        .unwrap();

    let collection = service
        .get_collection("Spacecraft", &params(&[("destination[name]", "Mars")]), None)
        .await
        .unwrap();
    assert_eq!(collection.members.len(), 1);

    // Conjunction with a scalar clause that does not match
    let collection = service
        .get_collection(
            "Spacecraft",
            &params(&[("destination[name]", "Mars"), ("name", "Orbiter-1")]),
            None,
        )
        .await
        .unwrap();
    assert!(collection.members.is_empty());
}

#[tokio::test]
async fn test_dangling_literal_edge_materializes_as_empty_string() {
    let (service, store) = spacecraft_service(api_config()).await;

    let id = service
        .insert(&json!({"@type": "Drone"}), None)
        .await
        .unwrap();
    let name_id = store.property_by_name("name").await.unwrap().unwrap().id;
    // Literal edge pointing at a terminal row that does not exist
    store
        .insert_literal_edge(LiteralEdge {
            subject: id,
            predicate: name_id,
            object: 9999,
        })
        .await
        .unwrap();

    let drone = service.get(id, "Drone", None).await.unwrap();
    assert_eq!(drone["name"], json!(""));
}

#[tokio::test]
async fn test_filter_nesting_past_depth_limit_never_matches() {
    let (service, store) = spacecraft_service(api_config()).await;

    // A chain of ten states linked through hasState, each carrying the
    // same speed literal
    let mut object = json!({"@type": "State", "speed": "1"});
    for _ in 0..9 {
        object = json!({"@type": "State", "hasState": object, "speed": "1"});
    }
    let id = service.insert(&object, None).await.unwrap();

    let has_state_id = store
        .property_by_name("hasState")
        .await
        .unwrap()
        .unwrap()
        .id;
    let speed_id = store.property_by_name("speed").await.unwrap().unwrap().id;

    // A shallow filter over the same chain matches
    let mut shallow = FilterMap::new();
    let mut inner = FilterMap::new();
    inner.insert(speed_id, FilterValue::Scalar("1".to_string()));
    shallow.insert(has_state_id, FilterValue::Nested(inner));
    assert!(apply_filter(store.as_ref(), id, &shallow, 0).await.unwrap());

    // The same clause nine levels down would match the data, but the
    // recursion guard rejects it
    let mut filters = FilterMap::new();
    filters.insert(speed_id, FilterValue::Scalar("1".to_string()));
    for _ in 0..9 {
        let mut outer = FilterMap::new();
        outer.insert(has_state_id, FilterValue::Nested(filters));
        filters = outer;
    }
    assert!(!apply_filter(store.as_ref(), id, &filters, 0).await.unwrap());
}

#[tokio::test]
async fn test_ambiguous_literal_edge_filters_the_entity_out() {
    let (service, store) = spacecraft_service(api_config()).await;

    let id = service
        .insert(&json!({"@type": "Drone", "name": "dup"}), None)
        .await
        .unwrap();
    // Second literal edge for the same (subject, predicate) pair, even
    // carrying the same value, breaks the exactly-one invariant
    let name_id = store.property_by_name("name").await.unwrap().unwrap().id;
    let terminal = store.insert_terminal("dup").await.unwrap();
    store
        .insert_literal_edge(LiteralEdge {
            subject: id,
            predicate: name_id,
            object: terminal,
        })
        .await
        .unwrap();

    let collection = service
        .get_collection("Drone", &params(&[("name", "dup")]), None)
        .await
        .unwrap();
    assert!(collection.members.is_empty());
}

#[tokio::test]
async fn test_unknown_search_parameter_is_rejected() {
    let (service, _) = spacecraft_service(api_config()).await;

    let err = service
        .get_collection("Drone", &params(&[("altitude", "5")]), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::InvalidSearchParameter(param) if param == "altitude"));
}

#[tokio::test]
async fn test_singleton_lifecycle() {
    let (service, _) = spacecraft_service(api_config()).await;

    service
        .insert_single(&json!({"@type": "State", "speed": "100"}))
        .await
        .unwrap();

    let err = service
        .insert_single(&json!({"@type": "State", "speed": "200"}))
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::InstanceExists(_)));

    let state = service.get_single("State", None).await.unwrap();
    assert_eq!(state["speed"], json!("100"));
    assert_eq!(state["@id"], json!("/api/State"));

    service
        .update_single(&json!({"@type": "State", "speed": "300"}))
        .await
        .unwrap();
    let state = service.get_single("State", None).await.unwrap();
    assert_eq!(state["speed"], json!("300"));

    service.delete_single("State").await.unwrap();
    let err = service.get_single("State", None).await.unwrap_err();
    assert!(matches!(err, DataError::InstanceNotFound { id: None, .. }));
}

#[tokio::test]
async fn test_modification_log_records_every_write() {
    let (service, store) = spacecraft_service(api_config()).await;
    let modifications = ModificationService::new(store.clone());

    let id = service
        .insert(&json!({"@type": "Drone", "name": "a"}), None)
        .await
        .unwrap();
    service
        .update(id, "Drone", &json!({"@type": "Drone", "name": "b"}))
        .await
        .unwrap();
    service.delete(id, "Drone").await.unwrap();

    let all = modifications.diff(None).await.unwrap();
    let methods: Vec<&str> = all.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, ["POST", "PUT", "DELETE"]);
    assert!(all
        .iter()
        .all(|r| r.resource_url == format!("/api/DroneCollection/{}", id)));

    let first = all[0].job_id;
    let after_first = modifications.diff(Some(first)).await.unwrap();
    assert_eq!(after_first.len(), 2);

    // Unknown anchor means the agent's state is unrecognized; report nothing
    let unknown = modifications.diff(Some(9999)).await.unwrap();
    assert!(unknown.is_empty());

    assert_eq!(
        modifications.last_job_id().await.unwrap(),
        Some(all[2].job_id)
    );
}

#[tokio::test]
async fn test_materialization_is_deterministic() {
    let (service, _) = spacecraft_service(api_config()).await;

    let id = service
        .insert(
            &json!({
                "@type": "Drone",
                "name": "X-1000",
                "model": "Mark II",
                "dronetype": "Spacecraft",
                "hasState": {"@type": "State", "speed": "250"},
            }),
            None,
        )
        .await
        .unwrap();

    let first = service.get(id, "Drone", None).await.unwrap();
    let second = service.get(id, "Drone", None).await.unwrap();
    let first_keys: Vec<&String> = first.keys().collect();
    let second_keys: Vec<&String> = second.keys().collect();
    assert_eq!(first_keys, second_keys);
    assert_eq!(first, second);
}
