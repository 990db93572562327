#![allow(clippy::unwrap_used)]

//! Integration test for the SeaORM-backed store.
//!
//! Runs against an in-memory SQLite database; no external services needed.
//! The production deployment uses MySQL through the same code path.

use std::sync::Arc;

use serde_json::json;

use hydra_engine::{
    config::ApiConfig,
    managers::repository::RepositoryManager,
    services::ResourceService,
    types::{traits::GraphStore, EdgeLookup, PropertyKind, RawParams},
};

#[tokio::test]
async fn test_sqlite_backed_crud_and_pagination() {
    let manager = Arc::new(
        RepositoryManager::connect_with_url("sqlite::memory:")
            .await
            .unwrap(),
    );

    manager.insert_class("Drone").await.unwrap();
    manager
        .insert_property("name", PropertyKind::Unspecified)
        .await
        .unwrap();

    let config = ApiConfig {
        api_name: "api".to_string(),
        paginate: true,
        page_size: 10,
    };
    let service = ResourceService::new(manager.clone(), manager.clone(), &config);

    let mut ids = Vec::new();
    for n in 0..12 {
        let id = service
            .insert(&json!({"@type": "Drone", "name": format!("d{}", n)}), None)
            .await
            .unwrap();
        ids.push(id);
    }

    let drone = service.get(ids[0], "Drone", None).await.unwrap();
    assert_eq!(drone["@type"], json!("Drone"));
    assert_eq!(drone["name"], json!("d0"));

    let page2 = service
        .get_collection(
            "Drone",
            &[("page".to_string(), "2".to_string())]
                .into_iter()
                .collect::<RawParams>(),
            None,
        )
        .await
        .unwrap();
    assert_eq!(page2.members.len(), 2);
    assert_eq!(page2.total_items, Some(12));
    let view = page2.view.unwrap();
    assert_eq!(view.last, "/api/DroneCollection?page=2");

    service.delete(ids[0], "Drone").await.unwrap();
    assert!(!manager.instance_exists(ids[0]).await.unwrap());
}

#[tokio::test]
async fn test_sqlite_property_specialization_and_edge_lookup() {
    let manager = Arc::new(
        RepositoryManager::connect_with_url("sqlite::memory:")
            .await
            .unwrap(),
    );

    manager.insert_class("Drone").await.unwrap();
    manager.insert_class("State").await.unwrap();
    let property_id = manager
        .insert_property("hasState", PropertyKind::Unspecified)
        .await
        .unwrap();
    manager
        .insert_property("speed", PropertyKind::Unspecified)
        .await
        .unwrap();

    let config = ApiConfig {
        api_name: "api".to_string(),
        paginate: true,
        page_size: 10,
    };
    let service = ResourceService::new(manager.clone(), manager.clone(), &config);

    // First use with a nested object narrows the property kind
    let drone_id = service
        .insert(
            &json!({"@type": "Drone", "hasState": {"@type": "State", "speed": "42"}}),
            None,
        )
        .await
        .unwrap();

    let property = manager
        .property_by_id(property_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(property.kind, PropertyKind::Instance);

    match manager.entity_edge_one(drone_id, property_id).await.unwrap() {
        EdgeLookup::Found(edge) => {
            let state = service.get(edge.object, "State", None).await.unwrap();
            assert_eq!(state["speed"], json!("42"));
        }
        other => panic!("expected one entity edge, got {:?}", other),
    }
}
