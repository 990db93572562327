//! Data-access and pagination layer for a Hydra hypermedia API served
//! over a relational triple store.
//!
//! Instances are stored as rows plus three edge tables (instance to
//! class, instance to instance, instance to literal). The services in
//! this crate materialize instances back into JSON-LD-shaped property
//! maps, filter and paginate collections with `hydra:PartialCollectionView`
//! navigation, apply structured inserts/updates/deletes, and keep an
//! append-only modification log for synchronization diffs.
//!
//! Storage is abstracted behind the [`types::traits::GraphStore`] and
//! [`types::traits::ModificationLog`] traits; `managers::repository`
//! provides the SeaORM-backed implementation and `managers::memory` an
//! in-process one used by the test suite.

pub mod config;
pub mod error;
pub mod logger;
pub mod managers;
pub mod services;
pub mod types;

pub use crate::{
    config::{ApiConfig, Config},
    error::DataError,
    services::{GraphMaterializer, ModificationService, ResourceService},
};
