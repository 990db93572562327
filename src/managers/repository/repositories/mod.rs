pub(crate) mod class_repository;
pub(crate) mod graph_repository;
pub(crate) mod instance_repository;
pub(crate) mod modification_repository;
pub(crate) mod property_repository;
pub(crate) mod terminal_repository;
