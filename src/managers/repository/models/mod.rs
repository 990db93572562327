pub(crate) mod graph_class_edge;
pub(crate) mod graph_entity_edge;
pub(crate) mod graph_literal_edge;
pub(crate) mod instance;
pub(crate) mod modification;
pub(crate) mod property;
pub(crate) mod rdf_class;
pub(crate) mod terminal;
