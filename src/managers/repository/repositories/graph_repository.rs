use std::sync::Arc;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::{
    managers::repository::{error::RepositoryError, models::{graph_class_edge, graph_entity_edge, graph_literal_edge}},
    types::{ClassEdge, EdgeLookup, EntityEdge, LiteralEdge},
};

/// Access to the three edge tables that make up the stored graph.
pub struct GraphRepository {
    conn: Arc<DatabaseConnection>,
}

impl GraphRepository {
    pub fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    pub async fn class_edges_of(&self, subject: i64) -> Result<Vec<ClassEdge>, RepositoryError> {
        let records = graph_class_edge::Entity::find()
            .filter(graph_class_edge::Column::Subject.eq(subject))
            .order_by_asc(graph_class_edge::Column::Id)
            .all(self.conn.as_ref())
            .await?;

        Ok(records.into_iter().map(ClassEdge::from).collect())
    }

    pub async fn entity_edges_of(&self, subject: i64) -> Result<Vec<EntityEdge>, RepositoryError> {
        let records = graph_entity_edge::Entity::find()
            .filter(graph_entity_edge::Column::Subject.eq(subject))
            .order_by_asc(graph_entity_edge::Column::Id)
            .all(self.conn.as_ref())
            .await?;

        Ok(records.into_iter().map(EntityEdge::from).collect())
    }

    pub async fn literal_edges_of(
        &self,
        subject: i64,
    ) -> Result<Vec<LiteralEdge>, RepositoryError> {
        let records = graph_literal_edge::Entity::find()
            .filter(graph_literal_edge::Column::Subject.eq(subject))
            .order_by_asc(graph_literal_edge::Column::Id)
            .all(self.conn.as_ref())
            .await?;

        Ok(records.into_iter().map(LiteralEdge::from).collect())
    }

    /// Look up the entity edge for a subject/predicate pair, reporting
    /// whether exactly one matched.
    pub async fn entity_edge_for(
        &self,
        subject: i64,
        predicate: i64,
    ) -> Result<EdgeLookup<EntityEdge>, RepositoryError> {
        let records = graph_entity_edge::Entity::find()
            .filter(graph_entity_edge::Column::Subject.eq(subject))
            .filter(graph_entity_edge::Column::Predicate.eq(predicate))
            .limit(2)
            .all(self.conn.as_ref())
            .await?;

        Ok(Self::exactly_one(
            records.into_iter().map(EntityEdge::from).collect(),
        ))
    }

    /// Look up the literal edge for a subject/predicate pair, reporting
    /// whether exactly one matched.
    pub async fn literal_edge_for(
        &self,
        subject: i64,
        predicate: i64,
    ) -> Result<EdgeLookup<LiteralEdge>, RepositoryError> {
        let records = graph_literal_edge::Entity::find()
            .filter(graph_literal_edge::Column::Subject.eq(subject))
            .filter(graph_literal_edge::Column::Predicate.eq(predicate))
            .limit(2)
            .all(self.conn.as_ref())
            .await?;

        Ok(Self::exactly_one(
            records.into_iter().map(LiteralEdge::from).collect(),
        ))
    }

    pub async fn create_class_edge(&self, edge: ClassEdge) -> Result<(), RepositoryError> {
        let active_model = graph_class_edge::ActiveModel {
            subject: Set(edge.subject),
            predicate: Set(edge.predicate),
            object: Set(edge.object),
            ..Default::default()
        };

        graph_class_edge::Entity::insert(active_model)
            .exec_without_returning(self.conn.as_ref())
            .await?;

        Ok(())
    }

    pub async fn create_entity_edge(&self, edge: EntityEdge) -> Result<(), RepositoryError> {
        let active_model = graph_entity_edge::ActiveModel {
            subject: Set(edge.subject),
            predicate: Set(edge.predicate),
            object: Set(edge.object),
            ..Default::default()
        };

        graph_entity_edge::Entity::insert(active_model)
            .exec_without_returning(self.conn.as_ref())
            .await?;

        Ok(())
    }

    pub async fn create_literal_edge(&self, edge: LiteralEdge) -> Result<(), RepositoryError> {
        let active_model = graph_literal_edge::ActiveModel {
            subject: Set(edge.subject),
            predicate: Set(edge.predicate),
            object: Set(edge.object),
            ..Default::default()
        };

        graph_literal_edge::Entity::insert(active_model)
            .exec_without_returning(self.conn.as_ref())
            .await?;

        Ok(())
    }

    /// Remove every edge where the subject is the given instance.
    pub async fn delete_edges_of(&self, subject: i64) -> Result<(), RepositoryError> {
        graph_class_edge::Entity::delete_many()
            .filter(graph_class_edge::Column::Subject.eq(subject))
            .exec(self.conn.as_ref())
            .await?;

        graph_entity_edge::Entity::delete_many()
            .filter(graph_entity_edge::Column::Subject.eq(subject))
            .exec(self.conn.as_ref())
            .await?;

        graph_literal_edge::Entity::delete_many()
            .filter(graph_literal_edge::Column::Subject.eq(subject))
            .exec(self.conn.as_ref())
            .await?;

        Ok(())
    }

    fn exactly_one<T>(mut records: Vec<T>) -> EdgeLookup<T> {
        match records.len() {
            0 => EdgeLookup::NotFound,
            1 => EdgeLookup::Found(records.remove(0)),
            _ => EdgeLookup::Ambiguous,
        }
    }
}
