use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{
        ColumnDef, DbErr, DeriveMigrationName, Iden, Index, MigrationTrait, SchemaManager, Table,
    },
    sea_query,
};

#[derive(Iden)]
enum GraphClassEdge {
    Table,
    Id,
    Subject,
    Predicate,
    Object,
}

#[derive(Iden)]
enum GraphEntityEdge {
    Table,
    Id,
    Subject,
    Predicate,
    Object,
}

#[derive(Iden)]
enum GraphLiteralEdge {
    Table,
    Id,
    Subject,
    Predicate,
    Object,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

macro_rules! edge_table {
    ($manager:expr, $table:ident, $index:literal) => {{
        $manager
            .create_table(
                Table::create()
                    .table($table::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new($table::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new($table::Subject).big_integer().not_null())
                    .col(ColumnDef::new($table::Predicate).big_integer().not_null())
                    .col(ColumnDef::new($table::Object).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Edges are always scanned by subject, optionally narrowed by predicate
        $manager
            .create_index(
                Index::create()
                    .name($index)
                    .table($table::Table)
                    .col($table::Subject)
                    .col($table::Predicate)
                    .to_owned(),
            )
            .await?;
    }};
}

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        edge_table!(manager, GraphClassEdge, "idx_class_edge_subject");
        edge_table!(manager, GraphEntityEdge, "idx_entity_edge_subject");
        edge_table!(manager, GraphLiteralEdge, "idx_literal_edge_subject");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(GraphLiteralEdge::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(GraphEntityEdge::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(GraphClassEdge::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
