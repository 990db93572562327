use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{
        ColumnDef, DbErr, DeriveMigrationName, Iden, Index, MigrationTrait, SchemaManager, Table,
    },
    sea_query,
};

#[derive(Iden)]
enum Instance {
    Table,
    Id,
    ClassId,
}

#[derive(Iden)]
enum Terminal {
    Table,
    Id,
    Value,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Instance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Instance::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Instance::ClassId).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Index on class_id for instances_of_class() queries
        manager
            .create_index(
                Index::create()
                    .name("idx_instance_class_id")
                    .table(Instance::Table)
                    .col(Instance::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Terminal::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Terminal::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Terminal::Value).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Terminal::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Instance::Table).if_exists().to_owned())
            .await
    }
}
