use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{
        ColumnDef, DbErr, DeriveMigrationName, Iden, MigrationTrait, SchemaManager, Table,
    },
    sea_query,
};

#[derive(Iden)]
enum Modification {
    Table,
    JobId,
    Method,
    ResourceUrl,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Modification::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Modification::JobId)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Modification::Method).string().not_null())
                    .col(
                        ColumnDef::new(Modification::ResourceUrl)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Modification::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Modification::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
