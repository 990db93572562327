use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{
        ColumnDef, DbErr, DeriveMigrationName, Iden, MigrationTrait, SchemaManager, Table,
    },
    sea_query,
};

#[derive(Iden)]
enum RdfClass {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Property {
    Table,
    Id,
    Name,
    Kind,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RdfClass::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RdfClass::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RdfClass::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Property::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Property::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Property::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Property::Kind).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Property::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RdfClass::Table).if_exists().to_owned())
            .await
    }
}
