mod m001_create_reference_tables;
mod m002_create_instances;
mod m003_create_graph_edges;
mod m004_create_modifications;

use sea_orm_migration::{async_trait::async_trait, MigrationTrait, MigratorTrait};

pub(crate) struct Migrator;

#[async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m001_create_reference_tables::Migration),
            Box::new(m002_create_instances::Migration),
            Box::new(m003_create_graph_edges::Migration),
            Box::new(m004_create_modifications::Migration),
        ]
    }
}
