//! Migrator registering entity-specific migrations in dependency order.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_vehicle;
mod m20240601_000002_add_vehicle_indexes;
mod m20240615_000003_widen_vehicle_text_columns;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_vehicle::Migration),
            Box::new(m20240601_000002_add_vehicle_indexes::Migration),
            Box::new(m20240615_000003_widen_vehicle_text_columns::Migration),
        ]
    }
}
