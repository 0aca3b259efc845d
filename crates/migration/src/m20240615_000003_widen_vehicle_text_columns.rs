//! Widen bounded `varchar` columns to `text` on databases created by the first
//! revision of the vehicle table. A no-op where the columns are already `text`.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Vehicle::Table)
                    .modify_column(ColumnDef::new(Vehicle::UserId).text().not_null())
                    .modify_column(ColumnDef::new(Vehicle::RegistrationNo).text().not_null())
                    .modify_column(ColumnDef::new(Vehicle::VehicleType).text().not_null())
                    .modify_column(ColumnDef::new(Vehicle::Model).text().not_null())
                    .modify_column(ColumnDef::new(Vehicle::Manufacturer).text().not_null())
                    .modify_column(ColumnDef::new(Vehicle::CurrentLocation).text().null())
                    .modify_column(ColumnDef::new(Vehicle::StartLocation).text().null())
                    .modify_column(ColumnDef::new(Vehicle::EndLocation).text().null())
                    .modify_column(ColumnDef::new(Vehicle::Status).text().not_null().default("active"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, _manager: &SchemaManager) -> Result<(), DbErr> {
        // Narrowing could truncate stored values.
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Vehicle {
    Table,
    UserId,
    RegistrationNo,
    VehicleType,
    Model,
    Manufacturer,
    CurrentLocation,
    StartLocation,
    EndLocation,
    Status,
}
