//! Create `vehicle` table.
//!
//! One row per tracked vehicle; `user_id` is the owning principal issued by the
//! identity provider, so it is stored as an opaque string without a foreign key.
//! Free-form strings are `text`: the API accepts any non-empty value.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(uuid(Vehicle::Id).primary_key())
                    .col(text(Vehicle::UserId).not_null())
                    .col(text(Vehicle::RegistrationNo).not_null())
                    .col(text(Vehicle::VehicleType).not_null())
                    .col(text(Vehicle::Model).not_null())
                    .col(text(Vehicle::Manufacturer).not_null())
                    .col(integer(Vehicle::YearOfMake).not_null())
                    .col(ColumnDef::new(Vehicle::CurrentLocation).text().null())
                    .col(ColumnDef::new(Vehicle::StartLocation).text().null())
                    .col(ColumnDef::new(Vehicle::EndLocation).text().null())
                    .col(ColumnDef::new(Vehicle::StartDate).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Vehicle::EndDate).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Vehicle::Status)
                            .text()
                            .not_null()
                            .default("active"),
                    )
                    .col(timestamp_with_time_zone(Vehicle::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Vehicle::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vehicle::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vehicle {
    Table,
    Id,
    UserId,
    RegistrationNo,
    VehicleType,
    Model,
    Manufacturer,
    YearOfMake,
    CurrentLocation,
    StartLocation,
    EndLocation,
    StartDate,
    EndDate,
    Status,
    CreatedAt,
    UpdatedAt,
}
