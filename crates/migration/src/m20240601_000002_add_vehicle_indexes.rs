use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Owner-scoped listing is always newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_vehicle_user_created")
                    .table(Vehicle::Table)
                    .col(Vehicle::UserId)
                    .col((Vehicle::CreatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_vehicle_user_created").table(Vehicle::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Vehicle { Table, UserId, CreatedAt }
