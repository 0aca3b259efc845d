use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, ActiveValue::{Set, Unchanged}, DatabaseConnection, DbErr};
use uuid::Uuid;

use models::vehicle;

use crate::vehicle::domain::VehicleChanges;
use crate::vehicle::errors::VehicleError;
use crate::vehicle::repository::VehicleRepository;

pub struct SeaOrmVehicleRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<vehicle::Model>, VehicleError> {
        Ok(vehicle::find(&self.db, id).await?)
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<vehicle::Model>, VehicleError> {
        Ok(vehicle::list_by_owner(&self.db, user_id).await?)
    }

    async fn insert(&self, record: vehicle::Model) -> Result<vehicle::Model, VehicleError> {
        Ok(vehicle::insert(&self.db, record).await?)
    }

    async fn update(&self, id: Uuid, changes: &VehicleChanges, updated_at: DateTimeWithTimeZone) -> Result<vehicle::Model, VehicleError> {
        let mut am = vehicle::ActiveModel { id: Unchanged(id), updated_at: Set(updated_at), ..Default::default() };
        if let Some(v) = &changes.registration_no { am.registration_no = Set(v.clone()); }
        if let Some(v) = &changes.vehicle_type { am.vehicle_type = Set(v.clone()); }
        if let Some(v) = &changes.model_name { am.model_name = Set(v.clone()); }
        if let Some(v) = &changes.manufacturer { am.manufacturer = Set(v.clone()); }
        if let Some(v) = changes.year_of_make { am.year_of_make = Set(v); }
        if let Some(v) = &changes.current_location { am.current_location = Set(v.clone()); }
        if let Some(v) = &changes.start_location { am.start_location = Set(v.clone()); }
        if let Some(v) = &changes.end_location { am.end_location = Set(v.clone()); }
        if let Some(v) = changes.start_date { am.start_date = Set(v); }
        if let Some(v) = changes.end_date { am.end_date = Set(v); }
        if let Some(v) = &changes.status { am.status = Set(v.clone()); }

        am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => VehicleError::NotFound,
            other => VehicleError::Repository(other.to_string()),
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, VehicleError> {
        Ok(vehicle::delete(&self.db, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use crate::vehicle::domain::{now, CreateVehicleInput};

    fn input(reg: &str) -> CreateVehicleInput {
        CreateVehicleInput {
            registration_no: Some(reg.into()),
            vehicle_type: Some("bus".into()),
            model: Some("Starbus".into()),
            manufacturer: Some("Tata".into()),
            year_of_make: Some("2015".into()),
            current_location: Some("Depot 4".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn update_writes_only_changed_columns() -> anyhow::Result<()> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmVehicleRepository::new(db);
        let owner = format!("user_{}", Uuid::new_v4());
        let created = repo.insert(input("DL01XY0001").validate()?.into_record(Uuid::new_v4(), &owner, now())).await?;

        let changes = VehicleChanges { status: Some("maintenance".into()), current_location: Some(None), ..Default::default() };
        let updated = repo.update(created.id, &changes, now()).await?;
        assert_eq!(updated.status, "maintenance");
        assert_eq!(updated.current_location, None);
        assert_eq!(updated.registration_no, created.registration_no);
        assert_eq!(updated.user_id, owner);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        assert!(repo.delete(created.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() -> anyhow::Result<()> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmVehicleRepository::new(db);
        let changes = VehicleChanges { status: Some("inactive".into()), ..Default::default() };
        let res = repo.update(Uuid::new_v4(), &changes, now()).await;
        assert!(matches!(res, Err(VehicleError::NotFound)));
        Ok(())
    }
}
