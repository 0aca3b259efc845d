use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

/// Status assigned when the client does not pick one.
pub const DEFAULT_STATUS: &str = "active";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Owning principal; written once at creation.
    pub user_id: String,
    pub registration_no: String,
    pub vehicle_type: String,
    #[sea_orm(column_name = "model")]
    #[serde(rename = "model")]
    pub model_name: String,
    pub manufacturer: String,
    pub year_of_make: i32,
    pub current_location: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub start_date: Option<DateTimeWithTimeZone>,
    pub end_date: Option<DateTimeWithTimeZone>,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

pub fn validate_required(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Insert a fully-populated record. Required strings are re-checked here so
/// that no code path can persist an empty registration or owner.
pub async fn insert(db: &DatabaseConnection, record: Model) -> Result<Model, errors::ModelError> {
    validate_required("userId", &record.user_id)?;
    validate_required("registrationNo", &record.registration_no)?;
    validate_required("vehicleType", &record.vehicle_type)?;
    validate_required("model", &record.model_name)?;
    validate_required("manufacturer", &record.manufacturer)?;
    validate_required("status", &record.status)?;

    let am = ActiveModel {
        id: Set(record.id),
        user_id: Set(record.user_id),
        registration_no: Set(record.registration_no),
        vehicle_type: Set(record.vehicle_type),
        model_name: Set(record.model_name),
        manufacturer: Set(record.manufacturer),
        year_of_make: Set(record.year_of_make),
        current_location: Set(record.current_location),
        start_location: Set(record.start_location),
        end_location: Set(record.end_location),
        start_date: Set(record.start_date),
        end_date: Set(record.end_date),
        status: Set(record.status),
        created_at: Set(record.created_at),
        updated_at: Set(record.updated_at),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// All vehicles of one owner, newest first.
pub async fn list_by_owner(db: &DatabaseConnection, user_id: &str) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Hard delete; returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
