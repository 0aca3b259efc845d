use async_trait::async_trait;
use models::vehicle;
use sea_orm::prelude::DateTimeWithTimeZone;
use uuid::Uuid;

use super::domain::VehicleChanges;
use super::errors::VehicleError;

/// Persistence seam for vehicle records. Implementations never check ownership;
/// that is the guard's job.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<vehicle::Model>, VehicleError>;
    /// Records of one owner, newest `created_at` first.
    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<vehicle::Model>, VehicleError>;
    async fn insert(&self, record: vehicle::Model) -> Result<vehicle::Model, VehicleError>;
    /// Write only the columns named in `changes`, plus `updated_at`.
    async fn update(&self, id: Uuid, changes: &VehicleChanges, updated_at: DateTimeWithTimeZone) -> Result<vehicle::Model, VehicleError>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, VehicleError>;
}

/// In-memory repository for tests, doc examples and database-less runs
pub mod memory {
    use super::*;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryVehicleRepository {
        rows: RwLock<Vec<vehicle::Model>>, // insertion order
    }

    impl InMemoryVehicleRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn len(&self) -> usize {
            self.rows.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.rows.read().await.is_empty()
        }
    }

    #[async_trait]
    impl VehicleRepository for InMemoryVehicleRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<vehicle::Model>, VehicleError> {
            Ok(self.rows.read().await.iter().find(|v| v.id == id).cloned())
        }

        async fn list_by_owner(&self, user_id: &str) -> Result<Vec<vehicle::Model>, VehicleError> {
            let rows = self.rows.read().await;
            // Reverse first so equal timestamps keep latest-inserted first after the stable sort.
            let mut out: Vec<_> = rows.iter().rev().filter(|v| v.user_id == user_id).cloned().collect();
            out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(out)
        }

        async fn insert(&self, record: vehicle::Model) -> Result<vehicle::Model, VehicleError> {
            vehicle::validate_required("userId", &record.user_id)?;
            let mut rows = self.rows.write().await;
            if rows.iter().any(|v| v.id == record.id) {
                return Err(VehicleError::Repository(format!("duplicate id {}", record.id)));
            }
            rows.push(record.clone());
            Ok(record)
        }

        async fn update(&self, id: Uuid, changes: &VehicleChanges, updated_at: DateTimeWithTimeZone) -> Result<vehicle::Model, VehicleError> {
            let mut rows = self.rows.write().await;
            let row = rows.iter_mut().find(|v| v.id == id).ok_or(VehicleError::NotFound)?;
            changes.apply(row, updated_at);
            Ok(row.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, VehicleError> {
            let mut rows = self.rows.write().await;
            let before = rows.len();
            rows.retain(|v| v.id != id);
            Ok(rows.len() != before)
        }
    }
}
