use std::sync::Arc;

use models::vehicle;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{now, CreateVehicleInput, UpdateVehicleInput};
use super::errors::VehicleError;
use super::guard::{owned_vehicle, require_principal};
use super::repository::VehicleRepository;
use crate::principal::Principal;

/// Vehicle record workflows, independent of the web framework.
///
/// Every operation takes the caller's principal (or `None` when the request
/// carried no valid session) and enforces ownership before touching data.
pub struct VehicleService<R: VehicleRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: VehicleRepository + ?Sized> VehicleService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All vehicles owned by the caller, newest first.
    ///
    /// # Examples
    /// ```
    /// use service::{Principal, VehicleService};
    /// use service::vehicle::repository::memory::InMemoryVehicleRepository;
    /// use std::sync::Arc;
    /// let svc = VehicleService::new(Arc::new(InMemoryVehicleRepository::new()));
    /// let list = tokio_test::block_on(svc.list(Some(&Principal::new("user_1")))).unwrap();
    /// assert!(list.is_empty());
    /// ```
    #[instrument(skip(self, principal))]
    pub async fn list(&self, principal: Option<&Principal>) -> Result<Vec<vehicle::Model>, VehicleError> {
        let principal = require_principal(principal)?;
        let rows = self.repo.list_by_owner(&principal.user_id).await?;
        debug!(user_id = %principal.user_id, count = rows.len(), "vehicles_listed");
        Ok(rows)
    }

    /// Create a vehicle owned by the caller. Owner, id and timestamps are
    /// assigned here; the client cannot choose them.
    ///
    /// # Examples
    /// ```
    /// use service::{Principal, VehicleService};
    /// use service::vehicle::domain::CreateVehicleInput;
    /// use service::vehicle::repository::memory::InMemoryVehicleRepository;
    /// use std::sync::Arc;
    /// let svc = VehicleService::new(Arc::new(InMemoryVehicleRepository::new()));
    /// let input = CreateVehicleInput {
    ///     registration_no: Some("KA01AB1234".into()),
    ///     vehicle_type: Some("car".into()),
    ///     model: Some("Swift".into()),
    ///     manufacturer: Some("Maruti".into()),
    ///     year_of_make: Some("2020".into()),
    ///     ..Default::default()
    /// };
    /// let v = tokio_test::block_on(svc.create(Some(&Principal::new("user_1")), input)).unwrap();
    /// assert_eq!(v.user_id, "user_1");
    /// assert_eq!(v.year_of_make, 2020);
    /// assert_eq!(v.status, "active");
    /// ```
    #[instrument(skip(self, principal, input))]
    pub async fn create(&self, principal: Option<&Principal>, input: CreateVehicleInput) -> Result<vehicle::Model, VehicleError> {
        let principal = require_principal(principal)?;
        let record = input.validate()?.into_record(Uuid::new_v4(), &principal.user_id, now());
        let created = self.repo.insert(record).await?;
        info!(vehicle_id = %created.id, user_id = %created.user_id, registration_no = %created.registration_no, "vehicle_created");
        Ok(created)
    }

    /// A single vehicle, if the caller owns it.
    #[instrument(skip(self, principal))]
    pub async fn get(&self, principal: Option<&Principal>, id: &str) -> Result<vehicle::Model, VehicleError> {
        owned_vehicle(self.repo.as_ref(), id, principal).await
    }

    /// Partial update of an owned vehicle. Only allow-listed fields change;
    /// `updatedAt` always moves forward.
    pub async fn update(&self, principal: Option<&Principal>, id: &str, input: UpdateVehicleInput) -> Result<vehicle::Model, VehicleError> {
        self.update_with(principal, id, move || Ok(input)).await
    }

    /// Partial update from a raw JSON body. The body is only decoded once the
    /// ownership guard passed, so non-owners and unknown ids never see body errors.
    ///
    /// # Examples
    /// ```
    /// use service::{Principal, VehicleService, VehicleError};
    /// use service::vehicle::repository::memory::InMemoryVehicleRepository;
    /// use std::sync::Arc;
    /// let svc = VehicleService::new(Arc::new(InMemoryVehicleRepository::new()));
    /// let id = uuid::Uuid::new_v4().to_string();
    /// let res = tokio_test::block_on(svc.update_json(Some(&Principal::new("u")), &id, Ok(serde_json::json!({ "status": 5 }))));
    /// assert!(matches!(res, Err(VehicleError::NotFound)));
    /// ```
    pub async fn update_json(
        &self,
        principal: Option<&Principal>,
        id: &str,
        body: Result<serde_json::Value, VehicleError>,
    ) -> Result<vehicle::Model, VehicleError> {
        self.update_with(principal, id, move || UpdateVehicleInput::from_json(body?)).await
    }

    #[instrument(skip(self, principal, decode))]
    async fn update_with<F>(&self, principal: Option<&Principal>, id: &str, decode: F) -> Result<vehicle::Model, VehicleError>
    where
        F: FnOnce() -> Result<UpdateVehicleInput, VehicleError> + Send,
    {
        let existing = owned_vehicle(self.repo.as_ref(), id, principal).await?;
        let changes = decode()?.into_changes()?;
        let updated = self.repo.update(existing.id, &changes, now()).await?;
        info!(vehicle_id = %updated.id, user_id = %updated.user_id, "vehicle_updated");
        Ok(updated)
    }

    /// Hard delete of an owned vehicle.
    ///
    /// # Examples
    /// ```
    /// use service::{Principal, VehicleService, VehicleError};
    /// use service::vehicle::repository::memory::InMemoryVehicleRepository;
    /// use std::sync::Arc;
    /// let svc = VehicleService::new(Arc::new(InMemoryVehicleRepository::new()));
    /// let res = tokio_test::block_on(svc.delete(None, "00000000-0000-0000-0000-000000000000"));
    /// assert!(matches!(res, Err(VehicleError::Unauthenticated)));
    /// ```
    #[instrument(skip(self, principal))]
    pub async fn delete(&self, principal: Option<&Principal>, id: &str) -> Result<(), VehicleError> {
        let existing = owned_vehicle(self.repo.as_ref(), id, principal).await?;
        if !self.repo.delete(existing.id).await? {
            // Removed concurrently between the guard and the delete.
            return Err(VehicleError::NotFound);
        }
        info!(vehicle_id = %existing.id, user_id = %existing.user_id, "vehicle_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::repository::memory::InMemoryVehicleRepository;
    use serde_json::json;

    fn svc() -> (Arc<InMemoryVehicleRepository>, VehicleService<InMemoryVehicleRepository>) {
        let repo = Arc::new(InMemoryVehicleRepository::new());
        (repo.clone(), VehicleService::new(repo))
    }

    fn swift() -> CreateVehicleInput {
        serde_json::from_value(json!({
            "registrationNo": "KA01AB1234",
            "vehicleType": "car",
            "model": "Swift",
            "manufacturer": "Maruti",
            "yearOfMake": "2020"
        }))
        .unwrap()
    }

    fn patch(body: serde_json::Value) -> UpdateVehicleInput {
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn every_operation_requires_a_principal() {
        let (repo, svc) = svc();
        let id = Uuid::new_v4().to_string();
        assert!(matches!(svc.list(None).await, Err(VehicleError::Unauthenticated)));
        assert!(matches!(svc.create(None, swift()).await, Err(VehicleError::Unauthenticated)));
        assert!(matches!(svc.get(None, &id).await, Err(VehicleError::Unauthenticated)));
        assert!(matches!(svc.update(None, &id, patch(json!({}))).await, Err(VehicleError::Unauthenticated)));
        assert!(matches!(svc.delete(None, &id).await, Err(VehicleError::Unauthenticated)));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn create_then_list_then_update_scenario() {
        let (_, svc) = svc();
        let alice = Principal::new("alice");

        let created = svc.create(Some(&alice), swift()).await.unwrap();
        assert_eq!(created.user_id, "alice");
        assert_eq!(created.year_of_make, 2020);
        assert_eq!(created.status, "active");
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.id.get_version_num(), 4);

        let listed = svc.list(Some(&alice)).await.unwrap();
        assert_eq!(listed, vec![created.clone()]);

        let updated = svc
            .update(Some(&alice), &created.id.to_string(), patch(json!({ "status": "maintenance" })))
            .await
            .unwrap();
        assert_eq!(updated.status, "maintenance");
        assert_eq!(updated.registration_no, "KA01AB1234");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn client_cannot_choose_owner_or_id() {
        let (_, svc) = svc();
        let body = json!({
            "id": "11111111-1111-4111-8111-111111111111",
            "userId": "mallory",
            "registrationNo": "MH04ZZ9999", "vehicleType": "car", "model": "i20",
            "manufacturer": "Hyundai", "yearOfMake": 2021
        });
        let input: CreateVehicleInput = serde_json::from_value(body).unwrap();
        let v = svc.create(Some(&Principal::new("alice")), input).await.unwrap();
        assert_eq!(v.user_id, "alice");
        assert_ne!(v.id.to_string(), "11111111-1111-4111-8111-111111111111");
    }

    #[tokio::test]
    async fn list_is_scoped_and_newest_first() {
        let (_, svc) = svc();
        let alice = Principal::new("alice");
        let bob = Principal::new("bob");
        let first = svc.create(Some(&alice), swift()).await.unwrap();
        let _theirs = svc.create(Some(&bob), swift()).await.unwrap();
        let second = svc.create(Some(&alice), swift()).await.unwrap();

        let ids: Vec<_> = svc.list(Some(&alice)).await.unwrap().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(svc.list(Some(&bob)).await.unwrap().len(), 1);
        assert!(svc.list(Some(&Principal::new("carol"))).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_owner_is_rejected_and_record_untouched() {
        let (repo, svc) = svc();
        let alice = Principal::new("alice");
        let bob = Principal::new("bob");
        let v = svc.create(Some(&alice), swift()).await.unwrap();
        let id = v.id.to_string();

        assert!(matches!(svc.get(Some(&bob), &id).await, Err(VehicleError::Unauthorized)));
        assert!(matches!(
            svc.update(Some(&bob), &id, patch(json!({ "status": "inactive" }))).await,
            Err(VehicleError::Unauthorized)
        ));
        assert!(matches!(svc.delete(Some(&bob), &id).await, Err(VehicleError::Unauthorized)));

        assert_eq!(svc.get(Some(&alice), &id).await.unwrap(), v);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let (_, svc) = svc();
        let alice = Principal::new("alice");
        let id = Uuid::new_v4().to_string();
        assert!(matches!(svc.get(Some(&alice), &id).await, Err(VehicleError::NotFound)));
        assert!(matches!(svc.update(Some(&alice), &id, patch(json!({}))).await, Err(VehicleError::NotFound)));
        assert!(matches!(svc.delete(Some(&alice), &id).await, Err(VehicleError::NotFound)));
        assert!(matches!(svc.get(Some(&alice), "abc").await, Err(VehicleError::NotFound)));
    }

    #[tokio::test]
    async fn update_ignores_ownership_and_timestamp_fields() {
        let (_, svc) = svc();
        let alice = Principal::new("alice");
        let v = svc.create(Some(&alice), swift()).await.unwrap();
        let updated = svc
            .update(
                Some(&alice),
                &v.id.to_string(),
                patch(json!({ "userId": "bob", "id": Uuid::new_v4(), "createdAt": "2001-01-01T00:00:00Z", "model": "Dzire" })),
            )
            .await
            .unwrap();
        assert_eq!(updated.id, v.id);
        assert_eq!(updated.user_id, "alice");
        assert_eq!(updated.created_at, v.created_at);
        assert_eq!(updated.model_name, "Dzire");
        assert!(svc.list(Some(&Principal::new("bob"))).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_can_clear_optional_fields_but_not_required_ones() {
        let (_, svc) = svc();
        let alice = Principal::new("alice");
        let mut input = swift();
        input.current_location = Some("Bengaluru".into());
        input.start_date = Some("2024-01-15".into());
        let v = svc.create(Some(&alice), input).await.unwrap();
        let id = v.id.to_string();

        let cleared = svc
            .update(Some(&alice), &id, patch(json!({ "currentLocation": null, "startDate": "" })))
            .await
            .unwrap();
        assert_eq!(cleared.current_location, None);
        assert_eq!(cleared.start_date, None);

        let err = svc.update(Some(&alice), &id, patch(json!({ "registrationNo": "" }))).await.unwrap_err();
        assert!(matches!(err, VehicleError::BadRequest(_)));
        let err = svc.update(Some(&alice), &id, patch(json!({ "yearOfMake": "soon" }))).await.unwrap_err();
        assert!(matches!(err, VehicleError::BadRequest(_)));
        assert_eq!(svc.get(Some(&alice), &id).await.unwrap().registration_no, "KA01AB1234");
    }

    #[tokio::test]
    async fn empty_update_still_bumps_updated_at() {
        let (_, svc) = svc();
        let alice = Principal::new("alice");
        let v = svc.create(Some(&alice), swift()).await.unwrap();
        let updated = svc.update(Some(&alice), &v.id.to_string(), patch(json!({}))).await.unwrap();
        assert!(updated.updated_at >= v.updated_at);
        assert_eq!(updated.registration_no, v.registration_no);
    }

    #[tokio::test]
    async fn delete_removes_only_that_record() {
        let (repo, svc) = svc();
        let alice = Principal::new("alice");
        let keep = svc.create(Some(&alice), swift()).await.unwrap();
        let gone = svc.create(Some(&alice), swift()).await.unwrap();

        svc.delete(Some(&alice), &gone.id.to_string()).await.unwrap();
        assert!(matches!(svc.get(Some(&alice), &gone.id.to_string()).await, Err(VehicleError::NotFound)));
        assert!(matches!(svc.delete(Some(&alice), &gone.id.to_string()).await, Err(VehicleError::NotFound)));
        assert_eq!(svc.get(Some(&alice), &keep.id.to_string()).await.unwrap(), keep);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn raw_update_checks_ownership_before_decoding_body() {
        let (_, svc) = svc();
        let alice = Principal::new("alice");
        let bob = Principal::new("bob");
        let v = svc.create(Some(&alice), swift()).await.unwrap();
        let id = v.id.to_string();
        let missing = Uuid::new_v4().to_string();

        let res = svc.update_json(Some(&bob), &id, Ok(json!({ "status": 5 }))).await;
        assert!(matches!(res, Err(VehicleError::Unauthorized)));
        let res = svc.update_json(Some(&alice), &missing, Ok(json!({ "yearOfMake": [1] }))).await;
        assert!(matches!(res, Err(VehicleError::NotFound)));
        let res = svc.update_json(Some(&bob), &id, Err(VehicleError::bad_request("not json"))).await;
        assert!(matches!(res, Err(VehicleError::Unauthorized)));
        let res = svc.update_json(None, &id, Ok(json!({ "status": 5 }))).await;
        assert!(matches!(res, Err(VehicleError::Unauthenticated)));

        let res = svc.update_json(Some(&alice), &id, Ok(json!({ "status": 5 }))).await;
        assert!(matches!(res, Err(VehicleError::BadRequest(_))));
        let res = svc.update_json(Some(&alice), &id, Err(VehicleError::bad_request("not json"))).await;
        assert!(matches!(res, Err(VehicleError::BadRequest(_))));

        let updated = svc.update_json(Some(&alice), &id, Ok(json!({ "status": "inactive" }))).await.unwrap();
        assert_eq!(updated.status, "inactive");
    }

    #[tokio::test]
    async fn create_rejects_missing_fields_without_writing() {
        let (repo, svc) = svc();
        let mut input = swift();
        input.manufacturer = None;
        let err = svc.create(Some(&Principal::new("alice")), input).await.unwrap_err();
        assert!(matches!(err, VehicleError::BadRequest(ref m) if m.contains("manufacturer")));
        assert!(repo.is_empty().await);
    }
}
