//! Ownership guard: the single place that decides whether a principal may
//! touch a specific vehicle.

use models::vehicle;
use tracing::warn;
use uuid::Uuid;

use super::errors::VehicleError;
use super::repository::VehicleRepository;
use crate::principal::Principal;

/// Fail with `Unauthenticated` when no principal was resolved.
pub fn require_principal(principal: Option<&Principal>) -> Result<&Principal, VehicleError> {
    principal.ok_or(VehicleError::Unauthenticated)
}

/// Load the vehicle `id` and confirm `principal` owns it.
///
/// Checks run in a fixed order: principal present, record exists, owner matches.
/// An id that is not a UUID cannot name a stored record and reads as `NotFound`.
pub async fn owned_vehicle<R>(repo: &R, id: &str, principal: Option<&Principal>) -> Result<vehicle::Model, VehicleError>
where
    R: VehicleRepository + ?Sized,
{
    let principal = require_principal(principal)?;
    let id = Uuid::parse_str(id.trim()).map_err(|_| VehicleError::NotFound)?;
    let record = repo.find_by_id(id).await?.ok_or(VehicleError::NotFound)?;
    if !record.is_owned_by(&principal.user_id) {
        warn!(vehicle_id = %id, user_id = %principal.user_id, "ownership_mismatch");
        return Err(VehicleError::Unauthorized);
    }
    Ok(record)
}
