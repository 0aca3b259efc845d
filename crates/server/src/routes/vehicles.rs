use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use models::vehicle;
use service::vehicle::domain::CreateVehicleInput;
use service::vehicle::guard::require_principal;
use service::VehicleError;

use crate::{auth::CurrentPrincipal, errors::JsonApiError, state::AppState};

#[utoipa::path(
    get, path = "/api/vehicles", tag = "vehicles",
    responses(
        (status = 200, description = "Vehicles owned by the caller, newest first", body = [crate::openapi::VehicleDoc]),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorBody),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<Vec<vehicle::Model>>, JsonApiError> {
    Ok(Json(state.vehicles.list(principal.as_ref()).await?))
}

#[utoipa::path(
    post, path = "/api/vehicles", tag = "vehicles",
    request_body = crate::openapi::CreateVehicleRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::VehicleDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    body: Result<Json<CreateVehicleInput>, JsonRejection>,
) -> Result<(StatusCode, Json<vehicle::Model>), JsonApiError> {
    require_principal(principal.as_ref())?;
    let Json(input) = body?;
    let created = state.vehicles.create(principal.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/vehicles/{id}", tag = "vehicles",
    params(("id" = String, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::VehicleDoc),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody),
    )
)]
pub async fn get(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<Json<vehicle::Model>, JsonApiError> {
    Ok(Json(state.vehicles.get(principal.as_ref(), &id).await?))
}

#[utoipa::path(
    patch, path = "/api/vehicles/{id}", tag = "vehicles",
    params(("id" = String, Path, description = "Vehicle id")),
    request_body = crate::openapi::UpdateVehicleRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::VehicleDoc),
        (status = 400, description = "Bad Request", body = crate::openapi::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<vehicle::Model>, JsonApiError> {
    // Body errors surface only after the ownership guard, inside the service.
    let body = body.map(|Json(v)| v).map_err(|r| VehicleError::bad_request(r.body_text()));
    Ok(Json(state.vehicles.update_json(principal.as_ref(), &id, body).await?))
}

#[utoipa::path(
    delete, path = "/api/vehicles/{id}", tag = "vehicles",
    params(("id" = String, Path, description = "Vehicle id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::SuccessResponse),
        (status = 401, description = "Unauthorized", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<Json<Value>, JsonApiError> {
    state.vehicles.delete(principal.as_ref(), &id).await?;
    Ok(Json(json!({ "success": true })))
}
