use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBody { pub error: String, pub message: String }

#[derive(ToSchema)]
pub struct SuccessResponse { pub success: bool }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct VehicleDoc {
    pub id: String,
    pub user_id: String,
    pub registration_no: String,
    pub vehicle_type: String,
    pub model: String,
    pub manufacturer: String,
    pub year_of_make: i32,
    pub current_location: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// `yearOfMake` also accepts a numeric string such as `"2020"`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub registration_no: String,
    pub vehicle_type: String,
    pub model: String,
    pub manufacturer: String,
    pub year_of_make: i32,
    pub current_location: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

/// Every key is optional; `null` clears an optional field. Other keys are ignored.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub registration_no: Option<String>,
    pub vehicle_type: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub year_of_make: Option<i32>,
    pub current_location: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::vehicles::list,
        crate::routes::vehicles::create,
        crate::routes::vehicles::get,
        crate::routes::vehicles::update,
        crate::routes::vehicles::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            SuccessResponse,
            VehicleDoc,
            CreateVehicleRequest,
            UpdateVehicleRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "vehicles")
    )
)]
pub struct ApiDoc;
