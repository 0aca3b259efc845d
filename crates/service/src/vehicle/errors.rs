use thiserror::Error;

use models::errors::ModelError;

/// Failures of vehicle workflows. Every variant is terminal for the request.
#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("vehicle belongs to another user")]
    Unauthorized,
    #[error("vehicle not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl VehicleError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            VehicleError::Unauthenticated => 2001,
            VehicleError::Unauthorized => 2002,
            VehicleError::NotFound => 2003,
            VehicleError::BadRequest(_) => 2004,
            VehicleError::Repository(_) => 2100,
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl From<ModelError> for VehicleError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => VehicleError::BadRequest(msg),
            ModelError::Db(msg) => VehicleError::Repository(msg),
        }
    }
}
