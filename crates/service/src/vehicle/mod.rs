//! Vehicle module: domain, ownership guard, repository and service.
//!
//! Every single-record operation goes through [`guard::owned_vehicle`] before
//! touching the store.

pub mod domain;
pub mod errors;
pub mod guard;
pub mod repository;
pub mod repo;
pub mod service;

pub use errors::VehicleError;
pub use service::VehicleService;
