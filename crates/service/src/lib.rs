//! Service layer providing ownership-checked vehicle operations on top of models.
//! - Separates business logic from data access and from the web framework.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod principal;
pub mod vehicle;
#[cfg(test)]
pub mod test_support;

pub use principal::Principal;
pub use vehicle::{VehicleError, VehicleService};
