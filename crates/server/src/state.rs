use std::sync::Arc;

use service::vehicle::repository::VehicleRepository;
use service::VehicleService;

use crate::auth::PrincipalResolver;

/// Immutable per-process state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub vehicles: Arc<VehicleService<dyn VehicleRepository>>,
    pub principals: Arc<dyn PrincipalResolver>,
}

impl AppState {
    pub fn new(repo: Arc<dyn VehicleRepository>, principals: Arc<dyn PrincipalResolver>) -> Self {
        Self { vehicles: Arc::new(VehicleService::new(repo)), principals }
    }
}
