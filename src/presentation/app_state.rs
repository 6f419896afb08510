// Application state for HTTP handlers
use crate::application::dashboard_controller::DashboardController;
use crate::infrastructure::surface_store::SurfaceStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub controller: DashboardController,
    pub surfaces: Arc<SurfaceStore>,
}
