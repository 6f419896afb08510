// Action registry - named controller factories owned by the host application
use crate::application::dashboard_controller::{ControllerDeps, DashboardController};
use crate::domain::error::DashboardError;
use std::collections::HashMap;

pub const HOSPITAL_DASHBOARD_ACTION: &str = "hospital_dashboard";

pub type ControllerFactory = fn(ControllerDeps) -> DashboardController;

#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, ControllerFactory>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in dashboard action.
    pub fn with_defaults() -> Result<Self, DashboardError> {
        let mut registry = Self::new();
        registry.add(HOSPITAL_DASHBOARD_ACTION, DashboardController::from_deps)?;
        Ok(registry)
    }

    pub fn add(&mut self, name: &str, factory: ControllerFactory) -> Result<(), DashboardError> {
        if self.actions.contains_key(name) {
            return Err(DashboardError::DuplicateAction(name.to_string()));
        }
        self.actions.insert(name.to_string(), factory);
        Ok(())
    }

    pub fn instantiate(&self, name: &str, deps: ControllerDeps) -> Option<DashboardController> {
        self.actions.get(name).map(|factory| factory(deps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_controller::{ControllerSettings, ControllerState};
    use crate::application::test_support::FakeSource;
    use crate::infrastructure::surface_store::SurfaceStore;
    use std::sync::Arc;

    fn deps() -> ControllerDeps {
        ControllerDeps {
            source: Arc::new(FakeSource::healthy()),
            host: Arc::new(SurfaceStore::new()),
            settings: ControllerSettings::default(),
        }
    }

    #[test]
    fn test_duplicate_action_rejected() {
        let mut registry = ActionRegistry::with_defaults().unwrap();
        let err = registry
            .add(HOSPITAL_DASHBOARD_ACTION, DashboardController::from_deps)
            .unwrap_err();
        assert_eq!(err, DashboardError::DuplicateAction("hospital_dashboard".to_string()));
    }

    #[test]
    fn test_instantiate() {
        let registry = ActionRegistry::with_defaults().unwrap();
        assert!(registry.instantiate("unknown", deps()).is_none());

        let controller = registry.instantiate(HOSPITAL_DASHBOARD_ACTION, deps()).unwrap();
        assert_eq!(controller.state(), ControllerState::Idle);
    }
}
