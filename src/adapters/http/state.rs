//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use crate::application::handlers::{
    CloseCropCycleHandler, CreateCropCycleHandler, GetActiveCropCycleHandler,
    GetBlocOverviewHandler, GetCropCycleHistoryHandler, ValidateCropCycleClosureHandler,
};
use crate::ports::{
    BackendCapabilities, BlocReader, CatalogProvider, CropCycleRepository, WorkPlanReader,
};

/// Ports wired once at startup and cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub cycles: Arc<dyn CropCycleRepository>,
    pub blocs: Arc<dyn BlocReader>,
    pub work_plans: Arc<dyn WorkPlanReader>,
    pub catalog: Arc<dyn CatalogProvider>,
    pub capabilities: BackendCapabilities,
}

impl AppState {
    pub fn create_cycle_handler(&self) -> CreateCropCycleHandler {
        CreateCropCycleHandler::new(
            self.cycles.clone(),
            self.blocs.clone(),
            self.catalog.clone(),
            self.capabilities,
        )
    }

    pub fn get_active_cycle_handler(&self) -> GetActiveCropCycleHandler {
        GetActiveCropCycleHandler::new(self.cycles.clone())
    }

    pub fn get_cycle_history_handler(&self) -> GetCropCycleHistoryHandler {
        GetCropCycleHistoryHandler::new(self.cycles.clone())
    }

    pub fn validate_closure_handler(&self) -> ValidateCropCycleClosureHandler {
        ValidateCropCycleClosureHandler::new(
            self.cycles.clone(),
            self.work_plans.clone(),
            self.blocs.clone(),
            self.capabilities,
        )
    }

    pub fn close_cycle_handler(&self) -> CloseCropCycleHandler {
        CloseCropCycleHandler::new(self.cycles.clone(), self.capabilities)
    }

    pub fn bloc_overview_handler(&self) -> GetBlocOverviewHandler {
        GetBlocOverviewHandler::new(
            self.blocs.clone(),
            self.cycles.clone(),
            self.work_plans.clone(),
            self.catalog.clone(),
        )
    }
}
