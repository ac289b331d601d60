//! ValidateCropCycleClosureHandler - Read-only check before closing a cycle.
//!
//! Returns a `Full` report, with closing figures, when every gate could be
//! evaluated. A read-only backend gets an `Advisory` report that can never
//! close; an unreadable work plan gets an optimistic `Advisory` pass.

use std::sync::Arc;

use crate::domain::crop_cycle::ClosureValidation;
use crate::domain::foundation::{CropCycleId, DomainError, ErrorCategory};
use crate::domain::overview::{aggregate, summarize_closure};
use crate::ports::{BackendCapabilities, BlocReader, CropCycleRepository, WorkPlanReader};

#[derive(Debug, Clone)]
pub struct ValidateCropCycleClosureQuery {
    pub cycle_id: CropCycleId,
}

#[derive(Debug, thiserror::Error)]
pub enum ValidateCropCycleClosureError {
    #[error("Crop cycle not found: {0}")]
    CycleNotFound(CropCycleId),

    #[error("{0}")]
    Domain(#[from] DomainError),
}

impl ValidateCropCycleClosureError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ValidateCropCycleClosureError::CycleNotFound(_) => ErrorCategory::NotFound,
            ValidateCropCycleClosureError::Domain(err) => err.category(),
        }
    }
}

pub struct ValidateCropCycleClosureHandler {
    cycles: Arc<dyn CropCycleRepository>,
    work_plans: Arc<dyn WorkPlanReader>,
    blocs: Arc<dyn BlocReader>,
    capabilities: BackendCapabilities,
}

impl ValidateCropCycleClosureHandler {
    pub fn new(
        cycles: Arc<dyn CropCycleRepository>,
        work_plans: Arc<dyn WorkPlanReader>,
        blocs: Arc<dyn BlocReader>,
        capabilities: BackendCapabilities,
    ) -> Self {
        Self {
            cycles,
            work_plans,
            blocs,
            capabilities,
        }
    }

    pub async fn handle(
        &self,
        query: ValidateCropCycleClosureQuery,
    ) -> Result<ClosureValidation, ValidateCropCycleClosureError> {
        let cycle = self
            .cycles
            .find_by_id(&query.cycle_id)
            .await?
            .ok_or(ValidateCropCycleClosureError::CycleNotFound(query.cycle_id))?;

        let mut report = if self.capabilities.supports_mutation {
            ClosureValidation::full()
        } else {
            ClosureValidation::read_only(
                "Closure is not available: the current backend is read-only",
            )
        };
        if !cycle.is_active() {
            report.error("Crop cycle is already closed");
            return Ok(report);
        }
        if report.is_advisory() {
            return Ok(report);
        }

        let plan = match self.work_plans.load_for_cycle(&cycle.id()).await {
            Ok(plan) => plan,
            Err(err) => {
                tracing::warn!(
                    operation = "validate_closure",
                    cycle_id = %cycle.id(),
                    bloc_id = %cycle.bloc_id(),
                    code = %err.code,
                    "Work plan unreadable; returning advisory closure validation"
                );
                return Ok(ClosureValidation::advisory(
                    "Closure could not be fully verified: the work plan is unavailable",
                ));
            }
        };

        let open_products: Vec<&str> = plan
            .products()
            .iter()
            .filter(|p| !p.status.is_settled())
            .map(|p| p.product_name.as_str())
            .collect();
        if !open_products.is_empty() {
            report.warn(format!(
                "{} product application(s) not completed: {}",
                open_products.len(),
                open_products.join(", ")
            ));
        }

        let open_packages = plan
            .packages()
            .iter()
            .filter(|wp| !wp.status.is_complete())
            .count();
        if open_packages > 0 {
            report.warn(format!("{} work package(s) not complete", open_packages));
        }

        let missing_costs = plan
            .products()
            .iter()
            .filter(|p| p.status.is_settled() && !p.has_actual_costs())
            .count();
        if missing_costs > 0 {
            report.warn(format!(
                "{} settled product application(s) missing actual costs",
                missing_costs
            ));
        }

        let breakdown = aggregate(&plan);
        for warning in &breakdown.warnings {
            report.warn(warning.clone());
        }

        let bloc_area = match self.blocs.find_by_id(cycle.bloc_id()).await {
            Ok(bloc) => bloc.map(|b| b.area_hectares()),
            Err(err) => {
                tracing::warn!(
                    operation = "validate_closure",
                    bloc_id = %cycle.bloc_id(),
                    code = %err.code,
                    "Bloc unreadable; closure summary has no per-hectare cost"
                );
                None
            }
        };
        report.summary = Some(summarize_closure(&cycle, &plan, &breakdown, bloc_area));

        Ok(report)
    }
}
