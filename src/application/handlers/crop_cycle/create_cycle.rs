//! CreateCropCycleHandler - Command handler for opening a crop cycle on a bloc.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::catalog::VarietyCategory;
use crate::domain::crop_cycle::{CropCycle, CycleType, NewCropCycle};
use crate::domain::foundation::{
    BlocId, CommandMetadata, CropCycleId, DomainError, ErrorCategory, ErrorCode,
    ValidationError, VarietyId,
};
use crate::ports::{BackendCapabilities, BlocReader, CatalogProvider, CropCycleRepository};

/// Command to open a new crop cycle. Fields are already parsed and present.
#[derive(Debug, Clone)]
pub struct CreateCropCycleCommand {
    pub bloc_id: BlocId,
    pub variety_id: VarietyId,
    pub intercrop_variety_id: Option<VarietyId>,
    pub cycle_type: CycleType,
    pub planting_date: Option<NaiveDate>,
    pub expected_harvest_date: NaiveDate,
    pub expected_yield_tons_per_ha: f64,
    /// Ratoons only. Defaults to the bloc's most recent closed cycle.
    pub parent_cycle_id: Option<CropCycleId>,
}

/// Error type for crop cycle creation.
#[derive(Debug, thiserror::Error)]
pub enum CreateCropCycleError {
    #[error("Bloc not found: {0}")]
    BlocNotFound(BlocId),

    #[error("Unknown sugarcane variety: {0}")]
    UnknownVariety(VarietyId),

    #[error("Unknown intercrop variety: {0}")]
    UnknownIntercrop(VarietyId),

    #[error("Bloc {0} already has an active crop cycle; close it first")]
    ActiveCycleExists(BlocId),

    #[error("Invalid parent cycle: {0}")]
    InvalidParent(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Domain(DomainError),
}

impl CreateCropCycleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CreateCropCycleError::BlocNotFound(_) => ErrorCategory::NotFound,
            CreateCropCycleError::UnknownVariety(_)
            | CreateCropCycleError::UnknownIntercrop(_)
            | CreateCropCycleError::InvalidParent(_)
            | CreateCropCycleError::Validation(_) => ErrorCategory::Validation,
            CreateCropCycleError::ActiveCycleExists(_) => ErrorCategory::Conflict,
            CreateCropCycleError::Domain(err) => err.category(),
        }
    }
}

impl From<DomainError> for CreateCropCycleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ActiveCycleExists => {
                let bloc = err
                    .details
                    .get("bloc_id")
                    .and_then(|b| BlocId::new(b.as_str()).ok());
                match bloc {
                    Some(bloc_id) => CreateCropCycleError::ActiveCycleExists(bloc_id),
                    None => CreateCropCycleError::Domain(err),
                }
            }
            _ => CreateCropCycleError::Domain(err),
        }
    }
}

/// Handler for opening crop cycles.
///
/// The active-cycle pre-check gives a clean conflict for the common case;
/// the repository re-checks at commit time for racing requests.
pub struct CreateCropCycleHandler {
    cycles: Arc<dyn CropCycleRepository>,
    blocs: Arc<dyn BlocReader>,
    catalog: Arc<dyn CatalogProvider>,
    capabilities: BackendCapabilities,
}

impl CreateCropCycleHandler {
    pub fn new(
        cycles: Arc<dyn CropCycleRepository>,
        blocs: Arc<dyn BlocReader>,
        catalog: Arc<dyn CatalogProvider>,
        capabilities: BackendCapabilities,
    ) -> Self {
        Self {
            cycles,
            blocs,
            catalog,
            capabilities,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCropCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<CropCycle, CreateCropCycleError> {
        if !self.capabilities.supports_mutation {
            return Err(DomainError::unsupported("create_cycle").into());
        }

        // 1. Bloc and varieties must exist, each in its own category
        self.blocs
            .find_by_id(&cmd.bloc_id)
            .await?
            .ok_or_else(|| CreateCropCycleError::BlocNotFound(cmd.bloc_id.clone()))?;

        if !self
            .has_variety(&cmd.variety_id, VarietyCategory::Sugarcane)
            .await?
        {
            return Err(CreateCropCycleError::UnknownVariety(cmd.variety_id));
        }
        if let Some(intercrop) = &cmd.intercrop_variety_id {
            if !self.has_variety(intercrop, VarietyCategory::Intercrop).await? {
                return Err(CreateCropCycleError::UnknownIntercrop(intercrop.clone()));
            }
        }

        // 2. Early conflict check
        if self
            .cycles
            .find_active_by_bloc(&cmd.bloc_id)
            .await?
            .is_some()
        {
            return Err(CreateCropCycleError::ActiveCycleExists(cmd.bloc_id));
        }

        // 3. Number and lineage from history
        let history = self.cycles.find_history_by_bloc(&cmd.bloc_id).await?;
        let cycle_number = u32::try_from(history.len() + 1).unwrap_or(u32::MAX);

        let parent = match (cmd.cycle_type, cmd.parent_cycle_id) {
            (CycleType::Plantation, Some(_)) => {
                return Err(CreateCropCycleError::InvalidParent(
                    "only ratoon cycles have a parent cycle".to_string(),
                ));
            }
            (CycleType::Plantation, None) => None,
            (CycleType::Ratoon, Some(parent_id)) => {
                let parent = history
                    .iter()
                    .find(|c| c.id() == parent_id)
                    .ok_or_else(|| {
                        CreateCropCycleError::InvalidParent(format!(
                            "cycle {} does not belong to bloc {}",
                            parent_id, cmd.bloc_id
                        ))
                    })?;
                if parent.is_active() {
                    return Err(CreateCropCycleError::InvalidParent(format!(
                        "cycle {} is still active",
                        parent_id
                    )));
                }
                Some(parent)
            }
            (CycleType::Ratoon, None) => history.iter().find(|c| !c.is_active()),
        };

        // 4. Build aggregate
        let mut cycle = CropCycle::create(NewCropCycle {
            bloc_id: cmd.bloc_id.clone(),
            cycle_type: cmd.cycle_type,
            variety_id: cmd.variety_id,
            intercrop_variety_id: cmd.intercrop_variety_id,
            planting_date: cmd.planting_date,
            expected_harvest_date: cmd.expected_harvest_date,
            expected_yield_tons_per_ha: cmd.expected_yield_tons_per_ha,
            cycle_number,
            parent_cycle_id: parent.map(|p| p.id()),
            regrowth_start_date: parent.and_then(|p| p.actual_harvest_date()),
        })?;

        // 5. Conditional insert
        if let Err(err) = self.cycles.insert_active(&cycle).await {
            tracing::warn!(
                operation = "create_cycle",
                bloc_id = %cmd.bloc_id,
                correlation_id = %metadata.correlation_id(),
                code = %err.code,
                "Crop cycle insert rejected"
            );
            return Err(err.into());
        }

        for event in cycle.take_events() {
            tracing::info!(
                event = event.event_type(),
                cycle_id = %cycle.id(),
                bloc_id = %cycle.bloc_id(),
                cycle_number = cycle.cycle_number(),
                correlation_id = %metadata.correlation_id(),
                "Crop cycle created"
            );
        }

        Ok(cycle)
    }

    async fn has_variety(
        &self,
        id: &VarietyId,
        category: VarietyCategory,
    ) -> Result<bool, DomainError> {
        Ok(self
            .catalog
            .find_variety(id)
            .await?
            .is_some_and(|v| v.category == category))
    }
}
