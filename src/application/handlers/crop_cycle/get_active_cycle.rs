//! GetActiveCropCycleHandler - Query handler for a bloc's active cycle.
//!
//! "No active cycle" is a normal answer, not an error.

use std::sync::Arc;

use crate::domain::crop_cycle::CropCycle;
use crate::domain::foundation::{BlocId, DomainError};
use crate::ports::CropCycleRepository;

/// Query for the active cycle of a bloc.
#[derive(Debug, Clone)]
pub struct GetActiveCropCycleQuery {
    pub bloc_id: BlocId,
}

pub struct GetActiveCropCycleHandler {
    cycles: Arc<dyn CropCycleRepository>,
}

impl GetActiveCropCycleHandler {
    pub fn new(cycles: Arc<dyn CropCycleRepository>) -> Self {
        Self { cycles }
    }

    pub async fn handle(
        &self,
        query: GetActiveCropCycleQuery,
    ) -> Result<Option<CropCycle>, DomainError> {
        self.cycles.find_active_by_bloc(&query.bloc_id).await
    }
}
