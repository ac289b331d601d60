//! GetCropCycleHistoryHandler - Query handler for all cycles of a bloc.

use std::sync::Arc;

use crate::domain::crop_cycle::CropCycle;
use crate::domain::foundation::{BlocId, DomainError};
use crate::ports::CropCycleRepository;

#[derive(Debug, Clone)]
pub struct GetCropCycleHistoryQuery {
    pub bloc_id: BlocId,
}

/// Returns active and closed cycles, most recent first.
pub struct GetCropCycleHistoryHandler {
    cycles: Arc<dyn CropCycleRepository>,
}

impl GetCropCycleHistoryHandler {
    pub fn new(cycles: Arc<dyn CropCycleRepository>) -> Self {
        Self { cycles }
    }

    pub async fn handle(
        &self,
        query: GetCropCycleHistoryQuery,
    ) -> Result<Vec<CropCycle>, DomainError> {
        self.cycles.find_history_by_bloc(&query.bloc_id).await
    }
}
