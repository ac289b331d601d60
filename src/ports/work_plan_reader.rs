//! Work plan reader port (read side).

use crate::domain::foundation::{CropCycleId, DomainError};
use crate::domain::work_plan::WorkPlan;
use async_trait::async_trait;

/// Loads the product applications and work packages of a cycle.
#[async_trait]
pub trait WorkPlanReader: Send + Sync {
    /// A cycle with no planned work yields an empty plan, not an error.
    async fn load_for_cycle(&self, cycle_id: &CropCycleId) -> Result<WorkPlan, DomainError>;
}
