//! In-memory work plan store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{CropCycleId, DomainError};
use crate::domain::work_plan::{ProductApplication, WorkPackage, WorkPlan};
use crate::ports::WorkPlanReader;

#[derive(Debug, Clone, Default)]
struct StoredPlan {
    products: Vec<ProductApplication>,
    packages: Vec<WorkPackage>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkPlanStore {
    plans: Arc<RwLock<HashMap<CropCycleId, StoredPlan>>>,
}

impl InMemoryWorkPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored plan of a cycle.
    pub async fn put_plan(
        &self,
        cycle_id: CropCycleId,
        products: Vec<ProductApplication>,
        packages: Vec<WorkPackage>,
    ) {
        self.plans
            .write()
            .await
            .insert(cycle_id, StoredPlan { products, packages });
    }
}

#[async_trait]
impl WorkPlanReader for InMemoryWorkPlanStore {
    async fn load_for_cycle(&self, cycle_id: &CropCycleId) -> Result<WorkPlan, DomainError> {
        let plans = self.plans.read().await;
        let stored = plans.get(cycle_id).cloned().unwrap_or_default();
        Ok(WorkPlan::new(*cycle_id, stored.products, stored.packages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_cycle_loads_empty_plan() {
        let store = InMemoryWorkPlanStore::new();
        let cycle_id = CropCycleId::new();
        let plan = store.load_for_cycle(&cycle_id).await.unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.cycle_id(), Some(cycle_id));
    }

    #[tokio::test]
    async fn stored_plan_is_returned() {
        let store = InMemoryWorkPlanStore::new();
        let cycle_id = CropCycleId::new();
        let product = ProductApplication::planned(cycle_id, "Urea");
        let package = WorkPackage::scheduled(product.id, None);
        store
            .put_plan(cycle_id, vec![product.clone()], vec![package])
            .await;

        let plan = store.load_for_cycle(&cycle_id).await.unwrap();
        assert_eq!(plan.packages_of(&product.id).count(), 1);
    }
}
