//! In-memory crop cycle repository.
//!
//! The active-cycle check and the write happen under one write lock, so
//! concurrent create or close attempts on a bloc are serialized.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::crop_cycle::CropCycle;
use crate::domain::foundation::{BlocId, CropCycleId, DomainError, ErrorCode};
use crate::ports::{BackendCapabilities, CropCycleRepository};

#[derive(Debug, Clone)]
pub struct InMemoryCropCycleRepository {
    cycles: Arc<RwLock<HashMap<CropCycleId, CropCycle>>>,
    capabilities: BackendCapabilities,
}

impl InMemoryCropCycleRepository {
    pub fn new(capabilities: BackendCapabilities) -> Self {
        Self {
            cycles: Arc::new(RwLock::new(HashMap::new())),
            capabilities,
        }
    }

    /// Loads cycles regardless of capabilities. Used by the demo seed.
    pub async fn preload(&self, cycles: impl IntoIterator<Item = CropCycle>) {
        let mut store = self.cycles.write().await;
        for cycle in cycles {
            store.insert(cycle.id(), cycle);
        }
    }

    pub async fn len(&self) -> usize {
        self.cycles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cycles.read().await.is_empty()
    }

    fn ensure_mutable(&self, operation: &str) -> Result<(), DomainError> {
        if self.capabilities.supports_mutation {
            Ok(())
        } else {
            Err(DomainError::unsupported(operation))
        }
    }
}

impl Default for InMemoryCropCycleRepository {
    fn default() -> Self {
        Self::new(BackendCapabilities::full())
    }
}

#[async_trait]
impl CropCycleRepository for InMemoryCropCycleRepository {
    async fn insert_active(&self, cycle: &CropCycle) -> Result<(), DomainError> {
        self.ensure_mutable("create_cycle")?;

        let mut cycles = self.cycles.write().await;
        if let Some(existing) = cycles
            .values()
            .find(|c| c.bloc_id() == cycle.bloc_id() && c.is_active())
        {
            return Err(DomainError::new(
                ErrorCode::ActiveCycleExists,
                "Bloc already has an active crop cycle",
            )
            .with_detail("bloc_id", cycle.bloc_id().to_string())
            .with_detail("active_cycle_id", existing.id().to_string()));
        }
        cycles.insert(cycle.id(), cycle.clone());
        Ok(())
    }

    async fn close_active(&self, cycle: &CropCycle) -> Result<(), DomainError> {
        self.ensure_mutable("close_cycle")?;

        let mut cycles = self.cycles.write().await;
        let stored = cycles.get_mut(&cycle.id()).ok_or_else(|| {
            DomainError::new(ErrorCode::CycleNotFound, "Crop cycle not found")
                .with_detail("cycle_id", cycle.id().to_string())
        })?;
        if !stored.is_active() {
            return Err(DomainError::new(
                ErrorCode::CycleAlreadyClosed,
                "Crop cycle is already closed",
            )
            .with_detail("cycle_id", cycle.id().to_string()));
        }
        *stored = cycle.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &CropCycleId) -> Result<Option<CropCycle>, DomainError> {
        Ok(self.cycles.read().await.get(id).cloned())
    }

    async fn find_active_by_bloc(
        &self,
        bloc_id: &BlocId,
    ) -> Result<Option<CropCycle>, DomainError> {
        Ok(self
            .cycles
            .read()
            .await
            .values()
            .find(|c| c.bloc_id() == bloc_id && c.is_active())
            .cloned())
    }

    async fn find_history_by_bloc(&self, bloc_id: &BlocId) -> Result<Vec<CropCycle>, DomainError> {
        let mut history: Vec<CropCycle> = self
            .cycles
            .read()
            .await
            .values()
            .filter(|c| c.bloc_id() == bloc_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| {
            b.cycle_number()
                .cmp(&a.cycle_number())
                .then_with(|| b.created_at().cmp(&a.created_at()))
        });
        Ok(history)
    }
}
