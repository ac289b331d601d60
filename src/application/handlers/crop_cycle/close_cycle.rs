//! CloseCropCycleHandler - Command handler for closing a cycle after harvest.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::crop_cycle::CropCycle;
use crate::domain::foundation::{
    CommandMetadata, CropCycleId, DomainError, ErrorCategory, ErrorCode,
};
use crate::ports::{BackendCapabilities, CropCycleRepository};

/// Command to close a crop cycle.
#[derive(Debug, Clone)]
pub struct CloseCropCycleCommand {
    pub cycle_id: CropCycleId,
    pub actual_harvest_date: NaiveDate,
    /// The user acknowledged that closure is final.
    pub user_confirmation: bool,
}

/// Error type for crop cycle closure.
#[derive(Debug, thiserror::Error)]
pub enum CloseCropCycleError {
    #[error("Closing a crop cycle requires user confirmation")]
    NotConfirmed,

    #[error("Crop cycle not found: {0}")]
    CycleNotFound(CropCycleId),

    #[error("Crop cycle {0} is already closed")]
    AlreadyClosed(CropCycleId),

    #[error("{0}")]
    Domain(DomainError),
}

impl CloseCropCycleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CloseCropCycleError::NotConfirmed => ErrorCategory::Validation,
            CloseCropCycleError::CycleNotFound(_) => ErrorCategory::NotFound,
            CloseCropCycleError::AlreadyClosed(_) => ErrorCategory::Conflict,
            CloseCropCycleError::Domain(err) => err.category(),
        }
    }
}

impl From<DomainError> for CloseCropCycleError {
    fn from(err: DomainError) -> Self {
        CloseCropCycleError::Domain(err)
    }
}

/// Handler for closing crop cycles.
pub struct CloseCropCycleHandler {
    cycles: Arc<dyn CropCycleRepository>,
    capabilities: BackendCapabilities,
}

impl CloseCropCycleHandler {
    pub fn new(cycles: Arc<dyn CropCycleRepository>, capabilities: BackendCapabilities) -> Self {
        Self {
            cycles,
            capabilities,
        }
    }

    pub async fn handle(
        &self,
        cmd: CloseCropCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<CropCycle, CloseCropCycleError> {
        if !cmd.user_confirmation {
            return Err(CloseCropCycleError::NotConfirmed);
        }
        if !self.capabilities.supports_mutation {
            return Err(DomainError::unsupported("close_cycle").into());
        }

        let mut cycle = self
            .cycles
            .find_by_id(&cmd.cycle_id)
            .await?
            .ok_or(CloseCropCycleError::CycleNotFound(cmd.cycle_id))?;

        cycle
            .close(cmd.actual_harvest_date)
            .map_err(|err| self.map_close_error(cmd.cycle_id, err))?;

        if let Err(err) = self.cycles.close_active(&cycle).await {
            tracing::warn!(
                operation = "close_cycle",
                cycle_id = %cmd.cycle_id,
                bloc_id = %cycle.bloc_id(),
                correlation_id = %metadata.correlation_id(),
                code = %err.code,
                "Crop cycle close rejected at commit"
            );
            return Err(self.map_close_error(cmd.cycle_id, err));
        }

        for event in cycle.take_events() {
            tracing::info!(
                event = event.event_type(),
                cycle_id = %cycle.id(),
                bloc_id = %cycle.bloc_id(),
                actual_harvest_date = %cmd.actual_harvest_date,
                correlation_id = %metadata.correlation_id(),
                "Crop cycle closed"
            );
        }

        Ok(cycle)
    }

    fn map_close_error(&self, cycle_id: CropCycleId, err: DomainError) -> CloseCropCycleError {
        match err.code {
            ErrorCode::CycleAlreadyClosed => CloseCropCycleError::AlreadyClosed(cycle_id),
            ErrorCode::CycleNotFound => CloseCropCycleError::CycleNotFound(cycle_id),
            _ => CloseCropCycleError::Domain(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCropCycleRepository;
    use crate::domain::crop_cycle::{CropCycleStatus, CycleType, NewCropCycle};
    use crate::domain::foundation::{BlocId, VarietyId};
    use async_trait::async_trait;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn active_cycle() -> CropCycle {
        CropCycle::create(NewCropCycle {
            bloc_id: BlocId::new("F1").unwrap(),
            cycle_type: CycleType::Plantation,
            variety_id: VarietyId::new("r-579").unwrap(),
            planting_date: Some(date("2024-12-03")),
            expected_harvest_date: date("2025-12-03"),
            expected_yield_tons_per_ha: 85.0,
            cycle_number: 1,
            parent_cycle_id: None,
            regrowth_start_date: None,
            intercrop_variety_id: None,
        })
        .unwrap()
    }

    fn close(cycle_id: CropCycleId, on: &str) -> CloseCropCycleCommand {
        CloseCropCycleCommand {
            cycle_id,
            actual_harvest_date: date(on),
            user_confirmation: true,
        }
    }

    async fn setup(capabilities: BackendCapabilities) -> (CloseCropCycleHandler, CropCycle) {
        let repo = Arc::new(InMemoryCropCycleRepository::new(capabilities));
        let cycle = active_cycle();
        repo.preload([cycle.clone()]).await;
        (CloseCropCycleHandler::new(repo, capabilities), cycle)
    }

    /// Simulates another request closing the cycle between read and commit.
    struct RacingRepository {
        inner: InMemoryCropCycleRepository,
    }

    #[async_trait]
    impl CropCycleRepository for RacingRepository {
        async fn insert_active(&self, cycle: &CropCycle) -> Result<(), DomainError> {
            self.inner.insert_active(cycle).await
        }

        async fn close_active(&self, _cycle: &CropCycle) -> Result<(), DomainError> {
            Err(DomainError::new(
                ErrorCode::CycleAlreadyClosed,
                "Crop cycle is already closed",
            ))
        }

        async fn find_by_id(&self, id: &CropCycleId) -> Result<Option<CropCycle>, DomainError> {
            self.inner.find_by_id(id).await
        }

        async fn find_active_by_bloc(
            &self,
            bloc_id: &BlocId,
        ) -> Result<Option<CropCycle>, DomainError> {
            self.inner.find_active_by_bloc(bloc_id).await
        }

        async fn find_history_by_bloc(
            &self,
            bloc_id: &BlocId,
        ) -> Result<Vec<CropCycle>, DomainError> {
            self.inner.find_history_by_bloc(bloc_id).await
        }
    }

    #[tokio::test]
    async fn closes_active_cycle() {
        let (handler, cycle) = setup(BackendCapabilities::full()).await;
        let closed = handler
            .handle(close(cycle.id(), "2025-12-03"), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(closed.status(), CropCycleStatus::Closed);
        assert_eq!(closed.actual_harvest_date(), Some(date("2025-12-03")));
    }

    #[tokio::test]
    async fn closing_closed_cycle_fails() {
        let (handler, cycle) = setup(BackendCapabilities::full()).await;
        handler
            .handle(close(cycle.id(), "2025-12-03"), CommandMetadata::test_fixture())
            .await
            .unwrap();

        let err = handler
            .handle(close(cycle.id(), "2025-12-04"), CommandMetadata::test_fixture())
            .await
            .unwrap_err();
        assert!(matches!(err, CloseCropCycleError::AlreadyClosed(_)));
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }

    #[tokio::test]
    async fn missing_confirmation_is_validation_error() {
        let (handler, cycle) = setup(BackendCapabilities::full()).await;
        let cmd = CloseCropCycleCommand {
            user_confirmation: false,
            ..close(cycle.id(), "2025-12-03")
        };
        let err = handler
            .handle(cmd, CommandMetadata::test_fixture())
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn harvest_before_planting_is_validation_error() {
        let (handler, cycle) = setup(BackendCapabilities::full()).await;
        let err = handler
            .handle(close(cycle.id(), "2020-01-01"), CommandMetadata::test_fixture())
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn read_only_backend_is_unsupported() {
        let (handler, cycle) = setup(BackendCapabilities::read_only_demo()).await;
        let err = handler
            .handle(close(cycle.id(), "2025-12-03"), CommandMetadata::test_fixture())
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unsupported);
    }

    #[tokio::test]
    async fn unknown_cycle_is_not_found() {
        let (handler, _) = setup(BackendCapabilities::full()).await;
        let err = handler
            .handle(close(CropCycleId::new(), "2025-12-03"), CommandMetadata::test_fixture())
            .await
            .unwrap_err();
        assert!(matches!(err, CloseCropCycleError::CycleNotFound(_)));
    }

    #[tokio::test]
    async fn lost_race_at_commit_is_conflict() {
        let inner = InMemoryCropCycleRepository::default();
        let cycle = active_cycle();
        inner.preload([cycle.clone()]).await;
        let handler = CloseCropCycleHandler::new(
            Arc::new(RacingRepository { inner }),
            BackendCapabilities::full(),
        );

        let err = handler
            .handle(close(cycle.id(), "2025-12-03"), CommandMetadata::test_fixture())
            .await
            .unwrap_err();
        assert!(matches!(err, CloseCropCycleError::AlreadyClosed(_)));
    }
}
