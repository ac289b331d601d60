//! GetBlocOverviewHandler - Assembles the bloc overview read model.
//!
//! Combines the bloc, its current cycle (active, else most recent) and the
//! cycle's work plan rollups. Partial data degrades to warnings; only an
//! unknown bloc is an error.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::crop_cycle::CropCycle;
use crate::domain::foundation::{BlocId, DomainError, ErrorCategory, Timestamp};
use crate::domain::overview::{aggregate, BlocOverview, CycleSummary};
use crate::domain::work_plan::WorkPlan;
use crate::ports::{BlocReader, CatalogProvider, CropCycleRepository, WorkPlanReader};

#[derive(Debug, Clone)]
pub struct GetBlocOverviewQuery {
    pub bloc_id: BlocId,
    /// Reference day for growth stage. Defaults to today (UTC).
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetBlocOverviewError {
    #[error("Bloc not found: {0}")]
    BlocNotFound(BlocId),

    #[error("{0}")]
    Domain(#[from] DomainError),
}

impl GetBlocOverviewError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GetBlocOverviewError::BlocNotFound(_) => ErrorCategory::NotFound,
            GetBlocOverviewError::Domain(err) => err.category(),
        }
    }
}

pub struct GetBlocOverviewHandler {
    blocs: Arc<dyn BlocReader>,
    cycles: Arc<dyn CropCycleRepository>,
    work_plans: Arc<dyn WorkPlanReader>,
    catalog: Arc<dyn CatalogProvider>,
}

impl GetBlocOverviewHandler {
    pub fn new(
        blocs: Arc<dyn BlocReader>,
        cycles: Arc<dyn CropCycleRepository>,
        work_plans: Arc<dyn WorkPlanReader>,
        catalog: Arc<dyn CatalogProvider>,
    ) -> Self {
        Self {
            blocs,
            cycles,
            work_plans,
            catalog,
        }
    }

    pub async fn handle(
        &self,
        query: GetBlocOverviewQuery,
    ) -> Result<BlocOverview, GetBlocOverviewError> {
        let bloc = self
            .blocs
            .find_by_id(&query.bloc_id)
            .await?
            .ok_or_else(|| GetBlocOverviewError::BlocNotFound(query.bloc_id.clone()))?;

        let Some(cycle) = self.current_cycle(&query.bloc_id).await? else {
            return Ok(BlocOverview::bare(&bloc));
        };

        let today = query.as_of.unwrap_or_else(|| Timestamp::now().date());
        let variety_name = self.variety_name(&cycle).await;
        let summary = CycleSummary::from_cycle(&cycle, variety_name, today);

        let mut load_warning = None;
        let plan = match self.work_plans.load_for_cycle(&cycle.id()).await {
            Ok(plan) => plan,
            Err(err) => {
                tracing::warn!(
                    operation = "get_bloc_overview",
                    bloc_id = %query.bloc_id,
                    cycle_id = %cycle.id(),
                    code = %err.code,
                    "Work plan unreadable; overview totals left at zero"
                );
                load_warning = Some("Work plan is unavailable; totals are incomplete".to_string());
                WorkPlan::empty()
            }
        };

        let breakdown = aggregate(&plan);
        for warning in &breakdown.warnings {
            tracing::debug!(
                bloc_id = %query.bloc_id,
                cycle_id = %cycle.id(),
                %warning,
                "Aggregation warning"
            );
        }

        let mut overview = BlocOverview::assemble(&bloc, summary, &plan, breakdown);
        overview.warnings.extend(load_warning);
        Ok(overview)
    }

    /// Active cycle, else the most recent one in history.
    async fn current_cycle(&self, bloc_id: &BlocId) -> Result<Option<CropCycle>, DomainError> {
        if let Some(active) = self.cycles.find_active_by_bloc(bloc_id).await? {
            return Ok(Some(active));
        }
        Ok(self
            .cycles
            .find_history_by_bloc(bloc_id)
            .await?
            .into_iter()
            .next())
    }

    async fn variety_name(&self, cycle: &CropCycle) -> Option<String> {
        match self.catalog.find_variety(cycle.variety_id()).await {
            Ok(variety) => variety.map(|v| v.name),
            Err(err) => {
                tracing::warn!(
                    variety_id = %cycle.variety_id(),
                    code = %err.code,
                    "Catalog lookup failed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::StaticCatalog;
    use crate::adapters::memory::{
        InMemoryBlocStore, InMemoryCropCycleRepository, InMemoryWorkPlanStore,
    };
    use crate::domain::bloc::{Bloc, BlocStatus};
    use crate::domain::crop_cycle::{CropCycleStatus, CycleType, GrowthStage, NewCropCycle};
    use crate::domain::foundation::{CropCycleId, ErrorCode, VarietyId};
    use crate::domain::work_plan::{ProductApplication, WorkPackage, WorkPackageStatus};
    use async_trait::async_trait;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn cycle_on(bloc: &str, number: u32) -> CropCycle {
        CropCycle::create(NewCropCycle {
            bloc_id: BlocId::new(bloc).unwrap(),
            cycle_type: CycleType::Plantation,
            variety_id: VarietyId::new("r-579").unwrap(),
            planting_date: Some(date("2025-01-01")),
            expected_harvest_date: date("2026-01-01"),
            expected_yield_tons_per_ha: 85.0,
            cycle_number: number,
            parent_cycle_id: None,
            regrowth_start_date: None,
            intercrop_variety_id: None,
        })
        .unwrap()
    }

    struct Fixture {
        blocs: Arc<InMemoryBlocStore>,
        cycles: Arc<InMemoryCropCycleRepository>,
        plans: Arc<InMemoryWorkPlanStore>,
    }

    impl Fixture {
        async fn new() -> Self {
            let blocs = Arc::new(InMemoryBlocStore::new());
            blocs
                .insert(
                    Bloc::new(BlocId::new("F1").unwrap(), "North 1", 10.0, BlocStatus::Active)
                        .unwrap(),
                )
                .await;
            Self {
                blocs,
                cycles: Arc::new(InMemoryCropCycleRepository::default()),
                plans: Arc::new(InMemoryWorkPlanStore::new()),
            }
        }

        fn handler(&self) -> GetBlocOverviewHandler {
            self.handler_with_plans(self.plans.clone())
        }

        fn handler_with_plans(&self, plans: Arc<dyn WorkPlanReader>) -> GetBlocOverviewHandler {
            GetBlocOverviewHandler::new(
                self.blocs.clone(),
                self.cycles.clone(),
                plans,
                Arc::new(StaticCatalog::embedded().unwrap()),
            )
        }
    }

    fn query(bloc: &str) -> GetBlocOverviewQuery {
        GetBlocOverviewQuery {
            bloc_id: BlocId::new(bloc).unwrap(),
            as_of: Some(date("2025-03-01")),
        }
    }

    struct UnreadableWorkPlans;

    #[async_trait]
    impl WorkPlanReader for UnreadableWorkPlans {
        async fn load_for_cycle(
            &self,
            _cycle_id: &CropCycleId,
        ) -> Result<WorkPlan, DomainError> {
            Err(DomainError::new(ErrorCode::Unavailable, "Simulated outage"))
        }
    }

    #[tokio::test]
    async fn bloc_without_cycle_gets_minimal_overview() {
        let fx = Fixture::new().await;
        let overview = fx.handler().handle(query("F1")).await.unwrap();

        assert_eq!(overview.name, "North 1");
        assert!(overview.cycle.is_none());
        assert_eq!(overview.totals.total_est_product_cost, 0.0);
        assert_eq!(overview.totals.progress.value(), 0.0);
        assert!(overview.products.is_empty());
    }

    #[tokio::test]
    async fn active_cycle_overview_rolls_up_work_plan() {
        let fx = Fixture::new().await;
        let cycle = cycle_on("F1", 1);
        fx.cycles.insert_active(&cycle).await.unwrap();

        let mut urea = ProductApplication::planned(cycle.id(), "Urea");
        urea.est_product_cost = Some(1200.0);
        urea.act_product_cost = Some(1100.0);
        let mut potash = ProductApplication::planned(cycle.id(), "Potash");
        potash.est_product_cost = Some(800.0);
        potash.reported_progress = Some(0.5);
        let mut done = WorkPackage::scheduled(urea.id, Some(date("2025-02-01")));
        done.status = WorkPackageStatus::Complete;
        let pending = WorkPackage::scheduled(urea.id, Some(date("2025-02-10")));
        fx.plans
            .put_plan(cycle.id(), vec![urea, potash], vec![done, pending])
            .await;

        let overview = fx.handler().handle(query("F1")).await.unwrap();

        let summary = overview.cycle.unwrap();
        assert_eq!(summary.cycle_id, cycle.id());
        assert_eq!(summary.growth_stage, Some(GrowthStage::Tillering));
        assert_eq!(summary.variety_name.as_deref(), Some("R 579"));
        assert_eq!(overview.totals.total_est_product_cost, 2000.0);
        assert_eq!(overview.totals.total_act_product_cost, 1100.0);
        assert_eq!(overview.totals.progress.value(), 0.5);
        assert_eq!(overview.products.len(), 2);
    }

    #[tokio::test]
    async fn falls_back_to_most_recent_closed_cycle() {
        let fx = Fixture::new().await;
        let mut old = cycle_on("F1", 1);
        old.close(date("2025-12-20")).unwrap();
        fx.cycles.preload([old.clone()]).await;

        let overview = fx.handler().handle(query("F1")).await.unwrap();
        let summary = overview.cycle.unwrap();
        assert_eq!(summary.cycle_id, old.id());
        assert_eq!(summary.status, CropCycleStatus::Closed);
    }

    #[tokio::test]
    async fn unknown_bloc_is_not_found() {
        let fx = Fixture::new().await;
        let err = fx.handler().handle(query("F404")).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[tokio::test]
    async fn unreadable_work_plan_yields_warning_not_error() {
        let fx = Fixture::new().await;
        fx.cycles.insert_active(&cycle_on("F1", 1)).await.unwrap();

        let overview = fx
            .handler_with_plans(Arc::new(UnreadableWorkPlans))
            .handle(query("F1"))
            .await
            .unwrap();
        assert!(overview.cycle.is_some());
        assert_eq!(overview.warnings.len(), 1);
    }
}
