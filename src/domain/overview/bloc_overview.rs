//! Bloc overview read model: a bloc, its current cycle and that cycle's work plan.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::bloc::{Bloc, BlocStatus};
use crate::domain::crop_cycle::{CropCycle, CropCycleStatus, CycleType, GrowthStage};
use crate::domain::foundation::{BlocId, CropCycleId, VarietyId};
use crate::domain::work_plan::{ProductApplication, WorkPackage, WorkPlan};

use super::{ProductRollup, WorkBreakdown, WorkBreakdownTotals};

/// Aggregated read model of a bloc, its current cycle and the cycle's work plan.
/// Recomputed on every read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocOverview {
    pub bloc_id: BlocId,
    pub name: String,
    pub area_hectares: f64,
    pub bloc_status: BlocStatus,

    /// Active cycle, else the most recent closed one
    pub cycle: Option<CycleSummary>,

    #[serde(flatten)]
    pub totals: WorkBreakdownTotals,

    pub products: Vec<ProductOverview>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSummary {
    pub cycle_id: CropCycleId,
    pub cycle_number: u32,
    pub cycle_type: CycleType,
    pub status: CropCycleStatus,
    pub variety_id: VarietyId,
    pub variety_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intercrop_variety_id: Option<VarietyId>,
    pub planting_date: Option<NaiveDate>,
    pub expected_harvest_date: NaiveDate,
    pub expected_yield_tons_per_ha: f64,
    pub actual_harvest_date: Option<NaiveDate>,
    pub days_since_planting: Option<i64>,
    pub growth_stage: Option<GrowthStage>,
}

impl CycleSummary {
    pub fn from_cycle(cycle: &CropCycle, variety_name: Option<String>, today: NaiveDate) -> Self {
        Self {
            cycle_id: cycle.id(),
            cycle_number: cycle.cycle_number(),
            cycle_type: cycle.cycle_type(),
            status: cycle.status(),
            variety_id: cycle.variety_id().clone(),
            variety_name,
            intercrop_variety_id: cycle.intercrop_variety_id().cloned(),
            planting_date: cycle.planting_date(),
            expected_harvest_date: cycle.expected_harvest_date(),
            expected_yield_tons_per_ha: cycle.expected_yield_tons_per_ha(),
            actual_harvest_date: cycle.actual_harvest_date(),
            days_since_planting: cycle.days_since_planting(today),
            growth_stage: cycle.growth_stage(today),
        }
    }
}

/// A product application with its rollup and its work packages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOverview {
    #[serde(flatten)]
    pub product: ProductApplication,
    pub rollup: ProductRollup,
    pub work_packages: Vec<WorkPackage>,
}

impl BlocOverview {
    /// Overview of a bloc with no cycle: field data and zeroed aggregates.
    pub fn bare(bloc: &Bloc) -> Self {
        Self {
            bloc_id: bloc.id().clone(),
            name: bloc.name().to_string(),
            area_hectares: bloc.area_hectares(),
            bloc_status: bloc.status(),
            cycle: None,
            totals: WorkBreakdownTotals::default(),
            products: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Full overview from a cycle summary, its plan and the plan's breakdown.
    pub fn assemble(
        bloc: &Bloc,
        cycle: CycleSummary,
        plan: &WorkPlan,
        breakdown: WorkBreakdown,
    ) -> Self {
        let products = plan
            .products()
            .iter()
            .zip(breakdown.products)
            .map(|(product, rollup)| ProductOverview {
                product: product.clone(),
                rollup,
                work_packages: plan.packages_of(&product.id).cloned().collect(),
            })
            .collect();

        Self {
            cycle: Some(cycle),
            totals: breakdown.totals,
            products,
            warnings: breakdown.warnings,
            ..Self::bare(bloc)
        }
    }
}
