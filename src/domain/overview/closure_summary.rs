//! Closing figures for a crop cycle: duration, spend and activity completion.

use serde::Serialize;

use crate::domain::crop_cycle::CropCycle;
use crate::domain::foundation::Progress;
use crate::domain::work_plan::{ProductApplicationStatus, WorkPlan};

use super::aggregator::{stable_sum, WorkBreakdown};

/// Spend on the cycle, split by cost kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub estimated_product: f64,
    pub estimated_resource: f64,
    pub actual_product: f64,
    pub actual_resource: f64,
    /// Actual cost where recorded, the estimate otherwise.
    pub total: f64,
    /// `None` when the bloc area is unknown or zero.
    pub per_hectare: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub total: usize,
    pub completed: usize,
    pub completion_rate: Progress,
}

/// Summary attached to a full closure validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosureSummary {
    /// Growth start to actual harvest, or to expected harvest while active.
    pub duration_days: Option<i64>,
    pub bloc_area_hectares: Option<f64>,
    pub costs: CostBreakdown,
    pub activities: ActivitySummary,
}

/// Builds the closing summary from an already aggregated plan.
///
/// Malformed products are left out of the totals, as in the breakdown.
pub fn summarize_closure(
    cycle: &CropCycle,
    plan: &WorkPlan,
    breakdown: &WorkBreakdown,
    bloc_area_hectares: Option<f64>,
) -> ClosureSummary {
    let end = cycle
        .actual_harvest_date()
        .unwrap_or_else(|| cycle.expected_harvest_date());
    let duration_days = cycle
        .growth_start_date()
        .map(|start| (end - start).num_days());

    let effective: Vec<f64> = plan
        .products()
        .iter()
        .filter(|p| p.malformation().is_none())
        .map(|p| {
            p.act_product_cost.or(p.est_product_cost).unwrap_or(0.0)
                + p.act_resource_cost.or(p.est_resource_cost).unwrap_or(0.0)
        })
        .collect();
    let total = stable_sum(effective);
    let per_hectare = bloc_area_hectares
        .filter(|area| area.is_finite() && *area > 0.0)
        .map(|area| total / area);

    let totals = &breakdown.totals;
    let costs = CostBreakdown {
        estimated_product: totals.total_est_product_cost,
        estimated_resource: totals.total_est_resource_cost,
        actual_product: totals.total_act_product_cost,
        actual_resource: totals.total_act_resource_cost,
        total,
        per_hectare,
    };

    let activity_total = plan.products().len();
    let completed = plan
        .products()
        .iter()
        .filter(|p| p.status == ProductApplicationStatus::Completed)
        .count();

    ClosureSummary {
        duration_days,
        bloc_area_hectares,
        costs,
        activities: ActivitySummary {
            total: activity_total,
            completed,
            completion_rate: Progress::ratio(completed, activity_total),
        },
    }
}
