//! Work breakdown rollups over a cycle's work plan.
//!
//! Pure functions: the plan is only read. Absent figures count as zero in
//! sums. A malformed product contributes nothing and yields a warning
//! instead of failing the rollup.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{ProductApplicationId, Progress};
use crate::domain::work_plan::{ProductApplication, WorkPlan};

/// Tolerance for comparing treated area to planned area.
const AREA_EPSILON: f64 = 1e-9;

/// Rollup of one product application and its work packages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRollup {
    pub product_id: ProductApplicationId,
    pub progress: Progress,
    pub package_count: usize,
    pub completed_package_count: usize,
    pub treated_area_hectares: f64,
    pub first_execution_date: Option<NaiveDate>,
    pub last_execution_date: Option<NaiveDate>,
    /// Treated area exceeds the planned area. Reported, never rejected.
    pub area_overrun: bool,
    pub malformed: bool,
}

/// Cost and progress totals over every product of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkBreakdownTotals {
    pub total_est_product_cost: f64,
    pub total_est_resource_cost: f64,
    pub total_act_product_cost: f64,
    pub total_act_resource_cost: f64,
    pub progress: Progress,
}

/// Result of aggregating a plan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkBreakdown {
    pub totals: WorkBreakdownTotals,
    /// One rollup per product, in plan order.
    pub products: Vec<ProductRollup>,
    pub warnings: Vec<String>,
}

impl WorkBreakdown {
    pub fn rollup_for(&self, id: &ProductApplicationId) -> Option<&ProductRollup> {
        self.products.iter().find(|r| &r.product_id == id)
    }
}

/// Rolls a single product up from its work packages.
///
/// With packages, progress is the share of complete ones; without, the
/// reported progress stands (absent means zero).
pub fn rollup_product(plan: &WorkPlan, product: &ProductApplication) -> ProductRollup {
    let mut package_count = 0usize;
    let mut completed = 0usize;
    let mut areas = Vec::new();
    let mut first: Option<NaiveDate> = None;
    let mut last: Option<NaiveDate> = None;

    for wp in plan.packages_of(&product.id) {
        package_count += 1;
        if wp.status.is_complete() {
            completed += 1;
        }
        if let Some(area) = wp.valid_area() {
            areas.push(area);
        }
        if let Some(d) = wp.execution_date {
            first = Some(first.map_or(d, |f| f.min(d)));
            last = Some(last.map_or(d, |l| l.max(d)));
        }
    }

    let treated = stable_sum(areas);
    let malformed = product.malformation().is_some();

    let progress = if malformed {
        Progress::ZERO
    } else if package_count > 0 {
        Progress::ratio(completed, package_count)
    } else {
        Progress::clamped(product.reported_progress.unwrap_or(0.0))
    };

    let area_overrun = product
        .planned_area_hectares
        .filter(|planned| planned.is_finite())
        .map(|planned| treated > planned + AREA_EPSILON)
        .unwrap_or(false);

    ProductRollup {
        product_id: product.id,
        progress,
        package_count,
        completed_package_count: completed,
        treated_area_hectares: treated,
        first_execution_date: first,
        last_execution_date: last,
        area_overrun,
        malformed,
    }
}

/// Aggregates the whole plan.
pub fn aggregate(plan: &WorkPlan) -> WorkBreakdown {
    let mut warnings = Vec::new();
    let mut rollups = Vec::with_capacity(plan.products().len());

    let mut est_product = Vec::new();
    let mut est_resource = Vec::new();
    let mut act_product = Vec::new();
    let mut act_resource = Vec::new();
    let mut progresses = Vec::new();

    for product in plan.products() {
        let rollup = rollup_product(plan, product);

        if let Some(reason) = product.malformation() {
            warnings.push(format!(
                "Product application '{}' ({}) ignored in totals: {}",
                product.product_name, product.id, reason
            ));
        } else {
            est_product.push(product.est_product_cost.unwrap_or(0.0));
            est_resource.push(product.est_resource_cost.unwrap_or(0.0));
            act_product.push(product.act_product_cost.unwrap_or(0.0));
            act_resource.push(product.act_resource_cost.unwrap_or(0.0));
        }

        if rollup.area_overrun {
            warnings.push(format!(
                "Product application '{}' treated {:.2} ha, above the planned {:.2} ha",
                product.product_name,
                rollup.treated_area_hectares,
                product.planned_area_hectares.unwrap_or(0.0)
            ));
        }

        progresses.push(rollup.progress.value());
        rollups.push(rollup);
    }

    let orphans = plan.orphan_packages().count();
    if orphans > 0 {
        warnings.push(format!(
            "{} work package(s) reference an unknown product application",
            orphans
        ));
    }

    let progress = if progresses.is_empty() {
        Progress::ZERO
    } else {
        let n = progresses.len() as f64;
        Progress::clamped(stable_sum(progresses) / n)
    };

    WorkBreakdown {
        totals: WorkBreakdownTotals {
            total_est_product_cost: stable_sum(est_product),
            total_est_resource_cost: stable_sum(est_resource),
            total_act_product_cost: stable_sum(act_product),
            total_act_resource_cost: stable_sum(act_resource),
            progress,
        },
        products: rollups,
        warnings,
    }
}

/// Sums in a canonical order so the result does not depend on input order.
pub(super) fn stable_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    values.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CropCycleId;
    use crate::domain::work_plan::{WorkPackage, WorkPackageStatus};
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn costed(cycle_id: CropCycleId, name: &str, est: f64, act: f64) -> ProductApplication {
        let mut p = ProductApplication::planned(cycle_id, name);
        p.est_product_cost = Some(est);
        p.est_resource_cost = Some(est / 2.0);
        p.act_product_cost = Some(act);
        p.act_resource_cost = Some(act / 2.0);
        p
    }

    fn package(product: &ProductApplication, area: f64, status: WorkPackageStatus) -> WorkPackage {
        let mut wp = WorkPackage::scheduled(product.id, None);
        wp.area_hectares = Some(area);
        wp.status = status;
        wp
    }

    #[test]
    fn empty_plan_yields_zero_totals() {
        let breakdown = aggregate(&WorkPlan::empty());
        assert_eq!(breakdown.totals, WorkBreakdownTotals::default());
        assert!(breakdown.products.is_empty());
        assert!(breakdown.warnings.is_empty());
    }

    #[test]
    fn package_completion_overrides_reported_progress() {
        let cycle_id = CropCycleId::new();
        let mut product = ProductApplication::planned(cycle_id, "Urea");
        product.reported_progress = Some(0.9);
        let packages = vec![
            package(&product, 1.0, WorkPackageStatus::Complete),
            package(&product, 1.0, WorkPackageStatus::InProgress),
            package(&product, 1.0, WorkPackageStatus::NotStarted),
            package(&product, 1.0, WorkPackageStatus::Complete),
        ];
        let plan = WorkPlan::new(cycle_id, vec![product.clone()], packages);

        let rollup = rollup_product(&plan, &product);
        assert_eq!(rollup.progress.value(), 0.5);
        assert_eq!(rollup.completed_package_count, 2);
        assert_eq!(rollup.treated_area_hectares, 4.0);
    }

    #[test]
    fn reported_progress_stands_without_packages() {
        let cycle_id = CropCycleId::new();
        let mut product = ProductApplication::planned(cycle_id, "Urea");
        product.reported_progress = Some(0.3);
        let plan = WorkPlan::new(cycle_id, vec![product.clone()], vec![]);

        assert_eq!(rollup_product(&plan, &product).progress.value(), 0.3);
    }

    #[test]
    fn overall_progress_is_unweighted_mean() {
        let cycle_id = CropCycleId::new();
        let mut a = ProductApplication::planned(cycle_id, "A");
        a.reported_progress = Some(1.0);
        let b = ProductApplication::planned(cycle_id, "B");
        let plan = WorkPlan::new(cycle_id, vec![a, b], vec![]);

        assert_eq!(aggregate(&plan).totals.progress.value(), 0.5);
    }

    #[test]
    fn missing_costs_count_as_zero_and_stay_absent() {
        let cycle_id = CropCycleId::new();
        let priced = costed(cycle_id, "Urea", 100.0, 80.0);
        let unpriced = ProductApplication::planned(cycle_id, "Potash");
        let plan = WorkPlan::new(cycle_id, vec![priced, unpriced], vec![]);

        let breakdown = aggregate(&plan);
        assert_eq!(breakdown.totals.total_est_product_cost, 100.0);
        assert_eq!(breakdown.totals.total_act_resource_cost, 40.0);
        let potash = plan
            .products()
            .iter()
            .find(|p| p.product_name == "Potash")
            .unwrap();
        assert!(potash.est_product_cost.is_none());
    }

    #[test]
    fn malformed_product_contributes_zero_with_warning() {
        let cycle_id = CropCycleId::new();
        let good = costed(cycle_id, "Urea", 100.0, 80.0);
        let mut bad = costed(cycle_id, "Broken", 50.0, 10.0);
        bad.est_resource_cost = Some(-7.0);
        bad.reported_progress = Some(1.0);
        let plan = WorkPlan::new(cycle_id, vec![good, bad.clone()], vec![]);

        let breakdown = aggregate(&plan);
        assert_eq!(breakdown.totals.total_est_product_cost, 100.0);
        assert_eq!(breakdown.warnings.len(), 1);
        assert!(breakdown.warnings[0].contains("Broken"));
        assert!(breakdown.rollup_for(&bad.id).unwrap().malformed);
        assert_eq!(breakdown.totals.progress.value(), 0.0);
    }

    #[test]
    fn area_overrun_is_flagged_not_rejected() {
        let cycle_id = CropCycleId::new();
        let mut product = ProductApplication::planned(cycle_id, "Urea");
        product.planned_area_hectares = Some(5.0);
        let packages = vec![
            package(&product, 3.0, WorkPackageStatus::Complete),
            package(&product, 2.5, WorkPackageStatus::Complete),
        ];
        let plan = WorkPlan::new(cycle_id, vec![product.clone()], packages);

        let breakdown = aggregate(&plan);
        let rollup = breakdown.rollup_for(&product.id).unwrap();
        assert!(rollup.area_overrun);
        assert_eq!(rollup.progress, Progress::COMPLETE);
        assert!(breakdown.warnings[0].contains("above the planned"));
    }

    #[test]
    fn execution_date_range_spans_packages() {
        let cycle_id = CropCycleId::new();
        let product = ProductApplication::planned(cycle_id, "Urea");
        let packages = vec![
            WorkPackage::scheduled(product.id, Some(date("2025-04-01"))),
            WorkPackage::scheduled(product.id, None),
            WorkPackage::scheduled(product.id, Some(date("2025-02-15"))),
        ];
        let plan = WorkPlan::new(cycle_id, vec![product.clone()], packages);

        let rollup = rollup_product(&plan, &product);
        assert_eq!(rollup.first_execution_date, Some(date("2025-02-15")));
        assert_eq!(rollup.last_execution_date, Some(date("2025-04-01")));
    }

    #[test]
    fn orphan_packages_are_reported() {
        let cycle_id = CropCycleId::new();
        let stray = WorkPackage::scheduled(ProductApplicationId::new(), None);
        let plan = WorkPlan::new(cycle_id, vec![], vec![stray]);

        let breakdown = aggregate(&plan);
        assert_eq!(breakdown.warnings.len(), 1);
        assert_eq!(breakdown.totals.progress, Progress::ZERO);
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        #[test]
        fn totals_ignore_product_order(
            costs in proptest::collection::vec((0.0f64..1e6, 0.0f64..1e6), 0..20),
            seed in any::<u64>(),
        ) {
            let cycle_id = CropCycleId::new();
            let products: Vec<_> = costs
                .iter()
                .enumerate()
                .map(|(i, (est, act))| costed(cycle_id, &format!("P{}", i), *est, *act))
                .collect();

            let mut shuffled = products.clone();
            if !shuffled.is_empty() {
                let len = shuffled.len();
                shuffled.rotate_left((seed as usize) % len);
                shuffled.reverse();
            }

            let a = aggregate(&WorkPlan::new(cycle_id, products, vec![]));
            let b = aggregate(&WorkPlan::new(cycle_id, shuffled, vec![]));
            prop_assert_eq!(a.totals, b.totals);
        }

        #[test]
        fn overall_progress_stays_in_bounds(
            reported in proptest::collection::vec(proptest::option::of(-1.0f64..2.0), 0..20),
        ) {
            let cycle_id = CropCycleId::new();
            let products: Vec<_> = reported
                .iter()
                .map(|r| {
                    let mut p = ProductApplication::planned(cycle_id, "P");
                    p.reported_progress = *r;
                    p
                })
                .collect();

            let value = aggregate(&WorkPlan::new(cycle_id, products, vec![]))
                .totals
                .progress
                .value();
            prop_assert!((0.0..=1.0).contains(&value));
        }
    }
}
