//! Demo data for the in-memory backend.
//!
//! Dates are laid out relative to the seeding day so growth stages and
//! progress look plausible whenever the demo starts.

use chrono::{Duration, NaiveDate};

use crate::domain::bloc::{Bloc, BlocStatus};
use crate::domain::crop_cycle::{CropCycle, CycleType, NewCropCycle};
use crate::domain::foundation::{BlocId, DomainError, MethodId, VarietyId};
use crate::domain::work_plan::{
    ProductApplication, ProductApplicationStatus, WorkPackage, WorkPackageStatus,
};

use super::{InMemoryBlocStore, InMemoryCropCycleRepository, InMemoryWorkPlanStore};

/// What the seed loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    pub blocs: usize,
    pub cycles: usize,
    pub product_applications: usize,
}

/// Loads demo blocs, cycles and work plans unless the stores already hold data.
pub async fn seed_demo_data(
    blocs: &InMemoryBlocStore,
    cycles: &InMemoryCropCycleRepository,
    plans: &InMemoryWorkPlanStore,
    today: NaiveDate,
) -> Result<SeedSummary, DomainError> {
    if !blocs.is_empty().await || !cycles.is_empty().await {
        return Ok(SeedSummary::default());
    }

    let north = Bloc::new(bloc_id("B-101")?, "North Terrace", 12.5, BlocStatus::Active)?;
    let river = Bloc::new(bloc_id("B-102")?, "River Flats", 8.0, BlocStatus::Active)?;
    let hill = Bloc::new(bloc_id("B-103")?, "Hillside", 5.3, BlocStatus::Active)?;

    let north_planting = today - Duration::days(150);
    let north_cycle = CropCycle::create(NewCropCycle {
        bloc_id: north.id().clone(),
        cycle_type: CycleType::Plantation,
        variety_id: VarietyId::new("m-1176-77")?,
        intercrop_variety_id: Some(VarietyId::new("potato")?),
        planting_date: Some(north_planting),
        expected_harvest_date: north_planting + Duration::days(365),
        expected_yield_tons_per_ha: 85.0,
        cycle_number: 1,
        parent_cycle_id: None,
        regrowth_start_date: None,
    })?;

    let river_planting = today - Duration::days(480);
    let mut river_first = CropCycle::create(NewCropCycle {
        bloc_id: river.id().clone(),
        cycle_type: CycleType::Plantation,
        variety_id: VarietyId::new("r-579")?,
        planting_date: Some(river_planting),
        expected_harvest_date: river_planting + Duration::days(365),
        expected_yield_tons_per_ha: 90.0,
        cycle_number: 1,
        parent_cycle_id: None,
        regrowth_start_date: None,
        intercrop_variety_id: None,
    })?;
    let river_harvest = river_planting + Duration::days(372);
    river_first.close(river_harvest)?;

    let river_ratoon = CropCycle::create(NewCropCycle {
        bloc_id: river.id().clone(),
        cycle_type: CycleType::Ratoon,
        variety_id: VarietyId::new("r-579")?,
        planting_date: None,
        expected_harvest_date: river_harvest + Duration::days(365),
        expected_yield_tons_per_ha: 78.0,
        cycle_number: 2,
        parent_cycle_id: Some(river_first.id()),
        regrowth_start_date: Some(river_harvest),
        intercrop_variety_id: None,
    })?;

    let north_products = north_plan(&north_cycle, north_planting)?;
    let product_count = north_products.0.len();
    plans
        .put_plan(north_cycle.id(), north_products.0, north_products.1)
        .await;

    let summary = SeedSummary {
        blocs: 3,
        cycles: 3,
        product_applications: product_count,
    };

    for bloc in [north, river, hill] {
        blocs.insert(bloc).await;
    }
    let mut seeded = [north_cycle, river_first, river_ratoon];
    for cycle in seeded.iter_mut() {
        cycle.take_events();
    }
    cycles.preload(seeded).await;

    tracing::info!(
        blocs = summary.blocs,
        cycles = summary.cycles,
        product_applications = summary.product_applications,
        "Seeded demo data"
    );

    Ok(summary)
}

fn bloc_id(raw: &str) -> Result<BlocId, DomainError> {
    Ok(BlocId::new(raw)?)
}

fn north_plan(
    cycle: &CropCycle,
    planting: NaiveDate,
) -> Result<(Vec<ProductApplication>, Vec<WorkPackage>), DomainError> {
    let mut basal = ProductApplication::planned(cycle.id(), "13-13-20+2MgO");
    basal.method_id = Some(MethodId::new("mechanical")?);
    basal.days_after_planting = Some(0);
    basal.planned_start_date = Some(planting);
    basal.planned_end_date = Some(planting + Duration::days(7));
    basal.planned_rate = Some(400.0);
    basal.planned_area_hectares = Some(12.5);
    basal.est_product_cost = Some(225_000.0);
    basal.est_resource_cost = Some(30_000.0);
    basal.act_product_cost = Some(231_500.0);
    basal.act_resource_cost = Some(28_750.0);
    basal.status = ProductApplicationStatus::Completed;

    let mut top_dress = ProductApplication::planned(cycle.id(), "Urea");
    top_dress.method_id = Some(MethodId::new("manual")?);
    top_dress.days_after_planting = Some(90);
    top_dress.planned_start_date = Some(planting + Duration::days(90));
    top_dress.planned_end_date = Some(planting + Duration::days(100));
    top_dress.planned_rate = Some(250.0);
    top_dress.planned_area_hectares = Some(12.5);
    top_dress.est_product_cost = Some(95_000.0);
    top_dress.est_resource_cost = Some(18_000.0);
    top_dress.status = ProductApplicationStatus::InProgress;

    let mut herbicide = ProductApplication::planned(cycle.id(), "Atrazine 50 SC");
    herbicide.method_id = Some(MethodId::new("chemical")?);
    herbicide.days_after_planting = Some(200);
    herbicide.planned_start_date = Some(planting + Duration::days(200));
    herbicide.planned_end_date = Some(planting + Duration::days(205));
    herbicide.est_product_cost = Some(40_000.0);
    herbicide.est_resource_cost = Some(6_500.0);

    let mut packages = Vec::new();
    for (offset, area) in [(0, 6.5), (3, 6.0)] {
        let mut wp = WorkPackage::scheduled(basal.id, Some(planting + Duration::days(offset)));
        wp.days_after_planting = Some(offset as i32);
        wp.area_hectares = Some(area);
        wp.rate = Some(400.0);
        wp.quantity = Some(area * 400.0);
        wp.status = WorkPackageStatus::Complete;
        packages.push(wp);
    }
    for (offset, area, status) in [
        (90, 4.0, WorkPackageStatus::Complete),
        (94, 4.5, WorkPackageStatus::InProgress),
        (98, 4.0, WorkPackageStatus::NotStarted),
    ] {
        let mut wp = WorkPackage::scheduled(top_dress.id, Some(planting + Duration::days(offset)));
        wp.days_after_planting = Some(offset as i32);
        wp.area_hectares = Some(area);
        wp.rate = Some(250.0);
        wp.quantity = Some(area * 250.0);
        wp.status = status;
        packages.push(wp);
    }

    Ok((vec![basal, top_dress, herbicide], packages))
}
