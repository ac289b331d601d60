//! CropCycle aggregate - one plantation or ratoon production period on a bloc.
//!
//! The aggregate guards its own transitions (active → closed, dates in
//! order). The "one active cycle per bloc" rule spans aggregates and is
//! enforced by the repository at commit time.

use chrono::NaiveDate;

use crate::domain::foundation::{
    BlocId, CropCycleId, DomainError, ErrorCode, StateMachine, Timestamp, ValidationError,
    VarietyId,
};

use super::{CropCycleEvent, CropCycleStatus, CycleType, GrowthStage};

/// Validated input for opening a new cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCropCycle {
    pub bloc_id: BlocId,
    pub cycle_type: CycleType,
    pub variety_id: VarietyId,
    /// Secondary crop grown between the cane rows, if any.
    pub intercrop_variety_id: Option<VarietyId>,
    pub planting_date: Option<NaiveDate>,
    pub expected_harvest_date: NaiveDate,
    pub expected_yield_tons_per_ha: f64,
    pub cycle_number: u32,
    pub parent_cycle_id: Option<CropCycleId>,
    /// Harvest date of the parent cycle; ratoon regrowth starts there.
    pub regrowth_start_date: Option<NaiveDate>,
}

/// The CropCycle aggregate root.
#[derive(Debug, Clone)]
pub struct CropCycle {
    id: CropCycleId,
    bloc_id: BlocId,
    cycle_type: CycleType,
    variety_id: VarietyId,
    intercrop_variety_id: Option<VarietyId>,
    cycle_number: u32,
    parent_cycle_id: Option<CropCycleId>,
    planting_date: Option<NaiveDate>,
    regrowth_start_date: Option<NaiveDate>,
    expected_harvest_date: NaiveDate,
    expected_yield_tons_per_ha: f64,
    actual_harvest_date: Option<NaiveDate>,
    status: CropCycleStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
    closed_at: Option<Timestamp>,
    domain_events: Vec<CropCycleEvent>,
}

impl CropCycle {
    /// Opens a new active cycle.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if a plantation has no planting date, the expected
    ///   yield is not positive, the harvest is not after the growth start, or
    ///   the cycle number is zero
    pub fn create(input: NewCropCycle) -> Result<Self, ValidationError> {
        if input.cycle_type.requires_planting_date() && input.planting_date.is_none() {
            return Err(ValidationError::empty_field("planting_date"));
        }
        if !input.expected_yield_tons_per_ha.is_finite() || input.expected_yield_tons_per_ha <= 0.0
        {
            return Err(ValidationError::out_of_range(
                "expected_yield",
                f64::MIN_POSITIVE,
                f64::MAX,
                input.expected_yield_tons_per_ha,
            ));
        }
        if let Some(start) = input.planting_date.or(input.regrowth_start_date) {
            if input.expected_harvest_date <= start {
                return Err(ValidationError::invalid_format(
                    "expected_harvest_date",
                    "must be after the growth start date",
                ));
            }
        }
        if input.cycle_number == 0 {
            return Err(ValidationError::out_of_range(
                "cycle_number",
                1.0,
                f64::from(u32::MAX),
                0.0,
            ));
        }

        let id = CropCycleId::new();
        let now = Timestamp::now();

        let mut cycle = Self {
            id,
            bloc_id: input.bloc_id,
            cycle_type: input.cycle_type,
            variety_id: input.variety_id,
            intercrop_variety_id: input.intercrop_variety_id,
            cycle_number: input.cycle_number,
            parent_cycle_id: input.parent_cycle_id,
            planting_date: input.planting_date,
            regrowth_start_date: input.regrowth_start_date,
            expected_harvest_date: input.expected_harvest_date,
            expected_yield_tons_per_ha: input.expected_yield_tons_per_ha,
            actual_harvest_date: None,
            status: CropCycleStatus::Active,
            created_at: now,
            updated_at: now,
            closed_at: None,
            domain_events: Vec::new(),
        };

        cycle.record_event(CropCycleEvent::Created {
            cycle_id: id,
            bloc_id: cycle.bloc_id.clone(),
            cycle_type: cycle.cycle_type,
            cycle_number: cycle.cycle_number,
            created_at: now,
        });

        Ok(cycle)
    }

    /// Reconstitutes a cycle from persisted data without recording events.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CropCycleId,
        bloc_id: BlocId,
        cycle_type: CycleType,
        variety_id: VarietyId,
        intercrop_variety_id: Option<VarietyId>,
        cycle_number: u32,
        parent_cycle_id: Option<CropCycleId>,
        planting_date: Option<NaiveDate>,
        regrowth_start_date: Option<NaiveDate>,
        expected_harvest_date: NaiveDate,
        expected_yield_tons_per_ha: f64,
        actual_harvest_date: Option<NaiveDate>,
        status: CropCycleStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
        closed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            bloc_id,
            cycle_type,
            variety_id,
            intercrop_variety_id,
            cycle_number,
            parent_cycle_id,
            planting_date,
            regrowth_start_date,
            expected_harvest_date,
            expected_yield_tons_per_ha,
            actual_harvest_date,
            status,
            created_at,
            updated_at,
            closed_at,
            domain_events: Vec::new(),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> CropCycleId {
        self.id
    }

    pub fn bloc_id(&self) -> &BlocId {
        &self.bloc_id
    }

    pub fn cycle_type(&self) -> CycleType {
        self.cycle_type
    }

    pub fn variety_id(&self) -> &VarietyId {
        &self.variety_id
    }

    pub fn intercrop_variety_id(&self) -> Option<&VarietyId> {
        self.intercrop_variety_id.as_ref()
    }

    /// 1-based position of this cycle in the bloc's history.
    pub fn cycle_number(&self) -> u32 {
        self.cycle_number
    }

    pub fn parent_cycle_id(&self) -> Option<CropCycleId> {
        self.parent_cycle_id
    }

    pub fn planting_date(&self) -> Option<NaiveDate> {
        self.planting_date
    }

    pub fn regrowth_start_date(&self) -> Option<NaiveDate> {
        self.regrowth_start_date
    }

    pub fn expected_harvest_date(&self) -> NaiveDate {
        self.expected_harvest_date
    }

    pub fn expected_yield_tons_per_ha(&self) -> f64 {
        self.expected_yield_tons_per_ha
    }

    pub fn actual_harvest_date(&self) -> Option<NaiveDate> {
        self.actual_harvest_date
    }

    pub fn status(&self) -> CropCycleStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn closed_at(&self) -> Option<Timestamp> {
        self.closed_at
    }

    /// Takes the recorded domain events, leaving the buffer empty.
    pub fn take_events(&mut self) -> Vec<CropCycleEvent> {
        std::mem::take(&mut self.domain_events)
    }

    // ───────────────────────────────────────────────────────────────
    // Growth
    // ───────────────────────────────────────────────────────────────

    /// Date the crop started growing: planting, or regrowth after the parent harvest.
    pub fn growth_start_date(&self) -> Option<NaiveDate> {
        self.planting_date.or(self.regrowth_start_date)
    }

    /// Days elapsed since the growth start, as of `today`.
    ///
    /// Closed cycles stop counting at their actual harvest date.
    pub fn days_since_planting(&self, today: NaiveDate) -> Option<i64> {
        let start = self.growth_start_date()?;
        let end = self.actual_harvest_date.unwrap_or(today);
        Some((end - start).num_days())
    }

    pub fn growth_stage(&self, today: NaiveDate) -> Option<GrowthStage> {
        self.days_since_planting(today)
            .map(GrowthStage::from_days_since_planting)
    }

    // ───────────────────────────────────────────────────────────────
    // Closure
    // ───────────────────────────────────────────────────────────────

    /// Checks whether `actual_harvest_date` may close this cycle.
    pub fn check_closable(&self, actual_harvest_date: NaiveDate) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&CropCycleStatus::Closed) {
            return Err(DomainError::new(
                ErrorCode::CycleAlreadyClosed,
                "Crop cycle is already closed",
            )
            .with_detail("cycle_id", self.id.to_string()));
        }
        if let Some(start) = self.growth_start_date() {
            if actual_harvest_date < start {
                return Err(DomainError::validation(
                    "actual_harvest_date",
                    "Actual harvest date cannot precede the growth start date",
                ));
            }
        }
        Ok(())
    }

    /// Closes the cycle, stamping the actual harvest date.
    ///
    /// # Errors
    ///
    /// - `CycleAlreadyClosed` if the cycle is not active
    /// - `ValidationFailed` if the harvest date precedes the growth start
    pub fn close(&mut self, actual_harvest_date: NaiveDate) -> Result<(), DomainError> {
        self.check_closable(actual_harvest_date)?;
        self.status = self
            .status
            .transition_to(CropCycleStatus::Closed)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;

        let now = Timestamp::now();
        self.actual_harvest_date = Some(actual_harvest_date);
        self.closed_at = Some(now);
        self.updated_at = now;

        self.record_event(CropCycleEvent::Closed {
            cycle_id: self.id,
            bloc_id: self.bloc_id.clone(),
            actual_harvest_date,
            closed_at: now,
        });

        Ok(())
    }

    fn record_event(&mut self, event: CropCycleEvent) {
        self.domain_events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn plantation_input() -> NewCropCycle {
        NewCropCycle {
            bloc_id: BlocId::new("F1").unwrap(),
            cycle_type: CycleType::Plantation,
            variety_id: VarietyId::new("R579").unwrap(),
            planting_date: Some(date("2024-12-03")),
            expected_harvest_date: date("2025-12-03"),
            expected_yield_tons_per_ha: 85.0,
            cycle_number: 1,
            parent_cycle_id: None,
            regrowth_start_date: None,
            intercrop_variety_id: None,
        }
    }

    fn ratoon_input() -> NewCropCycle {
        NewCropCycle {
            cycle_type: CycleType::Ratoon,
            planting_date: None,
            regrowth_start_date: Some(date("2025-12-03")),
            expected_harvest_date: date("2026-12-03"),
            cycle_number: 2,
            ..plantation_input()
        }
    }

    #[test]
    fn create_opens_active_cycle_and_records_event() {
        let mut cycle = CropCycle::create(plantation_input()).unwrap();

        assert!(cycle.is_active());
        assert_eq!(cycle.cycle_number(), 1);
        assert!(cycle.actual_harvest_date().is_none());

        let events = cycle.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "crop_cycle.created");
        assert!(cycle.take_events().is_empty());
    }

    #[test]
    fn plantation_without_planting_date_is_rejected() {
        let input = NewCropCycle {
            planting_date: None,
            ..plantation_input()
        };
        let err = CropCycle::create(input).unwrap_err();
        assert_eq!(err.field(), "planting_date");
    }

    #[test]
    fn ratoon_without_planting_date_is_accepted() {
        let input = NewCropCycle {
            cycle_type: CycleType::Ratoon,
            planting_date: None,
            cycle_number: 2,
            ..plantation_input()
        };
        let cycle = CropCycle::create(input).unwrap();
        assert_eq!(cycle.cycle_type(), CycleType::Ratoon);
        assert!(cycle.planting_date().is_none());
    }

    #[test]
    fn non_positive_yield_is_rejected() {
        for bad in [0.0, -5.0, f64::NAN] {
            let input = NewCropCycle {
                expected_yield_tons_per_ha: bad,
                ..plantation_input()
            };
            assert!(CropCycle::create(input).is_err());
        }
    }

    #[test]
    fn harvest_must_follow_planting() {
        let input = NewCropCycle {
            expected_harvest_date: date("2024-12-03"),
            ..plantation_input()
        };
        let err = CropCycle::create(input).unwrap_err();
        assert_eq!(err.field(), "expected_harvest_date");
    }

    #[test]
    fn ratoon_harvest_must_follow_regrowth_start() {
        let input = NewCropCycle {
            expected_harvest_date: date("2025-11-01"),
            ..ratoon_input()
        };
        let err = CropCycle::create(input).unwrap_err();
        assert_eq!(err.field(), "expected_harvest_date");
    }

    #[test]
    fn intercrop_is_kept_on_the_cycle() {
        let input = NewCropCycle {
            intercrop_variety_id: Some(VarietyId::new("potato").unwrap()),
            ..plantation_input()
        };
        let cycle = CropCycle::create(input).unwrap();
        assert_eq!(
            cycle.intercrop_variety_id().map(|v| v.as_str()),
            Some("potato")
        );
    }

    #[test]
    fn close_stamps_harvest_date_and_records_event() {
        let mut cycle = CropCycle::create(plantation_input()).unwrap();
        cycle.take_events();

        cycle.close(date("2025-12-03")).unwrap();

        assert_eq!(cycle.status(), CropCycleStatus::Closed);
        assert_eq!(cycle.actual_harvest_date(), Some(date("2025-12-03")));
        assert!(cycle.closed_at().is_some());
        let events = cycle.take_events();
        assert_eq!(events[0].event_type(), "crop_cycle.closed");
    }

    #[test]
    fn closing_twice_is_a_conflict() {
        let mut cycle = CropCycle::create(plantation_input()).unwrap();
        cycle.close(date("2025-12-03")).unwrap();

        let err = cycle.close(date("2025-12-04")).unwrap_err();
        assert_eq!(err.code, ErrorCode::CycleAlreadyClosed);
        assert_eq!(cycle.actual_harvest_date(), Some(date("2025-12-03")));
    }

    #[test]
    fn close_rejects_harvest_before_planting() {
        let mut cycle = CropCycle::create(plantation_input()).unwrap();
        let err = cycle.close(date("2024-01-01")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(cycle.is_active());
    }

    #[test]
    fn ratoon_close_rejects_harvest_before_regrowth_start() {
        let mut cycle = CropCycle::create(ratoon_input()).unwrap();
        let err = cycle.close(date("2025-11-30")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(cycle.is_active());

        cycle.close(date("2026-11-30")).unwrap();
        assert!(!cycle.is_active());
    }

    #[test]
    fn growth_stage_follows_days_since_planting() {
        let cycle = CropCycle::create(plantation_input()).unwrap();
        assert_eq!(cycle.days_since_planting(date("2024-12-13")), Some(10));
        assert_eq!(
            cycle.growth_stage(date("2025-06-01")),
            Some(GrowthStage::GrandGrowth)
        );
    }

    #[test]
    fn ratoon_growth_counts_from_regrowth_start() {
        let cycle = CropCycle::create(ratoon_input()).unwrap();
        assert_eq!(
            cycle.growth_stage(date("2026-02-01")),
            Some(GrowthStage::Tillering)
        );
    }

    #[test]
    fn closed_cycle_age_stops_at_harvest() {
        let mut cycle = CropCycle::create(plantation_input()).unwrap();
        cycle.close(date("2025-12-03")).unwrap();
        assert_eq!(cycle.days_since_planting(date("2030-01-01")), Some(365));
    }
}
