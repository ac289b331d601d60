//! Crop cycle status and type enums.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a crop cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CropCycleStatus {
    #[default]
    Active,
    Closed,
}

impl CropCycleStatus {
    /// Returns true if the cycle still accepts changes.
    pub fn is_active(&self) -> bool {
        matches!(self, CropCycleStatus::Active)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CropCycleStatus::Active => "active",
            CropCycleStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "active" => Ok(CropCycleStatus::Active),
            "closed" => Ok(CropCycleStatus::Closed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown crop cycle status '{}'", other),
            )),
        }
    }
}

/// Closing is one-way; a closed cycle never reopens.
impl StateMachine for CropCycleStatus {
    const TRANSITIONS: &'static [(Self, Self)] =
        &[(CropCycleStatus::Active, CropCycleStatus::Closed)];
}

impl fmt::Display for CropCycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a cycle starts from fresh planting or regrows from rootstock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleType {
    Plantation,
    Ratoon,
}

impl CycleType {
    /// Plantation cycles cannot exist without a planting date.
    pub fn requires_planting_date(&self) -> bool {
        matches!(self, CycleType::Plantation)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CycleType::Plantation => "plantation",
            CycleType::Ratoon => "ratoon",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim() {
            "plantation" => Ok(CycleType::Plantation),
            "ratoon" => Ok(CycleType::Ratoon),
            "" => Err(ValidationError::empty_field("type")),
            other => Err(ValidationError::invalid_format(
                "type",
                format!("expected 'plantation' or 'ratoon', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for CycleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_active() {
        assert_eq!(CropCycleStatus::default(), CropCycleStatus::Active);
    }

    #[test]
    fn active_can_close() {
        assert!(CropCycleStatus::Active.can_transition_to(&CropCycleStatus::Closed));
    }

    #[test]
    fn closed_is_terminal() {
        assert!(CropCycleStatus::Closed.is_terminal());
        assert!(CropCycleStatus::Closed
            .transition_to(CropCycleStatus::Active)
            .is_err());
        assert!(CropCycleStatus::Closed
            .transition_to(CropCycleStatus::Closed)
            .is_err());
    }

    #[test]
    fn status_serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&CropCycleStatus::Closed).unwrap(),
            "\"closed\""
        );
    }

    #[test]
    fn status_parse_round_trips() {
        for status in [CropCycleStatus::Active, CropCycleStatus::Closed] {
            assert_eq!(CropCycleStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(CropCycleStatus::parse("archived").is_err());
    }

    #[test]
    fn only_plantation_requires_planting_date() {
        assert!(CycleType::Plantation.requires_planting_date());
        assert!(!CycleType::Ratoon.requires_planting_date());
    }

    #[test]
    fn cycle_type_parse_distinguishes_missing_from_unknown() {
        assert_eq!(CycleType::parse("ratoon").unwrap(), CycleType::Ratoon);
        assert!(matches!(
            CycleType::parse(""),
            Err(ValidationError::EmptyField { .. })
        ));
        assert!(matches!(
            CycleType::parse("fallow"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
