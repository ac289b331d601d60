//! Work package node.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ProductApplicationId, ValidationError, WorkPackageId};

/// Execution status of a work package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WorkPackageStatus {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

impl WorkPackageStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, WorkPackageStatus::Complete)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkPackageStatus::NotStarted => "not-started",
            WorkPackageStatus::InProgress => "in-progress",
            WorkPackageStatus::Complete => "complete",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "not-started" => Ok(WorkPackageStatus::NotStarted),
            "in-progress" => Ok(WorkPackageStatus::InProgress),
            "complete" => Ok(WorkPackageStatus::Complete),
            other => Err(ValidationError::invalid_format(
                "work_package_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

impl fmt::Display for WorkPackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dated, area-scoped unit of execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPackage {
    pub id: WorkPackageId,
    pub product_id: ProductApplicationId,
    pub days_after_planting: Option<i32>,
    pub execution_date: Option<NaiveDate>,
    pub area_hectares: Option<f64>,
    pub rate: Option<f64>,
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: WorkPackageStatus,
}

impl WorkPackage {
    /// Creates a not-started package under `product_id`.
    pub fn scheduled(product_id: ProductApplicationId, execution_date: Option<NaiveDate>) -> Self {
        Self {
            id: WorkPackageId::new(),
            product_id,
            days_after_planting: None,
            execution_date,
            area_hectares: None,
            rate: None,
            quantity: None,
            notes: None,
            status: WorkPackageStatus::NotStarted,
        }
    }

    /// Treated area if it is a plausible figure.
    pub fn valid_area(&self) -> Option<f64> {
        self.area_hectares.filter(|a| a.is_finite() && *a >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            WorkPackageStatus::NotStarted,
            WorkPackageStatus::InProgress,
            WorkPackageStatus::Complete,
        ] {
            assert_eq!(WorkPackageStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn only_complete_counts_as_complete() {
        assert!(WorkPackageStatus::Complete.is_complete());
        assert!(!WorkPackageStatus::InProgress.is_complete());
    }

    #[test]
    fn invalid_area_is_ignored() {
        let mut wp = WorkPackage::scheduled(ProductApplicationId::new(), None);
        wp.area_hectares = Some(-1.0);
        assert_eq!(wp.valid_area(), None);
        wp.area_hectares = Some(2.5);
        assert_eq!(wp.valid_area(), Some(2.5));
    }

    #[test]
    fn notes_are_omitted_when_absent() {
        let wp = WorkPackage::scheduled(ProductApplicationId::new(), None);
        let json = serde_json::to_string(&wp).unwrap();
        assert!(!json.contains("notes"));
        assert!(json.contains("\"status\":\"not-started\""));
    }
}
