//! Product application node.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{CropCycleId, MethodId, ProductApplicationId, ValidationError};

/// Planning status of a product application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProductApplicationStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl ProductApplicationStatus {
    /// Completed and cancelled applications need no further work.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            ProductApplicationStatus::Completed | ProductApplicationStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductApplicationStatus::Planned => "planned",
            ProductApplicationStatus::InProgress => "in-progress",
            ProductApplicationStatus::Completed => "completed",
            ProductApplicationStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "planned" => Ok(ProductApplicationStatus::Planned),
            "in-progress" => Ok(ProductApplicationStatus::InProgress),
            "completed" => Ok(ProductApplicationStatus::Completed),
            "cancelled" => Ok(ProductApplicationStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "product_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

impl fmt::Display for ProductApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A planned or executed application of an input product within a cycle.
///
/// Numeric fields stay optional as stored; rollups treat absence as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductApplication {
    pub id: ProductApplicationId,
    pub cycle_id: CropCycleId,
    pub product_name: String,
    pub method_id: Option<MethodId>,
    pub days_after_planting: Option<i32>,
    pub planned_start_date: Option<NaiveDate>,
    pub planned_end_date: Option<NaiveDate>,
    pub planned_rate: Option<f64>,
    pub planned_area_hectares: Option<f64>,
    /// Progress as last reported by the field team, in [0, 1].
    pub reported_progress: Option<f64>,
    pub est_product_cost: Option<f64>,
    pub est_resource_cost: Option<f64>,
    pub act_product_cost: Option<f64>,
    pub act_resource_cost: Option<f64>,
    pub status: ProductApplicationStatus,
}

impl ProductApplication {
    /// Creates a planned application with no figures yet.
    pub fn planned(cycle_id: CropCycleId, product_name: impl Into<String>) -> Self {
        Self {
            id: ProductApplicationId::new(),
            cycle_id,
            product_name: product_name.into(),
            method_id: None,
            days_after_planting: None,
            planned_start_date: None,
            planned_end_date: None,
            planned_rate: None,
            planned_area_hectares: None,
            reported_progress: None,
            est_product_cost: None,
            est_resource_cost: None,
            act_product_cost: None,
            act_resource_cost: None,
            status: ProductApplicationStatus::Planned,
        }
    }

    /// Returns a description of the first implausible figure, if any.
    ///
    /// Costs must be finite and non-negative; reported progress must lie in [0, 1].
    pub fn malformation(&self) -> Option<String> {
        let costs = [
            ("estProductCost", self.est_product_cost),
            ("estResourceCost", self.est_resource_cost),
            ("actProductCost", self.act_product_cost),
            ("actResourceCost", self.act_resource_cost),
        ];
        for (name, value) in costs {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Some(format!("{} is {}", name, v));
                }
            }
        }
        if let Some(p) = self.reported_progress {
            if !(0.0..=1.0).contains(&p) {
                return Some(format!("reportedProgress is {}", p));
            }
        }
        None
    }

    /// True once both actual cost figures have been recorded.
    pub fn has_actual_costs(&self) -> bool {
        self.act_product_cost.is_some() && self.act_resource_cost.is_some()
    }
}
