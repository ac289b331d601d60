//! Catalog module - Append-only reference data keyed by stable string ids.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{MethodId, ValidationError, VarietyId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarietyCategory {
    Sugarcane,
    Intercrop,
}

/// A cultivar that can be planted in a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variety {
    pub id: VarietyId,
    pub name: String,
    pub category: VarietyCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// How a product is applied (manual, mechanical, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationMethod {
    pub id: MethodId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDefinition {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    #[serde(default)]
    pub cost_per_unit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    pub id: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    #[serde(default)]
    pub cost_per_hour: Option<f64>,
}

/// The full reference catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub varieties: Vec<Variety>,
    #[serde(default)]
    pub operation_methods: Vec<OperationMethod>,
    #[serde(default)]
    pub products: Vec<ProductDefinition>,
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
}

fn default_true() -> bool {
    true
}

impl Catalog {
    pub fn variety(&self, id: &VarietyId) -> Option<&Variety> {
        self.varieties.iter().find(|v| &v.id == id)
    }

    pub fn method(&self, id: &MethodId) -> Option<&OperationMethod> {
        self.operation_methods.iter().find(|m| &m.id == id)
    }

    /// Checks that ids are unique within each list and costs are non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_unique("varieties", self.varieties.iter().map(|v| v.id.as_str()))?;
        ensure_unique(
            "operation_methods",
            self.operation_methods.iter().map(|m| m.id.as_str()),
        )?;
        ensure_unique("products", self.products.iter().map(|p| p.id.as_str()))?;
        ensure_unique("resources", self.resources.iter().map(|r| r.id.as_str()))?;

        let costs = self
            .products
            .iter()
            .map(|p| ("products.costPerUnit", p.cost_per_unit))
            .chain(
                self.resources
                    .iter()
                    .map(|r| ("resources.costPerHour", r.cost_per_hour)),
            );
        for (field, cost) in costs {
            if let Some(c) = cost {
                if !c.is_finite() || c < 0.0 {
                    return Err(ValidationError::out_of_range(field, 0.0, f64::MAX, c));
                }
            }
        }
        Ok(())
    }
}

fn ensure_unique<'a>(
    list: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::invalid_format(
                list,
                format!("duplicate id '{}'", id),
            ));
        }
    }
    Ok(())
}
