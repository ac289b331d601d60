//! Sugarcane growth stage derived from crop age.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phenological stage of the cane, by days since planting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthStage {
    Germination,
    Tillering,
    GrandGrowth,
    Maturation,
    Ripening,
}

impl GrowthStage {
    /// Stage boundaries: 30, 120, 270 and 360 days (inclusive upper bounds).
    pub fn from_days_since_planting(days: i64) -> Self {
        match days {
            d if d <= 30 => GrowthStage::Germination,
            d if d <= 120 => GrowthStage::Tillering,
            d if d <= 270 => GrowthStage::GrandGrowth,
            d if d <= 360 => GrowthStage::Maturation,
            _ => GrowthStage::Ripening,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Germination => "germination",
            GrowthStage::Tillering => "tillering",
            GrowthStage::GrandGrowth => "grand-growth",
            GrowthStage::Maturation => "maturation",
            GrowthStage::Ripening => "ripening",
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
