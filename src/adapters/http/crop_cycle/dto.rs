//! Request and response bodies for crop cycle endpoints.
//!
//! Requests arrive with every field optional so that a missing field becomes
//! a 400 naming that field rather than a generic deserialization failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::{CloseCropCycleCommand, CreateCropCycleCommand};
use crate::domain::crop_cycle::{
    ClosureValidation, CropCycle, CropCycleStatus, CycleType, GrowthStage, ValidationMode,
};
use crate::domain::foundation::{
    parse_calendar_date, BlocId, CropCycleId, ValidationError, VarietyId,
};
use crate::domain::overview::ClosureSummary;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// `?blocId=` query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocQueryParams {
    pub bloc_id: Option<String>,
}

impl BlocQueryParams {
    pub fn bloc_id(&self) -> Result<BlocId, ValidationError> {
        BlocId::new(required("blocId", self.bloc_id.clone())?)
    }
}

/// A number that some clients send as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn to_f64(&self, field: &str) -> Result<f64, ValidationError> {
        match self {
            NumberOrString::Number(n) => Ok(*n),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::invalid_format(field, "expected a number")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCropCycleRequest {
    pub bloc_id: Option<String>,
    pub sugarcane_variety_id: Option<String>,
    /// Blank or `"none"` means no intercrop.
    pub intercrop_variety_id: Option<String>,
    pub expected_harvest_date: Option<String>,
    pub expected_yield: Option<NumberOrString>,
    #[serde(rename = "type")]
    pub cycle_type: Option<String>,
    pub planting_date: Option<String>,
    pub parent_cycle_id: Option<String>,
}

impl CreateCropCycleRequest {
    /// Validates presence and format of every field.
    pub fn into_command(self) -> Result<CreateCropCycleCommand, ValidationError> {
        let bloc_id = BlocId::new(required("blocId", self.bloc_id)?)?;
        let variety_id =
            VarietyId::new(required("sugarcaneVarietyId", self.sugarcane_variety_id)?)?;
        let intercrop_variety_id = optional(self.intercrop_variety_id)
            .filter(|raw| !raw.trim().eq_ignore_ascii_case("none"))
            .map(VarietyId::new)
            .transpose()?;
        let expected_harvest_date = parse_calendar_date(
            "expectedHarvestDate",
            &required("expectedHarvestDate", self.expected_harvest_date)?,
        )?;

        let expected_yield = self
            .expected_yield
            .ok_or_else(|| ValidationError::empty_field("expectedYield"))?
            .to_f64("expectedYield")?;
        if !expected_yield.is_finite() || expected_yield <= 0.0 {
            return Err(ValidationError::invalid_format(
                "expectedYield",
                "must be a positive number",
            ));
        }

        let cycle_type = CycleType::parse(&required("type", self.cycle_type)?)?;
        let planting_date = optional(self.planting_date)
            .map(|raw| parse_calendar_date("plantingDate", &raw))
            .transpose()?;
        if cycle_type.requires_planting_date() && planting_date.is_none() {
            return Err(ValidationError::empty_field("plantingDate"));
        }

        let parent_cycle_id = optional(self.parent_cycle_id)
            .map(|raw| parse_cycle_id("parentCycleId", &raw))
            .transpose()?;

        Ok(CreateCropCycleCommand {
            bloc_id,
            variety_id,
            intercrop_variety_id,
            cycle_type,
            planting_date,
            expected_harvest_date,
            expected_yield_tons_per_ha: expected_yield,
            parent_cycle_id,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateClosureRequest {
    pub cycle_id: Option<String>,
}

impl ValidateClosureRequest {
    pub fn cycle_id(&self) -> Result<CropCycleId, ValidationError> {
        parse_cycle_id("cycleId", &required("cycleId", self.cycle_id.clone())?)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseCropCycleRequest {
    pub cycle_id: Option<String>,
    pub actual_harvest_date: Option<String>,
    pub user_confirmation: Option<bool>,
}

impl CloseCropCycleRequest {
    pub fn into_command(self) -> Result<CloseCropCycleCommand, ValidationError> {
        let cycle_id = parse_cycle_id("cycleId", &required("cycleId", self.cycle_id)?)?;
        let actual_harvest_date = parse_calendar_date(
            "actualHarvestDate",
            &required("actualHarvestDate", self.actual_harvest_date)?,
        )?;
        let user_confirmation = self
            .user_confirmation
            .ok_or_else(|| ValidationError::empty_field("userConfirmation"))?;

        Ok(CloseCropCycleCommand {
            cycle_id,
            actual_harvest_date,
            user_confirmation,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, ValidationError> {
    optional(value).ok_or_else(|| ValidationError::empty_field(field))
}

/// Blank strings count as absent.
fn optional(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_cycle_id(field: &str, raw: &str) -> Result<CropCycleId, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::invalid_format(field, "expected a UUID"))
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropCycleResponse {
    pub id: CropCycleId,
    pub bloc_id: BlocId,
    pub sugarcane_variety_id: VarietyId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intercrop_variety_id: Option<VarietyId>,
    #[serde(rename = "type")]
    pub cycle_type: CycleType,
    pub status: CropCycleStatus,
    pub cycle_number: u32,
    pub parent_cycle_id: Option<CropCycleId>,
    pub planting_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regrowth_start_date: Option<NaiveDate>,
    pub expected_harvest_date: NaiveDate,
    pub expected_yield: f64,
    pub actual_harvest_date: Option<NaiveDate>,
    pub days_since_planting: Option<i64>,
    pub growth_stage: Option<GrowthStage>,
    pub created_at: String,
    pub updated_at: String,
    pub closed_at: Option<String>,
}

impl CropCycleResponse {
    pub fn from_cycle(cycle: &CropCycle, today: NaiveDate) -> Self {
        Self {
            id: cycle.id(),
            bloc_id: cycle.bloc_id().clone(),
            sugarcane_variety_id: cycle.variety_id().clone(),
            intercrop_variety_id: cycle.intercrop_variety_id().cloned(),
            cycle_type: cycle.cycle_type(),
            status: cycle.status(),
            cycle_number: cycle.cycle_number(),
            parent_cycle_id: cycle.parent_cycle_id(),
            planting_date: cycle.planting_date(),
            regrowth_start_date: cycle.regrowth_start_date(),
            expected_harvest_date: cycle.expected_harvest_date(),
            expected_yield: cycle.expected_yield_tons_per_ha(),
            actual_harvest_date: cycle.actual_harvest_date(),
            days_since_planting: cycle.days_since_planting(today),
            growth_stage: cycle.growth_stage(today),
            created_at: cycle.created_at().to_rfc3339(),
            updated_at: cycle.updated_at().to_rfc3339(),
            closed_at: cycle.closed_at().map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosureValidationResponse {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub can_close: bool,
    pub mode: ValidationMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ClosureSummary>,
}

impl From<ClosureValidation> for ClosureValidationResponse {
    fn from(report: ClosureValidation) -> Self {
        Self {
            is_valid: report.is_valid(),
            can_close: report.can_close(),
            mode: report.mode,
            errors: report.errors,
            warnings: report.warnings,
            summary: report.summary,
        }
    }
}
