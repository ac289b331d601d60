//! Bloc entity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{BlocId, ValidationError};

/// Whether a bloc is currently farmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlocStatus {
    #[default]
    Active,
    Retired,
}

impl BlocStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlocStatus::Active => "active",
            BlocStatus::Retired => "retired",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "active" => Ok(BlocStatus::Active),
            "retired" => Ok(BlocStatus::Retired),
            other => Err(ValidationError::invalid_format(
                "bloc_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

impl fmt::Display for BlocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A farm field unit, owned by the field registry and read-only here.
#[derive(Debug, Clone, PartialEq)]
pub struct Bloc {
    id: BlocId,
    name: String,
    area_hectares: f64,
    status: BlocStatus,
}

impl Bloc {
    /// Creates a bloc, validating name and area.
    pub fn new(
        id: BlocId,
        name: impl Into<String>,
        area_hectares: f64,
        status: BlocStatus,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if !area_hectares.is_finite() || area_hectares < 0.0 {
            return Err(ValidationError::out_of_range(
                "area_hectares",
                0.0,
                f64::MAX,
                area_hectares,
            ));
        }
        Ok(Self {
            id,
            name,
            area_hectares,
            status,
        })
    }

    pub fn id(&self) -> &BlocId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area_hectares(&self) -> f64 {
        self.area_hectares
    }

    pub fn status(&self) -> BlocStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bloc_id() -> BlocId {
        BlocId::new("F1").unwrap()
    }

    #[test]
    fn new_accepts_valid_bloc() {
        let bloc = Bloc::new(bloc_id(), "North 1", 12.5, BlocStatus::Active).unwrap();
        assert_eq!(bloc.name(), "North 1");
        assert_eq!(bloc.area_hectares(), 12.5);
    }

    #[test]
    fn new_rejects_negative_area() {
        assert!(Bloc::new(bloc_id(), "North 1", -1.0, BlocStatus::Active).is_err());
        assert!(Bloc::new(bloc_id(), "North 1", f64::NAN, BlocStatus::Active).is_err());
    }

    #[test]
    fn new_rejects_blank_name() {
        assert!(Bloc::new(bloc_id(), "  ", 1.0, BlocStatus::Active).is_err());
    }

    #[test]
    fn status_parses_round_trip() {
        for status in [BlocStatus::Active, BlocStatus::Retired] {
            assert_eq!(BlocStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(BlocStatus::parse("fallow").is_err());
    }
}
