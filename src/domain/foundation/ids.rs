//! Strongly-typed identifier value objects.
//!
//! Cycle and work-plan node ids are generated here and backed by UUIDs.
//! Bloc and catalog ids come from outside (field registry, reference tables)
//! and are opaque non-empty strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an id from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates the id, rejecting empty or whitespace-only values.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a crop cycle.
    CropCycleId
);

uuid_id!(
    /// Unique identifier for a product application within a cycle's work plan.
    ProductApplicationId
);

uuid_id!(
    /// Unique identifier for a work package under a product application.
    WorkPackageId
);

string_id!(
    /// Identifier of a bloc (farm field), owned by the field registry.
    BlocId,
    "bloc_id"
);

string_id!(
    /// Identifier of a sugarcane or intercrop variety in the catalog.
    VarietyId,
    "variety_id"
);

string_id!(
    /// Identifier of an application/operation method in the catalog.
    MethodId,
    "method_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_cycle_ids_are_unique() {
        assert_ne!(CropCycleId::new(), CropCycleId::new());
    }

    #[test]
    fn crop_cycle_id_parses_from_display() {
        let id = CropCycleId::new();
        let parsed: CropCycleId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn crop_cycle_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<CropCycleId>().is_err());
    }

    #[test]
    fn bloc_id_rejects_empty() {
        assert!(BlocId::new("").is_err());
        assert!(BlocId::new("   ").is_err());
    }

    #[test]
    fn bloc_id_trims_whitespace() {
        assert_eq!(BlocId::new("  F1 ").unwrap().as_str(), "F1");
    }

    #[test]
    fn variety_id_deserialization_rejects_empty_string() {
        let result: Result<VarietyId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn string_ids_serialize_as_plain_strings() {
        let id = BlocId::new("F1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"F1\"");
    }
}
