//! Crop cycle module - Production periods on a bloc.
//!
//! A bloc holds at most one active cycle. Cycles are never deleted;
//! closed cycles form the bloc's history and the lineage of ratoons.

mod aggregate;
mod closure;
mod events;
mod growth_stage;
mod status;

pub use aggregate::{CropCycle, NewCropCycle};
pub use closure::{ClosureValidation, ValidationMode};
pub use events::CropCycleEvent;
pub use growth_stage::GrowthStage;
pub use status::{CropCycleStatus, CycleType};
