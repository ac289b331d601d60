//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and the state machine trait
//! that form the vocabulary of the crop operations domain.

mod command;
mod errors;
mod ids;
mod progress;
mod state_machine;
mod timestamp;

pub use command::{CommandMetadata, CommandSource};
pub use errors::{DomainError, ErrorCategory, ErrorCode, ValidationError};
pub use ids::{BlocId, CropCycleId, MethodId, ProductApplicationId, VarietyId, WorkPackageId};
pub use progress::Progress;
pub use state_machine::StateMachine;
pub use timestamp::{parse_calendar_date, Timestamp};
