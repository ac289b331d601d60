//! Crop cycle command and query handlers.
//!
//! Together these form the cycle lifecycle manager: create, query,
//! validate for closure and close.

// Command handlers
mod close_cycle;
mod create_cycle;

// Query handlers
mod get_active_cycle;
mod get_cycle_history;
mod validate_closure;

pub use close_cycle::{CloseCropCycleCommand, CloseCropCycleError, CloseCropCycleHandler};
pub use create_cycle::{CreateCropCycleCommand, CreateCropCycleError, CreateCropCycleHandler};
pub use get_active_cycle::{GetActiveCropCycleHandler, GetActiveCropCycleQuery};
pub use get_cycle_history::{GetCropCycleHistoryHandler, GetCropCycleHistoryQuery};
pub use validate_closure::{
    ValidateCropCycleClosureError, ValidateCropCycleClosureHandler, ValidateCropCycleClosureQuery,
};
