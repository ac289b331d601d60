//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod crop_cycle;
pub mod overview;

pub use crop_cycle::{
    CloseCropCycleCommand, CloseCropCycleError, CloseCropCycleHandler, CreateCropCycleCommand,
    CreateCropCycleError, CreateCropCycleHandler, GetActiveCropCycleHandler,
    GetActiveCropCycleQuery, GetCropCycleHistoryHandler, GetCropCycleHistoryQuery,
    ValidateCropCycleClosureError, ValidateCropCycleClosureHandler, ValidateCropCycleClosureQuery,
};
pub use overview::{GetBlocOverviewError, GetBlocOverviewHandler, GetBlocOverviewQuery};
