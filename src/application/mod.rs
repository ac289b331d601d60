//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (create, close) write; query handlers read.

pub mod handlers;

pub use handlers::{
    CloseCropCycleCommand, CloseCropCycleHandler, CreateCropCycleCommand, CreateCropCycleHandler,
    GetActiveCropCycleHandler, GetBlocOverviewHandler, GetCropCycleHistoryHandler,
    ValidateCropCycleClosureHandler,
};
