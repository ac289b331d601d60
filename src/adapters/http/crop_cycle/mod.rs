//! HTTP adapter for the crop cycle lifecycle.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::crop_cycle_router;
