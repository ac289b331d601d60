//! HTTP middleware.

pub mod timeout;

pub use timeout::{deadline_middleware, RequestDeadline};
