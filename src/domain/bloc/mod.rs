//! Bloc module - Farm field units.
//!
//! Geometry lives with the field registry; this crate only carries the
//! attributes needed to label and weight an overview.

mod aggregate;

pub use aggregate::{Bloc, BlocStatus};
