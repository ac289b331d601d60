//! Adapters - Implementations of port interfaces.
//!
//! - `http` - axum REST API under `/api`
//! - `postgres` - sqlx repositories with migrations
//! - `memory` - in-process stores for demo mode and tests
//! - `catalog` - YAML-backed reference data

pub mod catalog;
pub mod http;
pub mod memory;
pub mod postgres;

pub use catalog::{CatalogLoadError, StaticCatalog};
pub use memory::{InMemoryBlocStore, InMemoryCropCycleRepository, InMemoryWorkPlanStore};
pub use postgres::{PostgresBlocReader, PostgresCropCycleRepository, PostgresWorkPlanReader};
