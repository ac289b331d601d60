//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `bloc` - Farm field units
//! - `crop_cycle` - Crop cycle aggregate and its lifecycle
//! - `work_plan` - Product applications and work packages of a cycle
//! - `overview` - Pure work breakdown rollups and the bloc overview read model
//! - `catalog` - Reference data (varieties, methods, products, resources)

pub mod bloc;
pub mod catalog;
pub mod crop_cycle;
pub mod foundation;
pub mod overview;
pub mod work_plan;
