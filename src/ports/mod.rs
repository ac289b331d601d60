//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CropCycleRepository` - Crop cycle persistence with conditional writes
//! - `BlocReader` - Bloc lookups
//! - `WorkPlanReader` - Product applications and work packages of a cycle
//! - `CatalogProvider` - Reference data
//! - `BackendCapabilities` - What the configured backend can do

mod bloc_reader;
mod capabilities;
mod catalog_provider;
mod cycle_repository;
mod work_plan_reader;

pub use bloc_reader::BlocReader;
pub use capabilities::BackendCapabilities;
pub use catalog_provider::CatalogProvider;
pub use cycle_repository::CropCycleRepository;
pub use work_plan_reader::WorkPlanReader;
