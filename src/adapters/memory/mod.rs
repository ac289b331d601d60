//! In-memory adapters.
//!
//! Back the demo mode and the test suites. A read-only demo is the same
//! stores with `supports_mutation` switched off.

mod bloc_store;
mod cycle_repository;
mod seed;
mod work_plan_store;

pub use bloc_store::InMemoryBlocStore;
pub use cycle_repository::InMemoryCropCycleRepository;
pub use seed::{seed_demo_data, SeedSummary};
pub use work_plan_store::InMemoryWorkPlanStore;
