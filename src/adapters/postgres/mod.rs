//! PostgreSQL adapters.

mod bloc_reader;
mod cycle_repository;
mod errors;
mod work_plan_reader;

pub use bloc_reader::PostgresBlocReader;
pub use cycle_repository::PostgresCropCycleRepository;
pub use work_plan_reader::PostgresWorkPlanReader;
