//! Overview module - Work breakdown rollups and the bloc overview read model.

mod aggregator;
mod bloc_overview;
mod closure_summary;

pub use aggregator::{
    aggregate, rollup_product, ProductRollup, WorkBreakdown, WorkBreakdownTotals,
};
pub use bloc_overview::{BlocOverview, CycleSummary, ProductOverview};
pub use closure_summary::{summarize_closure, ActivitySummary, ClosureSummary, CostBreakdown};
