//! Overview query handlers.

mod get_bloc_overview;

pub use get_bloc_overview::{GetBlocOverviewError, GetBlocOverviewHandler, GetBlocOverviewQuery};
