//! Work plan module - Product applications and their work packages.

mod product_application;
mod tree;
mod work_package;

pub use product_application::{ProductApplication, ProductApplicationStatus};
pub use tree::WorkPlan;
pub use work_package::{WorkPackage, WorkPackageStatus};
