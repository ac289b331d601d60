//! Work plan tree: product applications and their work packages for one cycle.
//!
//! Nodes live in flat vectors and point at their parent by id. The lookup
//! tables are built once at construction and never mutated.

use std::collections::HashMap;

use crate::domain::foundation::{CropCycleId, ProductApplicationId};

use super::{ProductApplication, WorkPackage};

/// Arena of a cycle's work plan.
#[derive(Debug, Clone, Default)]
pub struct WorkPlan {
    cycle_id: Option<CropCycleId>,
    products: Vec<ProductApplication>,
    packages: Vec<WorkPackage>,
    product_index: HashMap<ProductApplicationId, usize>,
    packages_by_product: HashMap<ProductApplicationId, Vec<usize>>,
}

impl WorkPlan {
    /// Builds the arena and its lookup tables.
    ///
    /// Products are ordered by planned start date then name so that every
    /// reader sees the same sequence. Packages are ordered by execution date.
    pub fn new(
        cycle_id: CropCycleId,
        mut products: Vec<ProductApplication>,
        mut packages: Vec<WorkPackage>,
    ) -> Self {
        products.sort_by(|a, b| {
            a.planned_start_date
                .cmp(&b.planned_start_date)
                .then_with(|| a.product_name.cmp(&b.product_name))
                .then_with(|| a.id.cmp(&b.id))
        });
        packages.sort_by(|a, b| {
            a.execution_date
                .cmp(&b.execution_date)
                .then_with(|| a.id.cmp(&b.id))
        });

        let product_index = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();

        let mut packages_by_product: HashMap<ProductApplicationId, Vec<usize>> = HashMap::new();
        for (i, wp) in packages.iter().enumerate() {
            packages_by_product.entry(wp.product_id).or_default().push(i);
        }

        Self {
            cycle_id: Some(cycle_id),
            products,
            packages,
            product_index,
            packages_by_product,
        }
    }

    /// A plan with no nodes, for blocs without any cycle.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cycle_id(&self) -> Option<CropCycleId> {
        self.cycle_id
    }

    pub fn products(&self) -> &[ProductApplication] {
        &self.products
    }

    pub fn packages(&self) -> &[WorkPackage] {
        &self.packages
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.packages.is_empty()
    }

    pub fn product(&self, id: &ProductApplicationId) -> Option<&ProductApplication> {
        self.product_index.get(id).map(|&i| &self.products[i])
    }

    /// Work packages owned by `product_id`, in execution order.
    pub fn packages_of<'a>(
        &'a self,
        product_id: &ProductApplicationId,
    ) -> impl Iterator<Item = &'a WorkPackage> + 'a {
        self.packages_by_product
            .get(product_id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.packages[i])
    }

    /// Packages whose parent product is not part of this plan.
    pub fn orphan_packages(&self) -> impl Iterator<Item = &WorkPackage> {
        self.packages
            .iter()
            .filter(move |wp| !self.product_index.contains_key(&wp.product_id))
    }
}
