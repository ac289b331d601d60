//! Catalog provider port.

use std::sync::Arc;

use crate::domain::catalog::{Catalog, Variety};
use crate::domain::foundation::{DomainError, VarietyId};
use async_trait::async_trait;

/// Supplies read-only reference data.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// The complete catalog.
    async fn catalog(&self) -> Result<Arc<Catalog>, DomainError>;

    /// Looks up a single variety.
    async fn find_variety(&self, id: &VarietyId) -> Result<Option<Variety>, DomainError> {
        Ok(self.catalog().await?.variety(id).cloned())
    }
}
