//! Static catalog adapter.
//!
//! Loads reference data once, from a YAML file or from the catalog compiled
//! into the binary, and serves it from memory.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

use crate::domain::catalog::Catalog;
use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::CatalogProvider;

static DEFAULT_CATALOG_YAML: &str = include_str!("../../../catalog/default.yaml");

static DEFAULT_CATALOG: Lazy<Result<Arc<Catalog>, CatalogLoadError>> =
    Lazy::new(|| parse_catalog(DEFAULT_CATALOG_YAML).map(Arc::new));

/// Errors that can occur while loading a catalog.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog file: {0}")]
    Io(String),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] ValidationError),
}

/// In-memory catalog provider.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    catalog: Arc<Catalog>,
}

impl StaticCatalog {
    /// Wraps an already built catalog after validating it.
    pub fn new(catalog: Catalog) -> Result<Self, CatalogLoadError> {
        catalog.validate()?;
        Ok(Self {
            catalog: Arc::new(catalog),
        })
    }

    /// The catalog shipped with the binary.
    pub fn embedded() -> Result<Self, CatalogLoadError> {
        let catalog = DEFAULT_CATALOG.as_ref().map_err(Clone::clone)?;
        Ok(Self {
            catalog: Arc::clone(catalog),
        })
    }

    /// Loads a catalog from a YAML file.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogLoadError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .await
            .map_err(|e| CatalogLoadError::Io(format!("{}: {}", path.display(), e)))?;
        let catalog = parse_catalog(&yaml)?;
        tracing::info!(
            path = %path.display(),
            varieties = catalog.varieties.len(),
            products = catalog.products.len(),
            "Loaded catalog"
        );
        Ok(Self {
            catalog: Arc::new(catalog),
        })
    }
}

fn parse_catalog(yaml: &str) -> Result<Catalog, CatalogLoadError> {
    let catalog: Catalog =
        serde_yaml::from_str(yaml).map_err(|e| CatalogLoadError::Parse(e.to_string()))?;
    catalog.validate()?;
    Ok(catalog)
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn catalog(&self) -> Result<Arc<Catalog>, DomainError> {
        Ok(Arc::clone(&self.catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::VarietyCategory;
    use crate::domain::foundation::VarietyId;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn embedded_catalog_parses_and_validates() {
        let provider = StaticCatalog::embedded().unwrap();
        let catalog = provider.catalog().await.unwrap();

        assert!(!catalog.varieties.is_empty());
        assert_eq!(catalog.operation_methods.len(), 5);
        let r579 = catalog.variety(&VarietyId::new("r-579").unwrap()).unwrap();
        assert_eq!(r579.category, VarietyCategory::Sugarcane);
    }

    #[tokio::test]
    async fn find_variety_uses_catalog() {
        let provider = StaticCatalog::embedded().unwrap();
        let found = provider
            .find_variety(&VarietyId::new("potato").unwrap())
            .await
            .unwrap();
        assert_eq!(found.unwrap().category, VarietyCategory::Intercrop);
    }

    #[tokio::test]
    async fn loads_catalog_from_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "varieties:\n  - id: local-1\n    name: Local One\n    category: sugarcane\n"
        )
        .unwrap();

        let provider = StaticCatalog::from_path(file.path()).await.unwrap();
        let catalog = provider.catalog().await.unwrap();
        assert_eq!(catalog.varieties.len(), 1);
        assert!(catalog.products.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = StaticCatalog::from_path("/definitely/not/here.yaml")
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io(_)));
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "varieties:\n  - id: a\n    name: A\n    category: sugarcane\n  - id: a\n    name: B\n    category: intercrop\n"
        )
        .unwrap();

        let err = StaticCatalog::from_path(file.path()).await.unwrap_err();
        assert!(matches!(err, CatalogLoadError::Invalid(_)));
    }
}
