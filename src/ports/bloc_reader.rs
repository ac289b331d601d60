//! Bloc reader port.
//!
//! Blocs are registered and mapped elsewhere; this service only reads them.

use crate::domain::bloc::Bloc;
use crate::domain::foundation::{BlocId, DomainError};
use async_trait::async_trait;

#[async_trait]
pub trait BlocReader: Send + Sync {
    /// Returns `None` if the bloc is unknown.
    async fn find_by_id(&self, id: &BlocId) -> Result<Option<Bloc>, DomainError>;
}
