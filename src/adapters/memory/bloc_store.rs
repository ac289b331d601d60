//! In-memory bloc store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::bloc::Bloc;
use crate::domain::foundation::{BlocId, DomainError};
use crate::ports::BlocReader;

#[derive(Debug, Clone, Default)]
pub struct InMemoryBlocStore {
    blocs: Arc<RwLock<HashMap<BlocId, Bloc>>>,
}

impl InMemoryBlocStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a bloc.
    pub async fn insert(&self, bloc: Bloc) {
        self.blocs.write().await.insert(bloc.id().clone(), bloc);
    }

    pub async fn is_empty(&self) -> bool {
        self.blocs.read().await.is_empty()
    }
}

#[async_trait]
impl BlocReader for InMemoryBlocStore {
    async fn find_by_id(&self, id: &BlocId) -> Result<Option<Bloc>, DomainError> {
        Ok(self.blocs.read().await.get(id).cloned())
    }
}
