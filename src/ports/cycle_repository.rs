//! Crop cycle repository port.
//!
//! Defines the contract for persisting and retrieving CropCycle aggregates.
//!
//! # Atomicity
//!
//! `insert_active` and `close_active` are conditional writes: the "no other
//! active cycle on this bloc" and "still active" checks happen in the same
//! step as the write. Implementations backed by a store with per-row
//! conditional writes need no in-process lock.

use crate::domain::crop_cycle::CropCycle;
use crate::domain::foundation::{BlocId, CropCycleId, DomainError};
use async_trait::async_trait;

/// Repository port for CropCycle aggregate persistence.
#[async_trait]
pub trait CropCycleRepository: Send + Sync {
    /// Stores a new active cycle if its bloc has no active cycle.
    ///
    /// # Errors
    ///
    /// - `ActiveCycleExists` if the bloc already has an active cycle at commit time
    /// - `UnsupportedOperation` if the backend is read-only
    /// - `Unavailable` / `DatabaseError` on persistence failure
    async fn insert_active(&self, cycle: &CropCycle) -> Result<(), DomainError>;

    /// Persists a closed cycle if the stored record is still active.
    ///
    /// # Errors
    ///
    /// - `CycleNotFound` if the cycle doesn't exist
    /// - `CycleAlreadyClosed` if another request closed it first
    /// - `UnsupportedOperation` if the backend is read-only
    async fn close_active(&self, cycle: &CropCycle) -> Result<(), DomainError>;

    /// Finds a cycle by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &CropCycleId) -> Result<Option<CropCycle>, DomainError>;

    /// Finds the single active cycle of a bloc.
    async fn find_active_by_bloc(&self, bloc_id: &BlocId)
        -> Result<Option<CropCycle>, DomainError>;

    /// All cycles of a bloc, most recent first (by cycle number).
    async fn find_history_by_bloc(&self, bloc_id: &BlocId) -> Result<Vec<CropCycle>, DomainError>;
}
