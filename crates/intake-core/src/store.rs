//! The `LeadStore` trait.
//!
//! Implemented by [`crate::memory::MemoryStore`] and by persistence backends
//! (e.g. `intake-store-sqlite`). Higher layers depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::lead::{Lead, LeadId, LeadStatus, NewLead};

/// Abstraction over the authoritative collection of leads.
///
/// Leads are never deleted. `insert` and `update_status` must be applied
/// atomically with respect to each other; each implementation documents how
/// it serialises them.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait LeadStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Assign the next id (strictly greater than every id handed out before),
  /// append the lead and return the stored record.
  fn insert(
    &self,
    input: NewLead,
  ) -> impl Future<Output = Result<Lead, Self::Error>> + Send + '_;

  /// All leads in insertion order.
  fn list(&self) -> impl Future<Output = Result<Vec<Lead>, Self::Error>> + Send + '_;

  /// Retrieve a lead by id. Returns `None` if not found.
  fn get(
    &self,
    id: LeadId,
  ) -> impl Future<Output = Result<Option<Lead>, Self::Error>> + Send + '_;

  /// Overwrite the status of a lead in place and return the updated record.
  /// Returns `None` if no lead has this id.
  fn update_status(
    &self,
    id: LeadId,
    status: LeadStatus,
  ) -> impl Future<Output = Result<Option<Lead>, Self::Error>> + Send + '_;
}
