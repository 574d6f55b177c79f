//! [`MemoryStore`]: the in-process implementation of [`LeadStore`].

use std::{collections::BTreeMap, convert::Infallible, sync::Arc};

use tokio::sync::RwLock;

use crate::{
  lead::{Lead, LeadId, LeadStatus, NewLead},
  store::LeadStore,
};

#[derive(Debug, Default)]
struct Inner {
  /// Keyed by id; ids are handed out in increasing order, so iteration order
  /// is insertion order.
  leads:   BTreeMap<LeadId, Lead>,
  last_id: u64,
}

/// A lead store held entirely in memory for the lifetime of the process.
///
/// Writers take the lock exclusively, which serialises `insert` and
/// `update_status`. Cloning is cheap; clones share the same collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl LeadStore for MemoryStore {
  type Error = Infallible;

  async fn insert(&self, input: NewLead) -> Result<Lead, Infallible> {
    let mut inner = self.inner.write().await;
    inner.last_id += 1;
    let id = LeadId(inner.last_id);
    let lead = input.into_lead(id);
    inner.leads.insert(id, lead.clone());
    Ok(lead)
  }

  async fn list(&self) -> Result<Vec<Lead>, Infallible> {
    Ok(self.inner.read().await.leads.values().cloned().collect())
  }

  async fn get(&self, id: LeadId) -> Result<Option<Lead>, Infallible> {
    Ok(self.inner.read().await.leads.get(&id).cloned())
  }

  async fn update_status(
    &self,
    id: LeadId,
    status: LeadStatus,
  ) -> Result<Option<Lead>, Infallible> {
    let mut inner = self.inner.write().await;
    Ok(inner.leads.get_mut(&id).map(|lead| {
      lead.status = status;
      lead.clone()
    }))
  }
}
