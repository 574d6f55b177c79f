//! Status transitions.
//!
//! A transition overwrites the status of one lead. Any enumerated status may
//! be set from any other; the review surface narrows this to the single step
//! given by [`LeadStatus::review_action`].

use crate::{
  Error, Result,
  lead::{Lead, LeadId, LeadStatus},
  store::LeadStore,
};

/// Set the status of lead `id` to `target` and return the updated record.
///
/// Fails with [`Error::LeadNotFound`] when no lead has this id. No other field
/// and no other lead is touched.
pub async fn transition<S: LeadStore>(
  store: &S,
  id: LeadId,
  target: LeadStatus,
) -> Result<Lead> {
  store
    .update_status(id, target)
    .await
    .map_err(Error::store)?
    .ok_or(Error::LeadNotFound(id))
}

/// Retrieve one lead, failing with [`Error::LeadNotFound`] when it is absent.
pub async fn get_lead<S: LeadStore>(store: &S, id: LeadId) -> Result<Lead> {
  store
    .get(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::LeadNotFound(id))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{MemoryStore, testing::new_lead};

  #[tokio::test]
  async fn transition_changes_only_the_target_status() {
    let store = MemoryStore::new();
    let a = store.insert(new_lead("Jorge", "Mexico")).await.unwrap();
    let b = store.insert(new_lead("Bahar", "Mexico")).await.unwrap();

    let updated = transition(&store, a.id, LeadStatus::ReachedOut)
      .await
      .unwrap();
    assert_eq!(updated.status, LeadStatus::ReachedOut);
    assert_eq!(
      Lead {
        status: LeadStatus::Pending,
        ..updated.clone()
      },
      a
    );

    assert_eq!(get_lead(&store, a.id).await.unwrap(), updated);
    assert_eq!(get_lead(&store, b.id).await.unwrap(), b);
  }

  #[tokio::test]
  async fn transition_is_permissive() {
    let store = MemoryStore::new();
    let lead = store.insert(new_lead("Mark", "Russia")).await.unwrap();
    for target in [
      LeadStatus::Rejected,
      LeadStatus::Pending,
      LeadStatus::Approved,
      LeadStatus::ReachedOut,
    ] {
      let updated = transition(&store, lead.id, target).await.unwrap();
      assert_eq!(updated.status, target);
    }
  }

  #[tokio::test]
  async fn transition_unknown_id_is_not_found() {
    let store = MemoryStore::new();
    store.insert(new_lead("Jane", "Mexico")).await.unwrap();
    let err = transition(&store, LeadId(99), LeadStatus::ReachedOut)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::LeadNotFound(LeadId(99))));
  }

  #[tokio::test]
  async fn get_lead_unknown_id_is_not_found() {
    let store = MemoryStore::new();
    assert!(matches!(
      get_lead(&store, LeadId(1)).await,
      Err(Error::LeadNotFound(LeadId(1)))
    ));
  }
}
