//! Handler for `GET /vocabulary`: the closed sets callers render as choices.

use axum::{Json, extract::State};
use intake_core::{
  lead::{LeadStatus, VisaCategory},
  store::LeadStore,
};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct StatusEntry {
  pub value: &'static str,
  pub label: &'static str,
  /// The status the review surface offers to move to, if any.
  pub next:  Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct Vocabulary {
  pub statuses:  Vec<StatusEntry>,
  /// Visa categories offered on the intake form.
  pub visas:     Vec<&'static str>,
  pub countries: Vec<String>,
}

/// `GET /vocabulary`
pub async fn handler<S>(State(state): State<AppState<S>>) -> Json<Vocabulary>
where
  S: LeadStore + Clone + 'static,
{
  Json(Vocabulary {
    statuses:  LeadStatus::iter()
      .map(|s| StatusEntry {
        value: s.as_str(),
        label: s.label(),
        next:  s.review_action().map(LeadStatus::as_str),
      })
      .collect(),
    visas:     VisaCategory::iter()
      .filter(|v| v.on_intake_form())
      .map(VisaCategory::as_str)
      .collect(),
    countries: state.policy.countries.clone(),
  })
}
