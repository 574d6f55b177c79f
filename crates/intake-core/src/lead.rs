//! Lead types, the single entity of the intake service.
//!
//! A lead is one applicant's case-assessment request. Every field except
//! `status` is fixed at creation; the status moves through the review pipeline
//! via [`crate::lifecycle::transition`].

use std::{collections::BTreeSet, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Store-assigned identifier. Strictly increasing in insertion order and never
/// reused.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct LeadId(pub u64);

impl fmt::Display for LeadId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// The review-pipeline stage of a lead.
///
/// Intake only ever produces [`LeadStatus::Pending`]. `Approved` and
/// `Rejected` exist for richer data sets (see [`crate::demo`]); the review
/// surface only offers the `Pending → ReachedOut` step.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LeadStatus {
  #[default]
  Pending,
  ReachedOut,
  Approved,
  Rejected,
}

impl LeadStatus {
  /// The wire name, e.g. `"REACHED_OUT"`.
  pub fn as_str(self) -> &'static str { self.into() }

  /// Human-readable label shown to reviewers.
  pub fn label(self) -> &'static str {
    match self {
      Self::Pending => "Pending",
      Self::ReachedOut => "Reached Out",
      Self::Approved => "Approved",
      Self::Rejected => "Rejected",
    }
  }

  /// The one status change the review surface offers from this status.
  ///
  /// This is a presentation rule only. [`crate::lifecycle::transition`]
  /// accepts any target status.
  pub fn review_action(self) -> Option<LeadStatus> {
    match self {
      Self::Pending => Some(Self::ReachedOut),
      _ => None,
    }
  }
}

// ─── Visa categories ─────────────────────────────────────────────────────────

/// A type of immigration visa the applicant is interested in.
///
/// The first four variants are the ones offered on the intake form; the rest
/// appear in imported or demo data.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
pub enum VisaCategory {
  #[serde(rename = "O-1")]
  #[strum(serialize = "O-1")]
  O1,
  #[serde(rename = "EB-1A")]
  #[strum(serialize = "EB-1A")]
  Eb1a,
  #[serde(rename = "EB-2 NIW")]
  #[strum(serialize = "EB-2 NIW")]
  Eb2Niw,
  #[serde(rename = "I don't know")]
  #[strum(serialize = "I don't know")]
  Unsure,
  #[serde(rename = "H-1B")]
  #[strum(serialize = "H-1B")]
  H1b,
  #[serde(rename = "L-1")]
  #[strum(serialize = "L-1")]
  L1,
  #[serde(rename = "F-1")]
  #[strum(serialize = "F-1")]
  F1,
  #[serde(rename = "E-2")]
  #[strum(serialize = "E-2")]
  E2,
}

impl VisaCategory {
  pub fn as_str(self) -> &'static str { self.into() }

  /// Whether the public intake form offers this category.
  pub fn on_intake_form(self) -> bool {
    matches!(self, Self::O1 | Self::Eb1a | Self::Eb2Niw | Self::Unsure)
  }
}

// ─── Lead ────────────────────────────────────────────────────────────────────

/// A stored lead. Only `status` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
  pub id:               LeadId,
  pub first_name:       String,
  pub last_name:        String,
  pub email:            String,
  pub country:          String,
  pub linked_in:        Option<String>,
  /// Never empty for leads created through intake.
  pub visas:            BTreeSet<VisaCategory>,
  pub additional_info:  Option<String>,
  /// Original filename of the uploaded résumé; the bytes live elsewhere.
  pub resume_file_name: Option<String>,
  pub status:           LeadStatus,
  /// Set once at creation.
  pub submitted_at:     DateTime<Utc>,
}

impl Lead {
  /// `"{first_name} {last_name}"`, the projection the search term matches.
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }
}

// ─── NewLead ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::LeadStore::insert`]. The id is always assigned by
/// the store; it is not accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
  pub first_name:       String,
  pub last_name:        String,
  pub email:            String,
  pub country:          String,
  pub linked_in:        Option<String>,
  pub visas:            BTreeSet<VisaCategory>,
  pub additional_info:  Option<String>,
  pub resume_file_name: Option<String>,
  pub status:           LeadStatus,
  pub submitted_at:     DateTime<Utc>,
}

impl NewLead {
  /// The stored record for this input under the store-assigned `id`.
  pub fn into_lead(self, id: LeadId) -> Lead {
    Lead {
      id,
      first_name: self.first_name,
      last_name: self.last_name,
      email: self.email,
      country: self.country,
      linked_in: self.linked_in,
      visas: self.visas,
      additional_info: self.additional_info,
      resume_file_name: self.resume_file_name,
      status: self.status,
      submitted_at: self.submitted_at,
    }
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn status_wire_names() {
    assert_eq!(LeadStatus::ReachedOut.as_str(), "REACHED_OUT");
    assert_eq!(
      LeadStatus::from_str("APPROVED").unwrap(),
      LeadStatus::Approved
    );
    assert!(LeadStatus::from_str("reached_out").is_err());
    assert_eq!(
      serde_json::to_string(&LeadStatus::Pending).unwrap(),
      "\"PENDING\""
    );
  }

  #[test]
  fn review_action_only_from_pending() {
    assert_eq!(
      LeadStatus::Pending.review_action(),
      Some(LeadStatus::ReachedOut)
    );
    for status in LeadStatus::iter().filter(|s| *s != LeadStatus::Pending) {
      assert_eq!(status.review_action(), None);
    }
  }

  #[test]
  fn visa_labels_round_trip_through_strum_and_serde() {
    for visa in VisaCategory::iter() {
      assert_eq!(VisaCategory::from_str(visa.as_str()).unwrap(), visa);
      let json = serde_json::to_string(&visa).unwrap();
      assert_eq!(json, format!("\"{}\"", visa.as_str()));
    }
    assert_eq!(
      VisaCategory::from_str("I don't know").unwrap(),
      VisaCategory::Unsure
    );
  }

  #[test]
  fn lead_serialises_with_camel_case_fields() {
    let lead = Lead {
      id:               LeadId(3),
      first_name:       "Mary".into(),
      last_name:        "Lopez".into(),
      email:            "mary@example.com".into(),
      country:          "Brazil".into(),
      linked_in:        None,
      visas:            BTreeSet::from([VisaCategory::Eb2Niw]),
      additional_info:  None,
      resume_file_name: Some("cv.pdf".into()),
      status:           LeadStatus::Pending,
      submitted_at:     Utc::now(),
    };
    let json = serde_json::to_value(&lead).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["firstName"], "Mary");
    assert_eq!(json["resumeFileName"], "cv.pdf");
    assert_eq!(json["visas"][0], "EB-2 NIW");
    assert_eq!(json["status"], "PENDING");
  }
}
