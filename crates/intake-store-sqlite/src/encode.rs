//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, statuses by their wire name and
//! the visa set as a compact JSON array of labels.

use std::{collections::BTreeSet, str::FromStr};

use chrono::{DateTime, Utc};
use intake_core::lead::{Lead, LeadId, LeadStatus, VisaCategory};

use crate::{Error, Result};

// ─── LeadId ───────────────────────────────────────────────────────────────────

/// `None` when `id` is beyond the rowid range, so no row can carry it.
pub fn encode_id(id: LeadId) -> Option<i64> { i64::try_from(id.0).ok() }

pub fn decode_id(raw: i64) -> Result<LeadId> {
  u64::try_from(raw)
    .map(LeadId)
    .map_err(|_| Error::IdOutOfRange(raw))
}

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── LeadStatus ───────────────────────────────────────────────────────────────

pub fn encode_status(s: LeadStatus) -> &'static str { s.as_str() }

pub fn decode_status(s: &str) -> Result<LeadStatus> {
  LeadStatus::from_str(s).map_err(|_| Error::UnknownValue {
    column: "status",
    value:  s.to_owned(),
  })
}

// ─── Visas ────────────────────────────────────────────────────────────────────

pub fn encode_visas(visas: &BTreeSet<VisaCategory>) -> Result<String> {
  Ok(serde_json::to_string(visas)?)
}

pub fn decode_visas(s: &str) -> Result<BTreeSet<VisaCategory>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawLead`].
pub const LEAD_COLUMNS: &str = "id, first_name, last_name, email, country, \
  linked_in, visas, additional_info, resume_file_name, status, submitted_at";

/// Raw values read directly from a `leads` row.
pub struct RawLead {
  pub id:               i64,
  pub first_name:       String,
  pub last_name:        String,
  pub email:            String,
  pub country:          String,
  pub linked_in:        Option<String>,
  pub visas:            String,
  pub additional_info:  Option<String>,
  pub resume_file_name: Option<String>,
  pub status:           String,
  pub submitted_at:     String,
}

impl RawLead {
  /// Read a row selected with [`LEAD_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      first_name:       row.get(1)?,
      last_name:        row.get(2)?,
      email:            row.get(3)?,
      country:          row.get(4)?,
      linked_in:        row.get(5)?,
      visas:            row.get(6)?,
      additional_info:  row.get(7)?,
      resume_file_name: row.get(8)?,
      status:           row.get(9)?,
      submitted_at:     row.get(10)?,
    })
  }

  pub fn into_lead(self) -> Result<Lead> {
    Ok(Lead {
      id:               decode_id(self.id)?,
      first_name:       self.first_name,
      last_name:        self.last_name,
      email:            self.email,
      country:          self.country,
      linked_in:        self.linked_in,
      visas:            decode_visas(&self.visas)?,
      additional_info:  self.additional_info,
      resume_file_name: self.resume_file_name,
      status:           decode_status(&self.status)?,
      submitted_at:     decode_dt(&self.submitted_at)?,
    })
  }
}
