//! Shared fixtures for unit tests.

use std::collections::BTreeSet;

use chrono::Utc;

use crate::lead::{LeadStatus, NewLead, VisaCategory};

/// A well-formed pending lead with the given first name and country.
pub fn new_lead(first: &str, country: &str) -> NewLead {
  NewLead {
    first_name:       first.into(),
    last_name:        "Tester".into(),
    email:            format!("{}@example.com", first.to_lowercase()),
    country:          country.into(),
    linked_in:        None,
    visas:            BTreeSet::from([VisaCategory::O1]),
    additional_info:  None,
    resume_file_name: None,
    status:           LeadStatus::Pending,
    submitted_at:     Utc::now(),
  }
}
