//! A fixed demo data set for exercising the review surface.
//!
//! Eight hand-written leads followed by twelve generated ones. Generation
//! cycles through the vocabularies below with co-prime strides, so the set is
//! varied but identical on every run.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone, Utc};

use crate::{
  Error, Result,
  lead::{Lead, LeadStatus, NewLead, VisaCategory},
  store::LeadStore,
};

const GENERATED: usize = 12;

const FIRST_NAMES: &[&str] = &[
  "John", "Emma", "Carlos", "Priya", "Ali", "Elena", "Luca", "Sophia", "David",
  "Chen",
];

const LAST_NAMES: &[&str] = &[
  "Smith", "Johnson", "Gomez", "Sharma", "Khan", "Fernandez", "Rossi",
  "Dubois", "Taylor", "Li",
];

const COUNTRIES: &[&str] = &[
  "USA", "Canada", "Germany", "India", "Australia", "UK", "France", "Italy",
  "Spain", "Brazil",
];

const STATUSES: &[LeadStatus] = &[
  LeadStatus::Pending,
  LeadStatus::ReachedOut,
  LeadStatus::Approved,
  LeadStatus::Rejected,
];

const VISAS: &[VisaCategory] = &[
  VisaCategory::O1,
  VisaCategory::Eb1a,
  VisaCategory::Eb2Niw,
  VisaCategory::Unsure,
  VisaCategory::H1b,
  VisaCategory::L1,
  VisaCategory::F1,
  VisaCategory::E2,
];

struct Sample {
  first:   &'static str,
  last:    &'static str,
  country: &'static str,
  status:  LeadStatus,
  visas:   &'static [VisaCategory],
  info:    &'static str,
}

const SAMPLES: &[Sample] = &[
  Sample {
    first:   "Jorge",
    last:    "Ruiz",
    country: "Mexico",
    status:  LeadStatus::Pending,
    visas:   &[VisaCategory::O1],
    info:    "Looking for options",
  },
  Sample {
    first:   "Bahar",
    last:    "Zamir",
    country: "Mexico",
    status:  LeadStatus::Pending,
    visas:   &[VisaCategory::Eb1a],
    info:    "Current F-1 visa",
  },
  Sample {
    first:   "Mary",
    last:    "Lopez",
    country: "Brazil",
    status:  LeadStatus::Pending,
    visas:   &[VisaCategory::Eb2Niw],
    info:    "PhD in Computer Science",
  },
  Sample {
    first:   "Li",
    last:    "Zijin",
    country: "South Korea",
    status:  LeadStatus::Pending,
    visas:   &[VisaCategory::O1, VisaCategory::Eb1a],
    info:    "Award-winning researcher",
  },
  Sample {
    first:   "Mark",
    last:    "Antonov",
    country: "Russia",
    status:  LeadStatus::Pending,
    visas:   &[VisaCategory::Eb2Niw],
    info:    "Software engineer with 10 years experience",
  },
  Sample {
    first:   "Jane",
    last:    "Ma",
    country: "Mexico",
    status:  LeadStatus::Pending,
    visas:   &[VisaCategory::Unsure],
    info:    "Looking for options after graduation",
  },
  Sample {
    first:   "Anand",
    last:    "Jain",
    country: "Mexico",
    status:  LeadStatus::ReachedOut,
    visas:   &[VisaCategory::O1],
    info:    "Entrepreneur with multiple startups",
  },
  Sample {
    first:   "Anna",
    last:    "Voronova",
    country: "France",
    status:  LeadStatus::Pending,
    visas:   &[VisaCategory::Eb1a],
    info:    "Researcher in AI",
  },
];

/// Submission time shared by every demo lead.
fn demo_submitted_at() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 2, 2, 14, 45, 0)
    .single()
    .unwrap_or_default()
}

/// The demo leads, in the order they should be inserted.
pub fn sample_leads() -> Vec<NewLead> {
  let submitted_at = demo_submitted_at();

  let named = SAMPLES.iter().map(|s| NewLead {
    first_name: s.first.to_owned(),
    last_name: s.last.to_owned(),
    email: format!("{}@example.com", s.first.to_lowercase()),
    country: s.country.to_owned(),
    linked_in: Some(format!(
      "https://linkedin.com/in/{}",
      s.first.to_lowercase()
    )),
    visas: s.visas.iter().copied().collect(),
    additional_info: Some(s.info.to_owned()),
    resume_file_name: None,
    status: s.status,
    submitted_at,
  });

  let generated = (0..GENERATED).map(|i| {
    let n = SAMPLES.len() + i + 1;
    NewLead {
      first_name: FIRST_NAMES[(i * 3) % FIRST_NAMES.len()].to_owned(),
      last_name: LAST_NAMES[(i * 7) % LAST_NAMES.len()].to_owned(),
      email: format!("user{n}@example.com"),
      country: COUNTRIES[(i * 3 + 1) % COUNTRIES.len()].to_owned(),
      linked_in: Some(format!("https://linkedin.com/in/user{n}")),
      visas: BTreeSet::from([VISAS[(i * 5) % VISAS.len()]]),
      additional_info: Some("Interested in immigration options".to_owned()),
      resume_file_name: None,
      status: STATUSES[i % STATUSES.len()],
      submitted_at,
    }
  });

  named.chain(generated).collect()
}

/// Insert [`sample_leads`] into `store`, returning the stored records.
pub async fn seed<S: LeadStore>(store: &S) -> Result<Vec<Lead>> {
  let mut stored = Vec::with_capacity(SAMPLES.len() + GENERATED);
  for lead in sample_leads() {
    stored.push(store.insert(lead).await.map_err(Error::store)?);
  }
  Ok(stored)
}
