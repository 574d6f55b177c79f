//! Intake: turning a raw form submission into a stored lead.
//!
//! [`IntakePolicy::validate`] checks every field and reports all violations
//! at once; nothing reaches the store unless the whole submission is valid.

use std::{collections::BTreeSet, fmt, str::FromStr, sync::LazyLock};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::Display;
use url::Url;

use crate::{
  Error, Result,
  lead::{Lead, LeadStatus, NewLead, VisaCategory},
  store::LeadStore,
};

/// Countries offered by the intake form.
pub const DEFAULT_COUNTRIES: &[&str] = &[
  "United States",
  "Canada",
  "Mexico",
  "Brazil",
  "Argentina",
  "United Kingdom",
  "France",
  "Germany",
  "Spain",
  "Italy",
  "Russia",
  "China",
  "Japan",
  "South Korea",
  "India",
  "Australia",
  "New Zealand",
  "South Africa",
  "Nigeria",
  "Egypt",
];

// Local part and domain; leading dots and `..` are rejected separately.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
  )
  .expect("email pattern compiles")
});

// ─── Raw input ───────────────────────────────────────────────────────────────

/// A submission exactly as received from the form. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
  pub first_name:       Option<String>,
  pub last_name:        Option<String>,
  pub email:            Option<String>,
  pub country:          Option<String>,
  pub linked_in:        Option<String>,
  #[serde(default)]
  pub visas:            Vec<String>,
  pub additional_info:  Option<String>,
  /// Filename of the attached résumé, if one was uploaded.
  pub resume_file_name: Option<String>,
}

// ─── Violations ──────────────────────────────────────────────────────────────

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Field {
  FirstName,
  LastName,
  Email,
  Country,
  LinkedIn,
  Visas,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
  pub field:   Field,
  pub message: String,
}

/// Every field-level problem found in one submission. Never empty when
/// returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
  fn push(&mut self, field: Field, message: impl Into<String>) {
    self.0.push(Violation {
      field,
      message: message.into(),
    });
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn iter(&self) -> impl Iterator<Item = &Violation> { self.0.iter() }

  /// Whether any violation names `field`.
  pub fn contains(&self, field: Field) -> bool {
    self.0.iter().any(|v| v.field == field)
  }
}

impl fmt::Display for Violations {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, v) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{}: {}", v.field, v.message)?;
    }
    Ok(())
  }
}

// ─── Policy ──────────────────────────────────────────────────────────────────

/// Validation settings that vary per deployment.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
  /// Known country names, in display order.
  pub countries:          Vec<String>,
  /// Reject countries not in `countries`. Off by default so new countries can
  /// be submitted before the list is updated.
  pub restrict_countries: bool,
}

impl Default for IntakePolicy {
  fn default() -> Self {
    Self {
      countries:          DEFAULT_COUNTRIES
        .iter()
        .map(|c| (*c).to_owned())
        .collect(),
      restrict_countries: false,
    }
  }
}

impl IntakePolicy {
  /// Validate and normalise `raw` into a pending lead stamped with `now`.
  pub fn validate(
    &self,
    raw: RawSubmission,
    now: DateTime<Utc>,
  ) -> Result<NewLead, Violations> {
    let mut violations = Violations::default();

    let first_name = required(raw.first_name);
    if first_name.is_none() {
      violations.push(Field::FirstName, "First name is required");
    }

    let last_name = required(raw.last_name);
    if last_name.is_none() {
      violations.push(Field::LastName, "Last name is required");
    }

    let email = required(raw.email);
    match email.as_deref() {
      None => violations.push(Field::Email, "Email is required"),
      Some(e) if !is_valid_email(e) => {
        violations.push(Field::Email, "Invalid email address")
      }
      Some(_) => {}
    }

    let country = required(raw.country).map(|c| self.canonical_country(c));
    match &country {
      None => violations.push(Field::Country, "Country is required"),
      Some(c) if self.restrict_countries && !self.is_known_country(c) => {
        violations.push(Field::Country, format!("Unknown country: {c}"))
      }
      Some(_) => {}
    }

    let linked_in = required(raw.linked_in);
    if let Some(link) = &linked_in
      && !is_valid_url(link)
    {
      violations.push(Field::LinkedIn, "Invalid URL");
    }

    let mut visas = BTreeSet::new();
    for label in raw.visas.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
      match VisaCategory::from_str(label) {
        Ok(visa) if visa.on_intake_form() => {
          visas.insert(visa);
        }
        Ok(visa) => violations.push(
          Field::Visas,
          format!("Visa category not offered on the intake form: {visa}"),
        ),
        Err(_) => violations
          .push(Field::Visas, format!("Unknown visa category: {label}")),
      }
    }
    if visas.is_empty() && !violations.contains(Field::Visas) {
      violations.push(Field::Visas, "Select at least one visa category");
    }

    match (first_name, last_name, email, country) {
      (Some(first_name), Some(last_name), Some(email), Some(country))
        if violations.is_empty() =>
      {
        Ok(NewLead {
          first_name,
          last_name,
          email,
          country,
          linked_in,
          visas,
          additional_info: required(raw.additional_info),
          resume_file_name: raw
            .resume_file_name
            .as_deref()
            .and_then(base_file_name),
          status: LeadStatus::Pending,
          submitted_at: now,
        })
      }
      _ => Err(violations),
    }
  }

  fn is_known_country(&self, country: &str) -> bool {
    self.countries.iter().any(|c| c == country)
  }

  /// Use the list's spelling when the submitted name matches ignoring case.
  fn canonical_country(&self, country: String) -> String {
    self
      .countries
      .iter()
      .find(|c| c.eq_ignore_ascii_case(&country))
      .cloned()
      .unwrap_or(country)
  }
}

/// Validate `raw` and insert it as a new pending lead.
///
/// On failure returns [`Error::Validation`] with every violation; the store is
/// not touched.
pub async fn submit<S: LeadStore>(
  store: &S,
  policy: &IntakePolicy,
  raw: RawSubmission,
) -> Result<Lead> {
  let new_lead = policy.validate(raw, Utc::now()).map_err(Error::Validation)?;
  store.insert(new_lead).await.map_err(Error::store)
}

// ─── Field rules ─────────────────────────────────────────────────────────────

/// Trimmed value, or `None` when missing or blank.
fn required(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

fn is_valid_email(email: &str) -> bool {
  !email.starts_with('.') && !email.contains("..") && EMAIL.is_match(email)
}

fn is_valid_url(link: &str) -> bool {
  Url::parse(link)
    .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
}

/// Strip any directory components some browsers include in upload names.
fn base_file_name(name: &str) -> Option<String> {
  let base = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
  (!base.is_empty()).then(|| base.to_owned())
}
