//! Handlers for `/leads` endpoints.
//!
//! | Method  | Path | Auth | Notes |
//! |---------|------|------|-------|
//! | `GET`   | `/leads` | reviewer | Optional `status`, `search`, `page`, `page_size` |
//! | `POST`  | `/leads` | public | `multipart/form-data` intake form; returns 201 |
//! | `GET`   | `/leads/{id}` | reviewer | 404 if not found |
//! | `PATCH` | `/leads/{id}/status` | reviewer | Body: `{"status":"REACHED_OUT"}` |

use std::str::FromStr;

use axum::{
  Json,
  extract::{Multipart, State, multipart::MultipartRejection},
  http::StatusCode,
  response::IntoResponse,
};
use intake_core::{
  intake::{self, RawSubmission},
  lead::{Lead, LeadId, LeadStatus},
  lifecycle,
  query::{self, Page, ReviewCursor},
  store::LeadStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  AppState, MAX_PAGE_SIZE,
  auth::Reviewer,
  error::ApiError,
  extract::{JsonBody, Path, Query},
};

/// Successful response for operations that produce one lead.
#[derive(Debug, Serialize)]
pub struct LeadResponse {
  pub success: bool,
  pub lead:    Lead,
}

impl From<Lead> for LeadResponse {
  fn from(lead: Lead) -> Self {
    Self {
      success: true,
      lead,
    }
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Status wire name; empty or `ALL` means every status.
  pub status:    Option<String>,
  /// Case-insensitive match on name, email or country.
  pub search:    Option<String>,
  /// 1-indexed; defaults to 1.
  pub page:      Option<usize>,
  /// Defaults to the configured page size.
  pub page_size: Option<usize>,
}

/// `GET /leads[?status=...][&search=...][&page=...][&page_size=...]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  _reviewer: Reviewer,
  Query(params): Query<ListParams>,
) -> Result<Json<Page<Lead>>, ApiError>
where
  S: LeadStore + Clone + 'static,
{
  let status = match params.status.as_deref() {
    Some(raw) => query::parse_status_filter(raw)?,
    None => None,
  };

  let page = params.page.unwrap_or(1);
  if page == 0 {
    return Err(ApiError::BadRequest("page starts at 1".to_owned()));
  }
  let page_size = params.page_size.unwrap_or(state.page_size);
  if page_size == 0 || page_size > MAX_PAGE_SIZE {
    return Err(ApiError::BadRequest(format!(
      "page_size must be between 1 and {MAX_PAGE_SIZE}"
    )));
  }

  // Filters first, so their page reset cannot discard the requested page.
  let mut cursor = ReviewCursor::new(page_size);
  cursor.set_status(status);
  cursor.set_search(params.search);
  cursor.set_page(page);

  let page = query::list_leads(
    state.store.as_ref(),
    cursor.query(),
    cursor.page_request(),
  )
  .await?;
  Ok(Json(page))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /leads/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  _reviewer: Reviewer,
  Path(id): Path<LeadId>,
) -> Result<Json<Lead>, ApiError>
where
  S: LeadStore + Clone + 'static,
{
  let lead = lifecycle::get_lead(state.store.as_ref(), id).await?;
  Ok(Json(lead))
}

// ─── Submit ───────────────────────────────────────────────────────────────────

/// Collect the intake form fields. Repeated `visas` fields accumulate; the
/// `resume` part contributes only its filename.
async fn read_submission(
  mut multipart: Multipart,
) -> Result<RawSubmission, ApiError> {
  let mut raw = RawSubmission::default();

  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| ApiError::BadRequest(e.body_text()))?
  {
    let Some(name) = field.name().map(str::to_owned) else {
      continue;
    };

    if name == "resume" {
      // The document itself belongs to a file-storage collaborator.
      raw.resume_file_name = field.file_name().map(str::to_owned);
      continue;
    }

    let value = field
      .text()
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;

    match name.as_str() {
      "firstName" => raw.first_name = Some(value),
      "lastName" => raw.last_name = Some(value),
      "email" => raw.email = Some(value),
      "country" => raw.country = Some(value),
      "linkedIn" => raw.linked_in = Some(value),
      "visas" => raw.visas.push(value),
      "additionalInfo" => raw.additional_info = Some(value),
      other => tracing::debug!(field = other, "ignoring unknown form field"),
    }
  }

  Ok(raw)
}

/// `POST /leads`: returns 201 + `{"success": true, "lead": ...}`.
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: LeadStore + Clone + 'static,
{
  let raw = read_submission(multipart?).await?;

  let lead = match intake::submit(state.store.as_ref(), &state.policy, raw).await {
    Ok(lead) => lead,
    Err(intake_core::Error::Validation(violations)) => {
      tracing::info!(%violations, "submission rejected");
      return Err(ApiError::Validation(violations));
    }
    Err(e) => return Err(e.into()),
  };

  tracing::info!(lead_id = %lead.id, country = %lead.country, "lead submitted");
  Ok((StatusCode::CREATED, Json(LeadResponse::from(lead))))
}

// ─── Set status ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: String,
}

/// `PATCH /leads/{id}/status`, body `{"status":"REACHED_OUT"}`.
///
/// Any status may be set; the review UI only ever asks for `REACHED_OUT`.
pub async fn set_status<S>(
  State(state): State<AppState<S>>,
  Reviewer(reviewer): Reviewer,
  Path(id): Path<LeadId>,
  JsonBody(body): JsonBody<StatusBody>,
) -> Result<Json<LeadResponse>, ApiError>
where
  S: LeadStore + Clone + 'static,
{
  let status = LeadStatus::from_str(body.status.trim()).map_err(|_| {
    ApiError::BadRequest(format!("unknown lead status: {:?}", body.status))
  })?;

  let lead = lifecycle::transition(state.store.as_ref(), id, status).await?;
  tracing::info!(lead_id = %id, %status, %reviewer, "lead status updated");
  Ok(Json(LeadResponse::from(lead)))
}
