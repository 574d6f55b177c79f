//! JSON REST API for the lead intake service.
//!
//! Exposes an axum [`Router`] backed by any [`intake_core::store::LeadStore`].
//! The intake form and vocabulary are public; every review endpoint requires
//! reviewer credentials (see [`auth`]). TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", intake_api::api_router(state))
//! ```

pub mod auth;
pub mod error;
pub mod extract;
pub mod leads;
pub mod vocabulary;

use std::sync::Arc;

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, patch},
};
use intake_core::{intake::IntakePolicy, query::DEFAULT_PAGE_SIZE, store::LeadStore};

pub use auth::AuthConfig;
pub use error::ApiError;

/// Largest request body accepted by the intake form, résumé included.
pub const MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;

/// Upper bound on `page_size` in list requests.
pub const MAX_PAGE_SIZE: usize = 100;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: LeadStore> {
  pub store:     Arc<S>,
  pub auth:      Arc<AuthConfig>,
  pub policy:    Arc<IntakePolicy>,
  /// Page size used when a list request does not give one.
  pub page_size: usize,
}

impl<S: LeadStore> AppState<S> {
  pub fn new(store: Arc<S>, auth: AuthConfig) -> Self {
    Self {
      store,
      auth: Arc::new(auth),
      policy: Arc::new(IntakePolicy::default()),
      page_size: DEFAULT_PAGE_SIZE,
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: LeadStore + Clone + 'static,
{
  Router::new()
    .route("/vocabulary", get(vocabulary::handler::<S>))
    .route(
      "/leads",
      get(leads::list::<S>)
        .post(leads::submit::<S>)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
    )
    .route("/leads/{id}", get(leads::get_one::<S>))
    .route("/leads/{id}/status", patch(leads::set_status::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use intake_core::{MemoryStore, demo};
  use rand_core::OsRng;
  use serde_json::Value;
  use tower::ServiceExt as _;

  const BOUNDARY: &str = "intake-test-boundary";

  pub(crate) fn make_state(password: &str) -> AppState<MemoryStore> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string();

    AppState::new(Arc::new(MemoryStore::new()), AuthConfig {
      username:      "reviewer".to_string(),
      password_hash: hash,
    })
  }

  async fn seeded_state() -> AppState<MemoryStore> {
    let state = make_state("secret");
    demo::seed(state.store.as_ref()).await.unwrap();
    state
  }

  pub(crate) fn basic(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  fn form_body(fields: &[(&str, &str)], resume: Option<&str>) -> String {
    let mut body = String::new();
    for (name, value) in fields {
      body.push_str(&format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
      ));
    }
    if let Some(file_name) = resume {
      body.push_str(&format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n%PDF-1.4 fake\r\n"
      ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
  }

  fn valid_fields() -> Vec<(&'static str, &'static str)> {
    vec![
      ("firstName", "Jorge"),
      ("lastName", "Ruiz"),
      ("email", "jorge@example.com"),
      ("country", "Mexico"),
      ("linkedIn", "https://linkedin.com/in/jorge"),
      ("visas", "O-1"),
      ("visas", "EB-1A"),
      ("additionalInfo", "Looking for options"),
    ]
  }

  async fn send(
    state: AppState<MemoryStore>,
    req: Request<Body>,
  ) -> (StatusCode, Value) {
    let resp = api_router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
  }

  fn submit_request(body: String) -> Request<Body> {
    Request::builder()
      .method("POST")
      .uri("/leads")
      .header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
      )
      .body(Body::from(body))
      .unwrap()
  }

  fn reviewer_get(uri: &str) -> Request<Body> {
    Request::builder()
      .uri(uri)
      .header(header::AUTHORIZATION, basic("reviewer", "secret"))
      .body(Body::empty())
      .unwrap()
  }

  fn patch_status(id: u64, status: &str) -> Request<Body> {
    Request::builder()
      .method("PATCH")
      .uri(format!("/leads/{id}/status"))
      .header(header::AUTHORIZATION, basic("reviewer", "secret"))
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(format!(r#"{{"status":"{status}"}}"#)))
      .unwrap()
  }

  // ── Vocabulary ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn vocabulary_is_public() {
    let state = make_state("secret");
    let req = Request::builder().uri("/vocabulary").body(Body::empty()).unwrap();
    let (status, json) = send(state, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["visas"].as_array().unwrap().len(), 4);
    assert_eq!(json["visas"][2], "EB-2 NIW");
    assert_eq!(json["statuses"][1]["value"], "REACHED_OUT");
    assert_eq!(json["statuses"][1]["label"], "Reached Out");
    assert_eq!(json["statuses"][0]["next"], "REACHED_OUT");
    assert_eq!(json["statuses"][1]["next"], Value::Null);
    assert!(json["countries"].as_array().unwrap().contains(&"Mexico".into()));
  }

  // ── Submit ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn submit_valid_form_returns_201_with_pending_lead() {
    let state = make_state("secret");
    let body = form_body(&valid_fields(), Some("cv.pdf"));
    let (status, json) = send(state.clone(), submit_request(body)).await;

    assert_eq!(status, StatusCode::CREATED, "{json}");
    assert_eq!(json["success"], true);
    assert_eq!(json["lead"]["id"], 1);
    assert_eq!(json["lead"]["status"], "PENDING");
    assert_eq!(json["lead"]["resumeFileName"], "cv.pdf");
    assert_eq!(json["lead"]["visas"], serde_json::json!(["O-1", "EB-1A"]));

    let (status, json) = send(state, reviewer_get("/leads/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["email"], "jorge@example.com");
  }

  #[tokio::test]
  async fn submit_missing_email_is_rejected_with_violations() {
    let state = make_state("secret");
    let fields: Vec<_> = valid_fields()
      .into_iter()
      .filter(|(name, _)| *name != "email")
      .collect();
    let (status, json) =
      send(state.clone(), submit_request(form_body(&fields, None))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "ValidationFailed");
    let violations = json["violations"].as_array().unwrap();
    assert!(violations.iter().any(|v| v["field"] == "email"), "{json}");
    assert!(state.store.list().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn submit_without_visas_names_visas() {
    let state = make_state("secret");
    let fields: Vec<_> = valid_fields()
      .into_iter()
      .filter(|(name, _)| *name != "visas")
      .collect();
    let (status, json) = send(state, submit_request(form_body(&fields, None))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let violations = json["violations"].as_array().unwrap();
    assert!(violations.iter().any(|v| v["field"] == "visas"), "{json}");
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_requires_credentials() {
    let state = make_state("secret");
    let req = Request::builder().uri("/leads").body(Body::empty()).unwrap();
    let resp = api_router(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
  }

  #[tokio::test]
  async fn list_defaults_to_first_page_of_eight() {
    let state = seeded_state().await;
    let (status, json) = send(state, reviewer_get("/leads")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["items"].as_array().unwrap().len(), 8);
    assert_eq!(json["totalPages"], 3);
    assert_eq!(json["currentPage"], 1);
    assert_eq!(json["totalItems"], 20);
  }

  #[tokio::test]
  async fn list_filters_by_status_and_search() {
    let state = seeded_state().await;
    let (status, json) =
      send(state, reviewer_get("/leads?status=PENDING&search=MEXICO")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = json["items"]
      .as_array()
      .unwrap()
      .iter()
      .map(|l| l["firstName"].as_str().unwrap().to_owned())
      .collect();
    assert_eq!(names, ["Jorge", "Bahar", "Jane"]);
    assert_eq!(json["totalPages"], 1);
  }

  #[tokio::test]
  async fn list_all_sentinel_and_page_past_end() {
    let state = seeded_state().await;
    let (status, json) =
      send(state, reviewer_get("/leads?status=ALL&page=9")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["items"].as_array().unwrap().is_empty());
    assert_eq!(json["totalPages"], 3);
    assert_eq!(json["currentPage"], 9);
  }

  #[tokio::test]
  async fn list_rejects_bad_parameters() {
    for uri in [
      "/leads?status=DONE",
      "/leads?page=0",
      "/leads?page_size=0",
      "/leads?page_size=1000",
    ] {
      let state = make_state("secret");
      let (status, json) = send(state, reviewer_get(uri)).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
      assert_eq!(json["error"], "BadRequest", "{uri}");
    }
  }

  #[tokio::test]
  async fn malformed_requests_get_json_bad_request_bodies() {
    let patch_body = |body: &'static str| {
      Request::builder()
        .method("PATCH")
        .uri("/leads/1/status")
        .header(header::AUTHORIZATION, basic("reviewer", "secret"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
    };
    let json_submit = Request::builder()
      .method("POST")
      .uri("/leads")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(r#"{"firstName":"Jorge"}"#))
      .unwrap();

    let requests = [
      ("GET /leads/abc", reviewer_get("/leads/abc")),
      ("GET /leads?page=x", reviewer_get("/leads?page=x")),
      ("PATCH {}", patch_body("{}")),
      ("PATCH not-json", patch_body("status=REACHED_OUT")),
      ("POST json", json_submit),
    ];
    for (label, req) in requests {
      let state = seeded_state().await;
      let (status, json) = send(state.clone(), req).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{label}");
      assert_eq!(json["success"], false, "{label}: {json}");
      assert_eq!(json["error"], "BadRequest", "{label}: {json}");
      assert!(json["message"].is_string(), "{label}: {json}");

      let lead = state.store.get(intake_core::lead::LeadId(1)).await.unwrap();
      assert_eq!(lead.unwrap().status, intake_core::lead::LeadStatus::Pending);
    }
  }

  // ── Get one ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_unknown_lead_returns_404() {
    let state = make_state("secret");
    let (status, json) = send(state, reviewer_get("/leads/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "NotFound");
  }

  // ── Set status ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn set_status_marks_lead_reached_out() {
    let state = seeded_state().await;
    let (status, json) = send(state.clone(), patch_status(2, "REACHED_OUT")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["lead"]["id"], 2);
    assert_eq!(json["lead"]["status"], "REACHED_OUT");
    assert_eq!(json["lead"]["firstName"], "Bahar");

    let (_, neighbour) = send(state, reviewer_get("/leads/1")).await;
    assert_eq!(neighbour["status"], "PENDING");
  }

  #[tokio::test]
  async fn set_status_unknown_lead_returns_404() {
    let state = make_state("secret");
    let (status, json) = send(state, patch_status(7, "REACHED_OUT")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, serde_json::json!({
      "success": false,
      "error":   "NotFound",
      "message": "not found: lead 7",
    }));
  }

  #[tokio::test]
  async fn set_status_rejects_unknown_status() {
    let state = seeded_state().await;
    let (status, json) = send(state, patch_status(1, "CLOSED")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "BadRequest");
  }

  #[tokio::test]
  async fn set_status_requires_credentials() {
    let state = seeded_state().await;
    let req = Request::builder()
      .method("PATCH")
      .uri("/leads/1/status")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(r#"{"status":"REACHED_OUT"}"#))
      .unwrap();
    let (status, _) = send(state.clone(), req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let lead = state.store.get(intake_core::lead::LeadId(1)).await.unwrap();
    assert_eq!(lead.unwrap().status, intake_core::lead::LeadStatus::Pending);
  }
}
