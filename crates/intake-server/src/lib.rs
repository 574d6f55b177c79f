//! Lead intake HTTP server.
//!
//! Wires a [`LeadStore`] into the intake API, mounted under `/api`, with
//! request tracing. The binary picks the store from configuration.

pub mod settings;

use std::sync::Arc;

use anyhow::Context as _;
use axum::Router;
use intake_api::AppState;
use intake_core::{demo, store::LeadStore};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use settings::ServerConfig;

/// Build the top-level router: the API under `/api`, wrapped in a trace layer.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: LeadStore + Clone + 'static,
{
  Router::new()
    .nest("/api", intake_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}

/// Assemble handler state for `store` from `cfg`.
pub fn app_state<S: LeadStore>(store: S, cfg: &ServerConfig) -> AppState<S> {
  AppState {
    policy: Arc::new(cfg.policy()),
    page_size: cfg.page_size,
    ..AppState::new(Arc::new(store), cfg.auth())
  }
}

/// Load the demo leads, but only into a store that holds none yet.
pub async fn seed_if_empty<S: LeadStore>(store: &S) -> anyhow::Result<usize> {
  let existing = store.list().await.context("failed to list leads")?;
  if !existing.is_empty() {
    tracing::info!(leads = existing.len(), "store not empty, skipping demo data");
    return Ok(0);
  }
  let seeded = demo::seed(store).await.context("failed to seed demo leads")?;
  Ok(seeded.len())
}

/// Seed if asked, bind the configured address and serve until shutdown.
pub async fn run<S>(store: S, cfg: ServerConfig) -> anyhow::Result<()>
where
  S: LeadStore + Clone + 'static,
{
  if cfg.seed_demo {
    let count = seed_if_empty(&store).await?;
    tracing::info!(count, "seeded demo leads");
  }

  let app = router(app_state(store, &cfg));
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
