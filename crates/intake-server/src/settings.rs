//! Runtime configuration, layered from a TOML file and `INTAKE_*` environment
//! variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use intake_api::{AuthConfig, MAX_PAGE_SIZE};
use intake_core::{
  intake::{DEFAULT_COUNTRIES, IntakePolicy},
  query::DEFAULT_PAGE_SIZE,
};
use serde::Deserialize;

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  /// SQLite database file. Leads are kept in memory when absent.
  #[serde(default)]
  pub store_path:         Option<PathBuf>,
  pub auth_username:      String,
  pub auth_password_hash: String,
  #[serde(default = "default_page_size")]
  pub page_size:          usize,
  /// Load the demo leads into an empty store at startup.
  #[serde(default)]
  pub seed_demo:          bool,
  #[serde(default)]
  pub restrict_countries: bool,
  #[serde(default = "default_countries")]
  pub countries:          Vec<String>,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_page_size() -> usize { DEFAULT_PAGE_SIZE }

fn default_countries() -> Vec<String> {
  DEFAULT_COUNTRIES.iter().map(|c| (*c).to_owned()).collect()
}

impl ServerConfig {
  /// Read `path` (optional) and overlay `INTAKE_*` environment variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("INTAKE"))
      .build()
      .context("failed to read config file")?;

    let cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.validate().context("invalid server configuration")?;
    Ok(cfg)
  }

  /// Reject values the API would refuse on every request.
  pub fn validate(&self) -> anyhow::Result<()> {
    anyhow::ensure!(
      (1..=MAX_PAGE_SIZE).contains(&self.page_size),
      "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
      self.page_size
    );
    Ok(())
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn auth(&self) -> AuthConfig {
    AuthConfig {
      username:      self.auth_username.clone(),
      password_hash: self.auth_password_hash.clone(),
    }
  }

  pub fn policy(&self) -> IntakePolicy {
    IntakePolicy {
      countries:          self.countries.clone(),
      restrict_countries: self.restrict_countries,
    }
  }

  /// `store_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> Option<PathBuf> {
    self.store_path.as_deref().map(expand_tilde)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
