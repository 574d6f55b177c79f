//! [`SqliteStore`]: the SQLite implementation of [`LeadStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use intake_core::{
  lead::{Lead, LeadId, LeadStatus, NewLead},
  store::LeadStore,
};

use crate::{
  Result,
  encode::{
    LEAD_COLUMNS, RawLead, decode_id, encode_dt, encode_id, encode_status,
    encode_visas,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lead store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, e.g. for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── LeadStore impl ──────────────────────────────────────────────────────────

impl LeadStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, input: NewLead) -> Result<Lead> {
    let first_name       = input.first_name.clone();
    let last_name        = input.last_name.clone();
    let email            = input.email.clone();
    let country          = input.country.clone();
    let linked_in        = input.linked_in.clone();
    let visas_str        = encode_visas(&input.visas)?;
    let additional_info  = input.additional_info.clone();
    let resume_file_name = input.resume_file_name.clone();
    let status_str       = encode_status(input.status);
    let submitted_at_str = encode_dt(input.submitted_at);

    let raw_id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO leads (
             first_name, last_name, email, country, linked_in, visas,
             additional_info, resume_file_name, status, submitted_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            first_name,
            last_name,
            email,
            country,
            linked_in,
            visas_str,
            additional_info,
            resume_file_name,
            status_str,
            submitted_at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(input.into_lead(decode_id(raw_id)?))
  }

  async fn list(&self) -> Result<Vec<Lead>> {
    let raws: Vec<RawLead> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {LEAD_COLUMNS} FROM leads ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawLead::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLead::into_lead).collect()
  }

  async fn get(&self, id: LeadId) -> Result<Option<Lead>> {
    let Some(raw_id) = encode_id(id) else {
      return Ok(None);
    };

    let raw: Option<RawLead> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1"),
              rusqlite::params![raw_id],
              RawLead::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLead::into_lead).transpose()
  }

  async fn update_status(
    &self,
    id: LeadId,
    status: LeadStatus,
  ) -> Result<Option<Lead>> {
    let Some(raw_id) = encode_id(id) else {
      return Ok(None);
    };
    let status_str = encode_status(status);

    // Update and re-read in one call so no other write lands in between.
    let raw: Option<RawLead> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE leads SET status = ?1 WHERE id = ?2",
          rusqlite::params![status_str, raw_id],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(
          conn
            .query_row(
              &format!("SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1"),
              rusqlite::params![raw_id],
              RawLead::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawLead::into_lead).transpose()
  }
}
