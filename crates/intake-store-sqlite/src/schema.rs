//! SQL schema for the lead store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids strictly increasing and never reused.
-- Rows are never deleted; only `status` is ever updated.
CREATE TABLE IF NOT EXISTS leads (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name       TEXT NOT NULL,
    last_name        TEXT NOT NULL,
    email            TEXT NOT NULL,
    country          TEXT NOT NULL,
    linked_in        TEXT,
    visas            TEXT NOT NULL,   -- JSON array of visa labels
    additional_info  TEXT,
    resume_file_name TEXT,
    status           TEXT NOT NULL DEFAULT 'PENDING',
    submitted_at     TEXT NOT NULL    -- RFC 3339 UTC
);

CREATE INDEX IF NOT EXISTS leads_status_idx ON leads(status);

PRAGMA user_version = 1;
";
