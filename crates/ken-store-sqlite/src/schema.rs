//! SQL schema for the ken SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Whole-document JSON storage, one row per profile concern.
-- Keys: 'stats', 'preferences', 'badges', 'last_quiz_time'.
CREATE TABLE IF NOT EXISTS documents (
    key        TEXT PRIMARY KEY,
    value_json TEXT NOT NULL,
    updated_at TEXT NOT NULL     -- ISO 8601 UTC
);

-- The viewed-fact log is strictly append-only; its lifetime row count
-- drives quiz eligibility.
CREATE TABLE IF NOT EXISTS viewed_facts (
    seq       INTEGER PRIMARY KEY AUTOINCREMENT,
    fact_id   TEXT NOT NULL,
    category  TEXT NOT NULL,     -- category slug, e.g. 'arts-culture'
    viewed_at TEXT NOT NULL      -- ISO 8601 UTC
);

-- Finalised quiz sessions. The summary columns are denormalised for
-- listing; session_json holds the full session.
CREATE TABLE IF NOT EXISTS quiz_history (
    session_id   TEXT PRIMARY KEY,
    started_at   TEXT NOT NULL,
    completed_at TEXT,
    score        INTEGER NOT NULL,
    perfect      INTEGER NOT NULL,
    session_json TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS viewed_facts_category_idx ON viewed_facts(category);
CREATE INDEX IF NOT EXISTS quiz_history_started_idx  ON quiz_history(started_at);

PRAGMA user_version = 1;
";
