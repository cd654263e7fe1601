//! [`SqliteStore`] — the SQLite implementation of [`ProfileStore`].
//!
//! Three tables back the trait: `documents` holds the whole-document JSON
//! keys, `viewed_facts` is the append-only view log, and `quiz_history`
//! keeps finalised sessions. Documents that fail to decode are logged and
//! served as defaults; a damaged profile degrades instead of wedging.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use serde::de::DeserializeOwned;

use ken_core::{
  badge::Badge, fact::ViewedFact, prefs::UserPreferences, quiz::QuizSession,
  stats::UserStats, store::ProfileStore,
};

use crate::{
  Error, Result,
  encode::{RawViewedFact, encode_category, encode_dt},
  schema::SCHEMA,
};

/// Keys of the single-row JSON documents.
mod keys {
  pub const STATS: &str = "stats";
  pub const PREFERENCES: &str = "preferences";
  pub const BADGES: &str = "badges";
  pub const LAST_QUIZ: &str = "last_quiz_time";
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A ken profile store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
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

  /// Open an in-memory store — useful for testing.
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

  /// Read one document's raw JSON, `None` when the key was never written.
  async fn read_doc(&self, key: &'static str) -> Result<Option<String>> {
    let raw: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT value_json FROM documents WHERE key = ?1",
              rusqlite::params![key],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw)
  }

  /// Upsert one document.
  async fn write_doc(
    &self,
    key: &'static str,
    value_json: String,
  ) -> Result<()> {
    let updated_at = encode_dt(Utc::now());
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (key, value_json, updated_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (key) DO UPDATE SET
             value_json = excluded.value_json,
             updated_at = excluded.updated_at",
          rusqlite::params![key, value_json, updated_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Decode a document, serving the type's default when the key is missing
  /// or the stored JSON no longer parses.
  async fn load_doc_or_default<T>(&self, key: &'static str) -> Result<T>
  where
    T: DeserializeOwned + Default,
  {
    let Some(raw) = self.read_doc(key).await? else {
      return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
      Ok(value) => Ok(value),
      Err(err) => {
        tracing::warn!(key, %err, "corrupt document, serving defaults");
        Ok(T::default())
      }
    }
  }

  #[cfg(test)]
  pub(crate) async fn execute_raw(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = Error;

  // ── Stats document ─────────────────────────────────────────────────────────

  async fn load_stats(&self) -> Result<UserStats> {
    self.load_doc_or_default(keys::STATS).await
  }

  async fn save_stats(&self, stats: &UserStats) -> Result<()> {
    self
      .write_doc(keys::STATS, serde_json::to_string(stats)?)
      .await
  }

  // ── Preferences document ───────────────────────────────────────────────────

  async fn load_preferences(&self) -> Result<UserPreferences> {
    self.load_doc_or_default(keys::PREFERENCES).await
  }

  async fn save_preferences(&self, prefs: &UserPreferences) -> Result<()> {
    self
      .write_doc(keys::PREFERENCES, serde_json::to_string(prefs)?)
      .await
  }

  // ── Viewed-fact log ────────────────────────────────────────────────────────

  async fn append_fact_view(&self, view: &ViewedFact) -> Result<()> {
    let fact_id    = view.fact_id.clone();
    let category   = encode_category(view.category);
    let viewed_at  = encode_dt(view.viewed_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO viewed_facts (fact_id, category, viewed_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![fact_id, category, viewed_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fact_view_count(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM viewed_facts",
          [],
          |row| row.get(0),
        )?)
      })
      .await?;
    Ok(count as u64)
  }

  async fn recent_fact_views(&self, limit: usize) -> Result<Vec<ViewedFact>> {
    let limit = limit as i64;

    let raws: Vec<RawViewedFact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT fact_id, category, viewed_at FROM viewed_facts
           ORDER BY seq DESC LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit], |row| {
            Ok(RawViewedFact {
              fact_id:   row.get(0)?,
              category:  row.get(1)?,
              viewed_at: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawViewedFact::into_viewed_fact)
      .collect()
  }

  // ── Quiz history ───────────────────────────────────────────────────────────

  async fn archive_session(&self, session: &QuizSession) -> Result<()> {
    let session_id   = session.id.hyphenated().to_string();
    let started_at   = encode_dt(session.started_at);
    let completed_at = session.completed_at.map(encode_dt);
    let score        = session.score as i64;
    let perfect      = session.perfect;
    let session_json = serde_json::to_string(session)?;
    let marker_json  = serde_json::to_string(
      &session.completed_at.unwrap_or(session.started_at),
    )?;
    let updated_at   = encode_dt(Utc::now());

    // The history row and the last-quiz marker land together or not at
    // all; the cooldown gate reads the marker.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT OR REPLACE INTO quiz_history
             (session_id, started_at, completed_at, score, perfect, session_json)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            session_id,
            started_at,
            completed_at,
            score,
            perfect,
            session_json,
          ],
        )?;
        tx.execute(
          "INSERT INTO documents (key, value_json, updated_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (key) DO UPDATE SET
             value_json = excluded.value_json,
             updated_at = excluded.updated_at",
          rusqlite::params![keys::LAST_QUIZ, marker_json, updated_at],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn quiz_history(&self) -> Result<Vec<QuizSession>> {
    let rows: Vec<(String, String)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT session_id, session_json FROM quiz_history
           ORDER BY started_at DESC",
        )?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut sessions = Vec::with_capacity(rows.len());
    for (session_id, json) in rows {
      match serde_json::from_str(&json) {
        Ok(session) => sessions.push(session),
        Err(err) => {
          tracing::warn!(%session_id, %err, "skipping corrupt history row");
        }
      }
    }
    Ok(sessions)
  }

  async fn last_quiz_time(&self) -> Result<Option<DateTime<Utc>>> {
    self.load_doc_or_default(keys::LAST_QUIZ).await
  }

  // ── Badges document ────────────────────────────────────────────────────────

  async fn load_badges(&self) -> Result<Vec<Badge>> {
    self.load_doc_or_default(keys::BADGES).await
  }

  async fn save_badges(&self, badges: &[Badge]) -> Result<()> {
    self
      .write_doc(keys::BADGES, serde_json::to_string(badges)?)
      .await
  }

  // ── Reset ──────────────────────────────────────────────────────────────────

  async fn reset_all(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM documents", [])?;
        tx.execute("DELETE FROM viewed_facts", [])?;
        tx.execute("DELETE FROM quiz_history", [])?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
