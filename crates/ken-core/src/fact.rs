//! Facts — the content shown to the user, and the record kept when one is
//! viewed.
//!
//! Fact content itself is read-only catalog data supplied by the caller. The
//! engine only ever records *that* a fact was viewed; the append-only log of
//! those views drives quiz eligibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// How demanding a fact or question is.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  #[default]
  Medium,
  Hard,
}

/// A short piece of content shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
  /// Stable catalog id, e.g. `"hist-001"`.
  pub id:         String,
  pub category:   Category,
  pub title:      String,
  pub body:       String,
  /// Attribution line, when the catalog provides one.
  pub source:     Option<String>,
  pub difficulty: Difficulty,
}

/// Append-only log entry: one fact presented to the user.
///
/// The lifetime row count of this log is the "experience" input to the quiz
/// eligibility gate. Entries are never deleted except by a full reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewedFact {
  pub fact_id:   String,
  pub category:  Category,
  pub viewed_at: DateTime<Utc>,
}
