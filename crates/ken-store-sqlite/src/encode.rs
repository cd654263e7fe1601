//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Categories are stored as
//! their serde slug so rows stay greppable. Whole documents and archived
//! sessions are stored as compact JSON.

use chrono::{DateTime, Utc};
use ken_core::{category::Category, fact::ViewedFact};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Category ────────────────────────────────────────────────────────────────

pub fn encode_category(c: Category) -> &'static str { c.slug() }

pub fn decode_category(s: &str) -> Result<Category> {
  Category::from_slug(s).ok_or_else(|| Error::UnknownCategory(s.to_owned()))
}

// ─── Viewed-fact rows ────────────────────────────────────────────────────────

pub struct RawViewedFact {
  pub fact_id:   String,
  pub category:  String,
  pub viewed_at: String,
}

impl RawViewedFact {
  pub fn into_viewed_fact(self) -> Result<ViewedFact> {
    Ok(ViewedFact {
      fact_id:   self.fact_id,
      category:  decode_category(&self.category)?,
      viewed_at: decode_dt(&self.viewed_at)?,
    })
  }
}
