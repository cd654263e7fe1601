//! The `ProfileStore` trait.
//!
//! Implemented by storage backends (e.g. `ken-store-sqlite`). Higher layers
//! depend on this abstraction, not on any concrete backend.
//!
//! Document reads are total: a missing or undecodable document yields the
//! type's documented default rather than an error, so the rules engine stays
//! usable over corrupted state. Genuine I/O failures still surface through
//! `Self::Error`.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  badge::Badge,
  fact::ViewedFact,
  prefs::UserPreferences,
  quiz::QuizSession,
  stats::UserStats,
};

/// Abstraction over a Ken profile store backend.
///
/// Single-document values (stats, preferences, badges, last-quiz marker) are
/// replaced whole on write. The viewed-fact log and quiz history are
/// append-only; nothing deletes from them short of [`reset_all`].
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
///
/// [`reset_all`]: ProfileStore::reset_all
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Stats document ────────────────────────────────────────────────────

  /// Load the stats document; [`UserStats::default`] when absent or corrupt.
  fn load_stats(
    &self,
  ) -> impl Future<Output = Result<UserStats, Self::Error>> + Send + '_;

  /// Replace the stats document.
  fn save_stats<'a>(
    &'a self,
    stats: &'a UserStats,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Preferences document ──────────────────────────────────────────────

  /// Load preferences; [`UserPreferences::default`] when absent or corrupt.
  fn load_preferences(
    &self,
  ) -> impl Future<Output = Result<UserPreferences, Self::Error>> + Send + '_;

  /// Replace the preferences document.
  fn save_preferences<'a>(
    &'a self,
    prefs: &'a UserPreferences,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Viewed-fact log — append-only ─────────────────────────────────────

  /// Append one entry to the viewed-fact log.
  fn append_fact_view<'a>(
    &'a self,
    view: &'a ViewedFact,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Lifetime size of the viewed-fact log. Drives the eligibility gate.
  fn fact_view_count(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// The most recent log entries, newest first.
  fn recent_fact_views(
    &self,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<ViewedFact>, Self::Error>> + Send + '_;

  // ── Quiz history — append-only ────────────────────────────────────────

  /// Archive a finalised session *and* set the last-quiz marker, atomically;
  /// the eligibility gate must never observe one without the other.
  fn archive_session<'a>(
    &'a self,
    session: &'a QuizSession,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// All archived sessions, newest first.
  fn quiz_history(
    &self,
  ) -> impl Future<Output = Result<Vec<QuizSession>, Self::Error>> + Send + '_;

  /// Completion time of the most recently archived quiz, if any.
  fn last_quiz_time(
    &self,
  ) -> impl Future<Output = Result<Option<DateTime<Utc>>, Self::Error>> + Send + '_;

  // ── Badges document ───────────────────────────────────────────────────

  /// Load the unlocked-badge list; empty when absent or corrupt.
  fn load_badges(
    &self,
  ) -> impl Future<Output = Result<Vec<Badge>, Self::Error>> + Send + '_;

  /// Replace the unlocked-badge list.
  fn save_badges<'a>(
    &'a self,
    badges: &'a [Badge],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Full reset ────────────────────────────────────────────────────────

  /// Clear every key above in one step. Subsequent reads see defaults.
  fn reset_all(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
