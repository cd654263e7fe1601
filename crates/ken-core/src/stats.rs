//! The cumulative per-user statistics document.
//!
//! A single `UserStats` value is persisted per profile and mutated
//! copy-on-write: load, apply one of the `record_*` transitions, persist the
//! whole document. Every transition that touches the point total re-derives
//! the level fields in the same step so a stale level is never written next
//! to a newer total.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  category::Category,
  progress::{
    self, CORRECT_ANSWER_POINTS, FACT_VIEW_POINTS, PERFECT_QUIZ_BONUS,
    STREAK_BONUS_POINTS,
  },
  streak::StreakOutcome,
};

// ─── Per-category tallies ────────────────────────────────────────────────────

/// Viewing and quiz tallies for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
  pub facts_viewed: u64,
  pub quiz_correct: u64,
  pub quiz_total:   u64,
  /// `quiz_correct / quiz_total`, as a percentage; 0 before any answer.
  pub accuracy:     f64,
}

impl CategoryStats {
  fn record_answer(&mut self, correct: bool) {
    self.quiz_total += 1;
    if correct {
      self.quiz_correct += 1;
    }
    self.accuracy = (self.quiz_correct as f64 / self.quiz_total as f64) * 100.0;
  }
}

// ─── Point outcome ───────────────────────────────────────────────────────────

/// What a point award did to the document; returned so callers can surface
/// level-up feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsOutcome {
  /// Points awarded (after clamping).
  pub awarded:    i64,
  pub total:      u64,
  pub level:      u32,
  pub leveled_up: bool,
}

// ─── UserStats ───────────────────────────────────────────────────────────────

/// Cumulative statistics for one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
  pub total_points:         u64,
  /// Derived from `total_points`; re-derived on every load and mutation.
  pub level:                u32,
  /// Points into the current level tier. Derived.
  pub level_progress:       u64,
  /// Points still needed for the next level. Derived.
  pub points_to_next_level: u64,

  pub facts_viewed:         u64,
  /// Resets to 0 when the streak check detects a new calendar day.
  pub facts_viewed_today:   u64,
  pub quizzes_completed:    u64,
  pub quizzes_perfect:      u64,

  pub current_streak:       u32,
  pub longest_streak:       u32,
  pub last_active:          Option<DateTime<Utc>>,

  pub category_stats:       BTreeMap<Category, CategoryStats>,
}

impl Default for UserStats {
  fn default() -> Self {
    let category_stats = Category::ALL
      .into_iter()
      .map(|c| (c, CategoryStats::default()))
      .collect();

    let mut stats = Self {
      total_points: 0,
      level: 1,
      level_progress: 0,
      points_to_next_level: 0,
      facts_viewed: 0,
      facts_viewed_today: 0,
      quizzes_completed: 0,
      quizzes_perfect: 0,
      current_streak: 0,
      longest_streak: 0,
      last_active: None,
      category_stats,
    };
    stats.refresh_level();
    stats
  }
}

impl UserStats {
  /// Re-derive `level`, `level_progress`, and `points_to_next_level` from
  /// `total_points`. Called on every load and after every point mutation.
  pub fn refresh_level(&mut self) {
    let progress = progress::level_progress(self.total_points);
    self.level = progress.level;
    self.level_progress = progress.current;
    self.points_to_next_level = progress.points_to_next();
  }

  /// Apply a signed point award, clamping the total at 0, and re-derive the
  /// level fields in the same step.
  pub fn award_points(&mut self, delta: i64) -> PointsOutcome {
    let level_before = self.level;
    let total_before = self.total_points;

    self.total_points = self.total_points.saturating_add_signed(delta);
    self.refresh_level();

    PointsOutcome {
      awarded:    self.total_points as i64 - total_before as i64,
      total:      self.total_points,
      level:      self.level,
      leveled_up: self.level > level_before,
    }
  }

  fn category_entry(&mut self, category: Category) -> &mut CategoryStats {
    self.category_stats.entry(category).or_default()
  }

  /// One fact viewed: bump the lifetime, daily, and per-category counters,
  /// stamp the activity time, and award the fact-view points.
  pub fn record_fact_view(
    &mut self,
    category: Category,
    now: DateTime<Utc>,
  ) -> PointsOutcome {
    self.facts_viewed += 1;
    self.facts_viewed_today += 1;
    self.category_entry(category).facts_viewed += 1;
    self.last_active = Some(now);
    self.award_points(FACT_VIEW_POINTS)
  }

  /// One quiz answer: update the category tally; award points when correct.
  pub fn record_quiz_answer(
    &mut self,
    category: Category,
    correct: bool,
  ) -> Option<PointsOutcome> {
    self.category_entry(category).record_answer(correct);
    correct.then(|| self.award_points(CORRECT_ANSWER_POINTS))
  }

  /// One quiz finished: bump the completion counters; award the perfect
  /// bonus when every answer was correct.
  pub fn record_quiz_complete(&mut self, perfect: bool) -> Option<PointsOutcome> {
    self.quizzes_completed += 1;
    if perfect {
      self.quizzes_perfect += 1;
    }
    perfect.then(|| self.award_points(PERFECT_QUIZ_BONUS))
  }

  /// Apply a streak check result. A same-day outcome leaves the document
  /// untouched; a new day rewrites the streak fields, resets the daily
  /// counter, and awards the continuation bonus when one was earned.
  pub fn apply_streak(
    &mut self,
    outcome: StreakOutcome,
    now: DateTime<Utc>,
  ) -> Option<PointsOutcome> {
    if !outcome.is_new_day {
      return None;
    }

    self.current_streak = outcome.streak;
    self.longest_streak = self.longest_streak.max(outcome.streak);
    self.facts_viewed_today = 0;
    self.last_active = Some(now);

    outcome
      .bonus_earned
      .then(|| self.award_points(STREAK_BONUS_POINTS))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::streak;

  fn now() -> DateTime<Utc> { Utc::now() }

  #[test]
  fn default_has_all_categories_zeroed() {
    let stats = UserStats::default();
    assert_eq!(stats.category_stats.len(), Category::ALL.len());
    assert!(stats.category_stats.values().all(|c| c.quiz_total == 0));
    assert_eq!(stats.level, 1);
    assert_eq!(stats.points_to_next_level, 500);
  }

  #[test]
  fn award_points_clamps_at_zero() {
    let mut stats = UserStats::default();
    stats.award_points(30);
    let outcome = stats.award_points(-100);
    assert_eq!(outcome.total, 0);
    assert_eq!(outcome.awarded, -30);
    assert_eq!(stats.level, 1);
  }

  #[test]
  fn award_points_reports_level_up() {
    let mut stats = UserStats::default();
    let outcome = stats.award_points(499);
    assert!(!outcome.leveled_up);

    let outcome = stats.award_points(1);
    assert!(outcome.leveled_up);
    assert_eq!(outcome.level, 2);
    assert_eq!(stats.level_progress, 0);
    assert_eq!(stats.points_to_next_level, 700);
  }

  #[test]
  fn fact_view_updates_counters_and_points() {
    let mut stats = UserStats::default();
    let outcome = stats.record_fact_view(Category::Biology, now());

    assert_eq!(outcome.awarded, 10);
    assert_eq!(stats.facts_viewed, 1);
    assert_eq!(stats.facts_viewed_today, 1);
    assert_eq!(stats.category_stats[&Category::Biology].facts_viewed, 1);
    assert!(stats.last_active.is_some());
  }

  #[test]
  fn quiz_answer_updates_accuracy() {
    let mut stats = UserStats::default();

    assert!(stats.record_quiz_answer(Category::Science, true).is_some());
    assert!(stats.record_quiz_answer(Category::Science, false).is_none());

    let science = &stats.category_stats[&Category::Science];
    assert_eq!(science.quiz_correct, 1);
    assert_eq!(science.quiz_total, 2);
    assert_eq!(science.accuracy, 50.0);
    assert_eq!(stats.total_points, 50);
  }

  #[test]
  fn quiz_complete_awards_bonus_only_when_perfect() {
    let mut stats = UserStats::default();

    assert!(stats.record_quiz_complete(false).is_none());
    assert_eq!(stats.quizzes_completed, 1);
    assert_eq!(stats.quizzes_perfect, 0);

    let outcome = stats.record_quiz_complete(true).unwrap();
    assert_eq!(outcome.awarded, 200);
    assert_eq!(stats.quizzes_perfect, 1);
  }

  #[test]
  fn streak_application_rolls_the_day_over() {
    let mut stats = UserStats::default();
    stats.facts_viewed_today = 7;
    stats.current_streak = 3;
    stats.longest_streak = 3;

    let today = Utc::now().date_naive();
    let outcome =
      streak::evaluate(today.pred_opt(), today, stats.current_streak);
    let points = stats.apply_streak(outcome, now());

    assert_eq!(points.unwrap().awarded, 25);
    assert_eq!(stats.current_streak, 4);
    assert_eq!(stats.longest_streak, 4);
    assert_eq!(stats.facts_viewed_today, 0);
  }

  #[test]
  fn same_day_streak_leaves_document_untouched() {
    let mut stats = UserStats::default();
    stats.facts_viewed_today = 2;
    stats.current_streak = 6;
    stats.longest_streak = 9;

    let outcome = StreakOutcome {
      streak:       6,
      is_new_day:   false,
      bonus_earned: false,
    };
    assert!(stats.apply_streak(outcome, now()).is_none());
    assert_eq!(stats.facts_viewed_today, 2);
    assert_eq!(stats.current_streak, 6);
  }

  #[test]
  fn longest_streak_never_drops_below_current() {
    let mut stats = UserStats::default();
    stats.current_streak = 2;
    stats.longest_streak = 10;

    let outcome =
      StreakOutcome { streak: 3, is_new_day: true, bonus_earned: true };
    stats.apply_streak(outcome, now());

    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.longest_streak, 10);
    assert!(stats.current_streak <= stats.longest_streak);
  }
}
