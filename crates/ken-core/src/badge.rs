//! Badge definitions and the unlock evaluator.
//!
//! The badge set is closed: every badge is a row in [`BADGES`] with a
//! threshold predicate over [`UserStats`]. Evaluation is idempotent — a badge
//! unlocks at most once, its unlock timestamp never changes, and re-running
//! the evaluator against unchanged stats unlocks nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{category::Category, stats::UserStats};

// ─── Requirements ────────────────────────────────────────────────────────────

/// A threshold predicate over the stats document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
  FactsViewed(u64),
  QuizzesCompleted(u64),
  PerfectQuizzes(u64),
  StreakDays(u32),
  /// Correct quiz answers within one category.
  CategoryCorrect(Category, u64),
}

impl Requirement {
  pub fn is_met(&self, stats: &UserStats) -> bool {
    let (current, target) = self.progress(stats);
    current >= target
  }

  /// `(current, target)` pair for display progress bars.
  pub fn progress(&self, stats: &UserStats) -> (u64, u64) {
    match *self {
      Requirement::FactsViewed(n) => (stats.facts_viewed, n),
      Requirement::QuizzesCompleted(n) => (stats.quizzes_completed, n),
      Requirement::PerfectQuizzes(n) => (stats.quizzes_perfect, n),
      Requirement::StreakDays(n) => {
        (u64::from(stats.current_streak), u64::from(n))
      }
      Requirement::CategoryCorrect(category, n) => {
        let correct = stats
          .category_stats
          .get(&category)
          .map_or(0, |c| c.quiz_correct);
        (correct, n)
      }
    }
  }

  /// The category this requirement is scoped to, for expert badges.
  pub fn category(&self) -> Option<Category> {
    match *self {
      Requirement::CategoryCorrect(category, _) => Some(category),
      _ => None,
    }
  }
}

// ─── Definitions ─────────────────────────────────────────────────────────────

/// A row in the closed badge table.
#[derive(Debug, Clone, Copy)]
pub struct BadgeSpec {
  pub id:          &'static str,
  pub name:        &'static str,
  pub description: &'static str,
  pub icon:        &'static str,
  pub requirement: Requirement,
}

impl BadgeSpec {
  /// Materialise the persisted unlock record for this badge.
  #[must_use]
  pub fn unlock(&self, at: DateTime<Utc>) -> Badge {
    Badge {
      id:          self.id.to_owned(),
      name:        self.name.to_owned(),
      description: self.description.to_owned(),
      icon:        self.icon.to_owned(),
      category:    self.requirement.category(),
      unlocked_at: at,
    }
  }
}

/// Every badge in the system. Order is display order.
pub const BADGES: &[BadgeSpec] = &[
  BadgeSpec {
    id:          "first-steps",
    name:        "First Steps",
    description: "View your first fact",
    icon:        "👶",
    requirement: Requirement::FactsViewed(1),
  },
  BadgeSpec {
    id:          "quiz-master",
    name:        "Quiz Master",
    description: "Complete your first quiz",
    icon:        "🎯",
    requirement: Requirement::QuizzesCompleted(1),
  },
  BadgeSpec {
    id:          "perfect-score",
    name:        "Perfect Score",
    description: "Score 100% on a quiz",
    icon:        "💯",
    requirement: Requirement::PerfectQuizzes(1),
  },
  BadgeSpec {
    id:          "streak-3",
    name:        "Streak Starter",
    description: "Active 3 days in a row",
    icon:        "🔥",
    requirement: Requirement::StreakDays(3),
  },
  BadgeSpec {
    id:          "streak-7",
    name:        "Streak Master",
    description: "Active 7 days in a row",
    icon:        "🏆",
    requirement: Requirement::StreakDays(7),
  },
  BadgeSpec {
    id:          "streak-30",
    name:        "Streak Legend",
    description: "Active 30 days in a row",
    icon:        "👑",
    requirement: Requirement::StreakDays(30),
  },
  BadgeSpec {
    id:          "knowledge-seeker",
    name:        "Knowledge Seeker",
    description: "View 100 facts",
    icon:        "📚",
    requirement: Requirement::FactsViewed(100),
  },
  BadgeSpec {
    id:          "knowledge-master",
    name:        "Knowledge Master",
    description: "View 500 facts",
    icon:        "🎓",
    requirement: Requirement::FactsViewed(500),
  },
  BadgeSpec {
    id:          "expert-history",
    name:        "History Expert",
    description: "25 correct answers in History",
    icon:        "📜",
    requirement: Requirement::CategoryCorrect(Category::History, 25),
  },
  BadgeSpec {
    id:          "expert-science",
    name:        "Science Expert",
    description: "25 correct answers in Science",
    icon:        "🔬",
    requirement: Requirement::CategoryCorrect(Category::Science, 25),
  },
  BadgeSpec {
    id:          "expert-sports",
    name:        "Sports Expert",
    description: "25 correct answers in Sports",
    icon:        "⚽",
    requirement: Requirement::CategoryCorrect(Category::Sports, 25),
  },
  BadgeSpec {
    id:          "expert-entertainment",
    name:        "Entertainment Expert",
    description: "25 correct answers in Entertainment",
    icon:        "🎬",
    requirement: Requirement::CategoryCorrect(Category::Entertainment, 25),
  },
  BadgeSpec {
    id:          "expert-arts-culture",
    name:        "Arts & Culture Expert",
    description: "25 correct answers in Arts & Culture",
    icon:        "🎨",
    requirement: Requirement::CategoryCorrect(Category::ArtsCulture, 25),
  },
  BadgeSpec {
    id:          "expert-spelling",
    name:        "Spelling Expert",
    description: "25 correct answers in Spelling",
    icon:        "📝",
    requirement: Requirement::CategoryCorrect(Category::Spelling, 25),
  },
  BadgeSpec {
    id:          "expert-biology",
    name:        "Biology Expert",
    description: "25 correct answers in Biology",
    icon:        "🧬",
    requirement: Requirement::CategoryCorrect(Category::Biology, 25),
  },
  BadgeSpec {
    id:          "expert-geography",
    name:        "Geography Expert",
    description: "25 correct answers in Geography",
    icon:        "🌍",
    requirement: Requirement::CategoryCorrect(Category::Geography, 25),
  },
];

/// Look up a definition by id.
pub fn spec(id: &str) -> Option<&'static BadgeSpec> {
  BADGES.iter().find(|b| b.id == id)
}

// ─── Persisted unlock record ─────────────────────────────────────────────────

/// An unlocked badge as stored in the profile. Ids outside the current
/// [`BADGES`] table (from an older or newer build) are carried but ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
  pub id:          String,
  pub name:        String,
  pub description: String,
  pub icon:        String,
  pub category:    Option<Category>,
  pub unlocked_at: DateTime<Utc>,
}

// ─── Evaluation ──────────────────────────────────────────────────────────────

/// Unlock records for every badge whose requirement `stats` newly meets.
///
/// Badges already present in `unlocked` are skipped, whatever their state.
/// Safe to call after every stats mutation.
#[must_use]
pub fn evaluate(
  stats: &UserStats,
  unlocked: &[Badge],
  now: DateTime<Utc>,
) -> Vec<Badge> {
  BADGES
    .iter()
    .filter(|spec| !unlocked.iter().any(|b| b.id == spec.id))
    .filter(|spec| spec.requirement.is_met(stats))
    .map(|spec| spec.unlock(now))
    .collect()
}
