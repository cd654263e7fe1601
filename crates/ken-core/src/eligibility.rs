//! The quiz eligibility gate.
//!
//! Two independent rules, checked in order: a minimum-experience gate (100
//! lifetime facts viewed) and a cooldown gate (8 hours since the last
//! completed quiz). The experience gate wins when both fail.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Lifetime viewed-fact count required before the first quiz.
pub const MIN_LIFETIME_FACTS: u64 = 100;

/// Hours between completed quizzes.
pub const COOLDOWN_HOURS: i64 = 8;

/// Whether a quiz may start now, and if not, why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAvailability {
  Ready,
  /// The experience gate failed; this many more facts must be viewed.
  NeedMoreFacts { facts_needed: u64 },
  /// The cooldown gate failed. Remaining hours/minutes are computed at check
  /// time by integer division of the remaining milliseconds.
  CoolingDown {
    next_available_at: DateTime<Utc>,
    hours_left:        i64,
    minutes_left:      i64,
  },
}

impl QuizAvailability {
  pub fn is_ready(&self) -> bool { matches!(self, QuizAvailability::Ready) }
}

impl fmt::Display for QuizAvailability {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QuizAvailability::Ready => write!(f, "quiz available"),
      QuizAvailability::NeedMoreFacts { facts_needed } => {
        write!(f, "view {facts_needed} more facts to unlock the quiz")
      }
      QuizAvailability::CoolingDown { hours_left, minutes_left, .. } => {
        if *hours_left > 0 {
          write!(
            f,
            "next quiz available in {hours_left} hours and {minutes_left} \
             minutes"
          )
        } else {
          write!(f, "next quiz available in {minutes_left} minutes")
        }
      }
    }
  }
}

/// Evaluate both gates. Pure; callers pass the current time in.
#[must_use]
pub fn check_availability(
  facts_viewed: u64,
  last_quiz: Option<DateTime<Utc>>,
  now: DateTime<Utc>,
) -> QuizAvailability {
  if facts_viewed < MIN_LIFETIME_FACTS {
    return QuizAvailability::NeedMoreFacts {
      facts_needed: MIN_LIFETIME_FACTS - facts_viewed,
    };
  }

  let Some(last_quiz) = last_quiz else {
    return QuizAvailability::Ready;
  };

  let next_available_at = last_quiz + Duration::hours(COOLDOWN_HOURS);
  if now >= next_available_at {
    return QuizAvailability::Ready;
  }

  let remaining_ms = (next_available_at - now).num_milliseconds();
  QuizAvailability::CoolingDown {
    next_available_at,
    hours_left: remaining_ms / 3_600_000,
    minutes_left: (remaining_ms % 3_600_000) / 60_000,
  }
}
