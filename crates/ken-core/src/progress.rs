//! Point awards and level derivation.
//!
//! Levels are a pure function of total points and are never stored
//! authoritatively: every reader re-derives them so a stale persisted copy
//! cannot drift from the point total it was computed against.

use serde::{Deserialize, Serialize};

// ─── Point awards ────────────────────────────────────────────────────────────

/// Points for viewing a fact.
pub const FACT_VIEW_POINTS: i64 = 10;
/// Points per correct quiz answer.
pub const CORRECT_ANSWER_POINTS: i64 = 50;
/// One-off bonus for answering every question in a quiz correctly.
pub const PERFECT_QUIZ_BONUS: i64 = 200;
/// Bonus for continuing the daily streak onto a new consecutive day.
pub const STREAK_BONUS_POINTS: i64 = 25;
/// Penalty for using a hint. Part of the scoring configuration but not
/// applied by any current flow; no operation exposes hints yet.
pub const HINT_PENALTY_POINTS: i64 = -15;

// ─── Level tiers ─────────────────────────────────────────────────────────────

/// Cumulative point floors for levels 1 through 5. Level `i + 1` starts at
/// `LEVEL_FLOORS[i]`.
const LEVEL_FLOORS: [u64; 5] = [0, 500, 1200, 2500, 5000];

/// Points at which the open-ended regime begins (level 6 and beyond).
const OPEN_TIER_FLOOR: u64 = 10_000;

/// Width of every tier past level 5.
const OPEN_TIER_SPAN: u64 = 10_000;

/// The level reached with `points` total points.
///
/// Levels 1–5 follow the explicit tier table; past 10 000 points each further
/// 10 000 points is one more level, without cap.
#[must_use]
pub fn level_for_points(points: u64) -> u32 {
  if points >= OPEN_TIER_FLOOR {
    return 6 + ((points - OPEN_TIER_FLOOR) / OPEN_TIER_SPAN) as u32;
  }
  match LEVEL_FLOORS.iter().rposition(|floor| points >= *floor) {
    Some(i) => i as u32 + 1,
    None => 1,
  }
}

/// Position within the current level tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
  pub level:      u32,
  /// Points earned inside the current tier.
  pub current:    u64,
  /// Width of the current tier.
  pub max:        u64,
  /// `current / max`, as a percentage.
  pub percentage: f64,
}

impl LevelProgress {
  /// Points still needed to reach the next level.
  #[must_use]
  pub fn points_to_next(&self) -> u64 { self.max - self.current }
}

/// Derive the full level/progress view for `points`. Pure and idempotent.
#[must_use]
pub fn level_progress(points: u64) -> LevelProgress {
  let level = level_for_points(points);

  let (floor, span) = if points >= OPEN_TIER_FLOOR {
    let tiers_above = (points - OPEN_TIER_FLOOR) / OPEN_TIER_SPAN;
    (OPEN_TIER_FLOOR + tiers_above * OPEN_TIER_SPAN, OPEN_TIER_SPAN)
  } else {
    let i = (level - 1) as usize;
    let ceiling = LEVEL_FLOORS
      .get(i + 1)
      .copied()
      .unwrap_or(OPEN_TIER_FLOOR);
    (LEVEL_FLOORS[i], ceiling - LEVEL_FLOORS[i])
  };

  let current = points - floor;
  LevelProgress {
    level,
    current,
    max: span,
    percentage: (current as f64 / span as f64) * 100.0,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tier_table_boundaries() {
    assert_eq!(level_for_points(0), 1);
    assert_eq!(level_for_points(499), 1);
    assert_eq!(level_for_points(500), 2);
    assert_eq!(level_for_points(1199), 2);
    assert_eq!(level_for_points(1200), 3);
    assert_eq!(level_for_points(2499), 3);
    assert_eq!(level_for_points(2500), 4);
    assert_eq!(level_for_points(4999), 4);
    assert_eq!(level_for_points(5000), 5);
    assert_eq!(level_for_points(9999), 5);
  }

  #[test]
  fn open_regime_uncapped() {
    assert_eq!(level_for_points(10_000), 6);
    assert_eq!(level_for_points(19_999), 6);
    assert_eq!(level_for_points(20_000), 7);
    assert_eq!(level_for_points(100_000), 15);
  }

  #[test]
  fn level_is_non_decreasing() {
    let mut previous = 0;
    for points in (0..30_000).step_by(7) {
      let level = level_for_points(points);
      assert!(level >= previous, "level dropped at {points} points");
      previous = level;
    }
  }

  #[test]
  fn progress_accounts_for_every_point() {
    // floor + current == points, and current stays below max.
    for points in [0, 1, 499, 500, 777, 4999, 5000, 9999, 10_000, 12_345, 25_000]
    {
      let progress = level_progress(points);
      assert!(progress.current < progress.max, "at {points} points");
      assert_eq!(
        level_for_points(points),
        progress.level,
        "level mismatch at {points} points"
      );
    }

    // Spot-check tier arithmetic.
    let p = level_progress(777);
    assert_eq!(p.level, 2);
    assert_eq!(p.current, 277);
    assert_eq!(p.max, 700);

    let p = level_progress(12_345);
    assert_eq!(p.level, 6);
    assert_eq!(p.current, 2_345);
    assert_eq!(p.max, 10_000);
  }

  #[test]
  fn progress_is_idempotent() {
    for points in [0, 650, 10_000, 31_415] {
      let a = level_progress(points);
      let b = level_progress(points);
      assert_eq!(a.level, b.level);
      assert_eq!(a.current, b.current);
      assert_eq!(a.max, b.max);
    }
  }

  #[test]
  fn points_to_next_level() {
    assert_eq!(level_progress(0).points_to_next(), 500);
    assert_eq!(level_progress(499).points_to_next(), 1);
    assert_eq!(level_progress(500).points_to_next(), 700);
    assert_eq!(level_progress(10_000).points_to_next(), 10_000);
  }

  #[test]
  fn percentage_spans_zero_to_under_hundred() {
    assert_eq!(level_progress(0).percentage, 0.0);
    let nearly = level_progress(499).percentage;
    assert!(nearly > 99.0 && nearly < 100.0);
  }
}
