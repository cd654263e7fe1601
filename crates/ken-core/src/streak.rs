//! Daily-streak evaluation.
//!
//! Streaks count consecutive *calendar days* with recorded activity, compared
//! in UTC. Midnight UTC is the day boundary everywhere in this crate; a
//! device-local boundary would need a timezone input that no caller has.

use chrono::NaiveDate;

/// The result of comparing the last-active day against today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakOutcome {
  /// The streak value after the check.
  pub streak:       u32,
  /// Whether today is a day not seen before (triggers the daily rollover:
  /// `facts_viewed_today` reset, streak fields rewritten).
  pub is_new_day:   bool,
  /// Whether this check extended a genuine consecutive-day run. First-ever
  /// activity and broken-streak restarts start a streak of 1 without a bonus.
  pub bonus_earned: bool,
}

/// Compare `last_active` to `today` and produce the streak transition.
///
/// Pure; callers apply the outcome to their stats document and award the
/// streak bonus when `bonus_earned` is set.
#[must_use]
pub fn evaluate(
  last_active: Option<NaiveDate>,
  today: NaiveDate,
  current_streak: u32,
) -> StreakOutcome {
  let yesterday = today.pred_opt();

  match last_active {
    Some(day) if day == today => StreakOutcome {
      streak:       current_streak,
      is_new_day:   false,
      bonus_earned: false,
    },
    Some(day) if Some(day) == yesterday => StreakOutcome {
      streak:       current_streak.saturating_add(1),
      is_new_day:   true,
      bonus_earned: true,
    },
    // Never active, or a gap of more than one day: start over at 1.
    _ => StreakOutcome { streak: 1, is_new_day: true, bonus_earned: false },
  }
}
