//! `ken stats` — the profile overview.

use ken_core::{engine::Engine, progress};
use ken_store_sqlite::SqliteStore;

pub async fn run(engine: &Engine<SqliteStore>) -> anyhow::Result<()> {
  let stats = engine.stats().await?;
  let level = progress::level_progress(stats.total_points);

  println!("Level {}  {}", level.level, bar(level.percentage, 24));
  println!(
    "{} points — {} to level {}",
    stats.total_points,
    level.points_to_next(),
    level.level + 1
  );
  println!();
  println!(
    "Facts viewed   {:>6}   (today: {})",
    stats.facts_viewed, stats.facts_viewed_today
  );
  println!(
    "Quizzes done   {:>6}   (perfect: {})",
    stats.quizzes_completed, stats.quizzes_perfect
  );
  println!(
    "Streak         {:>6}   (longest: {})",
    stats.current_streak, stats.longest_streak
  );

  println!();
  println!(
    "   {:<16} {:>7} {:>11} {:>9}",
    "Category", "viewed", "answers", "accuracy"
  );
  for (category, cs) in &stats.category_stats {
    println!(
      "{} {:<16} {:>7} {:>7}/{:<3} {:>8.0}%",
      category.icon(),
      category.label(),
      cs.facts_viewed,
      cs.quiz_correct,
      cs.quiz_total,
      cs.accuracy
    );
  }
  Ok(())
}

fn bar(percentage: f64, width: usize) -> String {
  let filled = ((percentage / 100.0) * width as f64).round() as usize;
  let filled = filled.min(width);
  format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}
