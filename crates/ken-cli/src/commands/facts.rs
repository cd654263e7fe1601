//! `ken facts` — the daily reading flow.

use std::collections::HashSet;

use ken_core::engine::Engine;
use ken_store_sqlite::SqliteStore;
use rand::seq::SliceRandom as _;

use crate::{catalog, prompt};

/// How far back repeat-avoidance looks in the view log.
const SEEN_WINDOW: usize = 200;

pub async fn run(
  engine: &Engine<SqliteStore>,
  count: usize,
) -> anyhow::Result<()> {
  let check = engine.check_streak().await?;
  if check.outcome.is_new_day {
    println!("🔥 Day {} of your streak!", check.outcome.streak);
    if let Some(points) = check.points {
      println!(
        "   +{} streak bonus ({} points total)",
        points.awarded, points.total
      );
    }
  }

  let prefs = engine.preferences().await?;
  let seen: HashSet<String> = engine
    .recent_fact_views(SEEN_WINDOW)
    .await?
    .into_iter()
    .map(|v| v.fact_id)
    .collect();

  let mut pool = catalog::facts_in(&prefs.selected_categories);
  if pool.is_empty() {
    println!("No facts available for the current category selection.");
    return Ok(());
  }

  let mut rng = rand::thread_rng();
  pool.shuffle(&mut rng);
  // Unseen facts first; the stable sort keeps the shuffle within each half.
  pool.sort_by_key(|f| seen.contains(f.id));

  let batch: Vec<_> = pool.into_iter().take(count).collect();
  let total = batch.len();

  for (n, def) in batch.into_iter().enumerate() {
    let fact = def.to_fact();

    println!();
    println!("{} {}", fact.category.icon(), fact.category.label());
    println!("   {}", fact.title);
    println!("   {}", fact.body);
    if let Some(source) = &fact.source {
      println!("   — {source}");
    }

    let outcome = engine.record_fact_view(&fact).await?;
    println!(
      "   +{} points ({} total)",
      outcome.points.awarded, outcome.points.total
    );
    if outcome.points.leveled_up {
      println!("⬆️  Level up! You are now level {}.", outcome.points.level);
    }
    for badge in &outcome.new_badges {
      println!(
        "{} Badge unlocked: {} — {}",
        badge.icon, badge.name, badge.description
      );
    }

    if n + 1 < total
      && prompt::read_line("\n[Enter] next fact ")?.is_none()
    {
      return Ok(());
    }
  }

  let stats = engine.stats().await?;
  println!();
  println!(
    "Read today: {}/{} — streak: {} days",
    stats.facts_viewed_today, prefs.daily_goal, stats.current_streak
  );
  Ok(())
}
