//! `ken badges` — the badge table with unlock progress.

use chrono::Local;
use ken_core::engine::Engine;
use ken_store_sqlite::SqliteStore;

pub async fn run(engine: &Engine<SqliteStore>) -> anyhow::Result<()> {
  let progress = engine.badge_progress().await?;
  let unlocked = progress.iter().filter(|p| p.unlocked_at.is_some()).count();

  println!("Badges unlocked: {unlocked}/{}", progress.len());
  println!();
  for p in progress {
    match p.unlocked_at {
      Some(at) => println!(
        "{} {:<18} {}  (unlocked {})",
        p.spec.icon,
        p.spec.name,
        p.spec.description,
        at.with_timezone(&Local).format("%Y-%m-%d")
      ),
      None => println!(
        "🔒 {:<18} {}  ({}/{})",
        p.spec.name, p.spec.description, p.current, p.target
      ),
    }
  }
  Ok(())
}
