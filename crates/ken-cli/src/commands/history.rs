//! `ken history` — finished quizzes, newest first.

use chrono::Local;
use ken_core::engine::Engine;
use ken_store_sqlite::SqliteStore;

pub async fn run(engine: &Engine<SqliteStore>) -> anyhow::Result<()> {
  let history = engine.quiz_history().await?;
  if history.is_empty() {
    println!("No quizzes taken yet.");
    return Ok(());
  }

  for session in &history {
    let when = session
      .completed_at
      .unwrap_or(session.started_at)
      .with_timezone(&Local)
      .format("%Y-%m-%d %H:%M");
    println!(
      "{when}   {:>2}/{:<2} correct   {:>4} pts   {}{}",
      session.correct_count(),
      session.questions.len(),
      session.score,
      session.grade().label(),
      if session.perfect { " 💯" } else { "" }
    );
  }
  Ok(())
}
