//! `ken reset` — wipe the profile.

use ken_core::engine::Engine;
use ken_store_sqlite::SqliteStore;

use crate::prompt;

pub async fn run(
  engine: &mut Engine<SqliteStore>,
  yes: bool,
) -> anyhow::Result<()> {
  if !yes {
    let confirmation = prompt::read_line(
      "This deletes all points, badges, streaks, and history. \
       Type 'reset' to confirm: ",
    )?;
    if confirmation.as_deref() != Some("reset") {
      println!("Nothing deleted.");
      return Ok(());
    }
  }

  engine.reset_all().await?;
  println!("Profile reset.");
  Ok(())
}
