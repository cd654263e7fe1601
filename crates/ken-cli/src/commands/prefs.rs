//! `ken prefs` — show or change preferences.

use anyhow::{Context as _, bail};
use clap::Subcommand;
use ken_core::{
  category::Category,
  engine::Engine,
  prefs::{Theme, UserPreferences},
};
use ken_store_sqlite::SqliteStore;

#[derive(Subcommand)]
pub enum PrefsAction {
  /// Print the current preferences.
  Show,
  /// Change one or more preferences.
  Set {
    /// Comma-separated categories, e.g. 'history,science,arts-culture'.
    #[arg(long)]
    categories: Option<String>,

    /// Terminal bell on correct answers: true/false.
    #[arg(long)]
    sound: Option<bool>,

    /// Daily reminder flag: true/false.
    #[arg(long)]
    notifications: Option<bool>,

    /// Colour theme: dark/light.
    #[arg(long)]
    theme: Option<String>,

    /// Target facts per day.
    #[arg(long)]
    daily_goal: Option<u32>,
  },
}

pub async fn run(
  engine: &Engine<SqliteStore>,
  action: Option<PrefsAction>,
) -> anyhow::Result<()> {
  match action.unwrap_or(PrefsAction::Show) {
    PrefsAction::Show => {
      print_prefs(&engine.preferences().await?);
    }
    PrefsAction::Set {
      categories,
      sound,
      notifications,
      theme,
      daily_goal,
    } => {
      let mut prefs = engine.preferences().await?;
      if let Some(raw) = categories {
        prefs.selected_categories = parse_categories(&raw)?;
      }
      if let Some(sound) = sound {
        prefs.sound_enabled = sound;
      }
      if let Some(notifications) = notifications {
        prefs.notifications_enabled = notifications;
      }
      if let Some(raw) = theme {
        prefs.theme = parse_theme(&raw)?;
      }
      if let Some(goal) = daily_goal {
        prefs.daily_goal = goal;
      }

      let saved = engine.update_preferences(prefs).await?;
      println!("Saved.");
      print_prefs(&saved);
    }
  }
  Ok(())
}

fn print_prefs(prefs: &UserPreferences) {
  let categories: Vec<&str> =
    prefs.selected_categories.iter().map(|c| c.slug()).collect();
  let theme = match prefs.theme {
    Theme::Dark => "dark",
    Theme::Light => "light",
  };

  println!("categories     {}", categories.join(", "));
  println!("sound          {}", prefs.sound_enabled);
  println!("notifications  {}", prefs.notifications_enabled);
  println!("theme          {theme}");
  println!("daily goal     {}", prefs.daily_goal);
}

fn parse_categories(raw: &str) -> anyhow::Result<Vec<Category>> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|slug| {
      Category::from_slug(slug).with_context(|| {
        format!("unknown category {slug:?} (try: {})", slug_list())
      })
    })
    .collect()
}

fn parse_theme(raw: &str) -> anyhow::Result<Theme> {
  match raw.trim().to_ascii_lowercase().as_str() {
    "dark" => Ok(Theme::Dark),
    "light" => Ok(Theme::Light),
    other => bail!("unknown theme {other:?} (try: dark, light)"),
  }
}

fn slug_list() -> String {
  Category::ALL.map(|c| c.slug()).join(", ")
}
