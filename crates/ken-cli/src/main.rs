//! ken command-line binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! profile database, and dispatches to one subcommand per sitting: read
//! facts, take the quiz, or inspect progress.

mod catalog;
mod commands;
mod prompt;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use ken_core::engine::Engine;
use ken_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use commands::prefs::PrefsAction;

#[derive(Parser)]
#[command(author, version, about = "Daily facts and quizzes in your terminal")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the profile database path.
  #[arg(long, global = true)]
  db: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Read new facts (and keep the streak alive).
  Facts {
    /// How many facts to draw.
    #[arg(short = 'n', long, default_value_t = 3)]
    count: usize,
  },
  /// Take the quiz, once the gate opens.
  Quiz,
  /// Points, level, streak, and per-category accuracy.
  Stats,
  /// The badge table with unlock progress.
  Badges,
  /// Finished quizzes, newest first.
  History,
  /// Show or change preferences.
  Prefs {
    #[command(subcommand)]
    action: Option<PrefsAction>,
  },
  /// Delete all stored progress.
  Reset {
    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
  },
}

/// Runtime configuration, deserialised from `config.toml`.
#[derive(Debug, Deserialize)]
struct Settings {
  db_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing. Interactive output goes to stdout; keep the log
  // quiet unless RUST_LOG asks for more.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .set_default("db_path", "~/.local/share/ken/profile.db")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("KEN"))
    .build()
    .context("failed to read config file")?;

  let settings: Settings = settings
    .try_deserialize()
    .context("failed to deserialise settings")?;

  let db_path = expand_tilde(&cli.db.unwrap_or(settings.db_path));
  if let Some(dir) = db_path.parent()
    && !dir.as_os_str().is_empty()
  {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("failed to create {dir:?}"))?;
  }

  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open profile at {db_path:?}"))?;
  let mut engine = Engine::new(store);

  match cli.command {
    Command::Facts { count } => commands::facts::run(&engine, count).await,
    Command::Quiz => commands::quiz::run(&mut engine).await,
    Command::Stats => commands::stats::run(&engine).await,
    Command::Badges => commands::badges::run(&engine).await,
    Command::History => commands::history::run(&engine).await,
    Command::Prefs { action } => commands::prefs::run(&engine, action).await,
    Command::Reset { yes } => commands::reset::run(&mut engine, yes).await,
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
