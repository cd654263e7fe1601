//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Duration, Utc};
use ken_core::{
  badge,
  category::Category,
  eligibility::QuizAvailability,
  engine::{AdvanceOutcome, Engine},
  fact::{Difficulty, Fact, ViewedFact},
  prefs::{Theme, UserPreferences},
  quiz::{QuizFormat, QuizQuestion, QuizSession},
  stats::UserStats,
  store::ProfileStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn view(fact_id: &str, category: Category) -> ViewedFact {
  ViewedFact {
    fact_id:   fact_id.into(),
    category,
    viewed_at: Utc::now(),
  }
}

fn questions(count: usize) -> Vec<QuizQuestion> {
  (0..count)
    .map(|n| QuizQuestion {
      id:            format!("q-{n}"),
      fact_id:       format!("f-{n}"),
      category:      Category::Science,
      format:        QuizFormat::MultipleChoice,
      question:      format!("Question {n}?"),
      options:       vec!["a".into(), "b".into(), "c".into(), "d".into()],
      correct_index: n % 4,
      explanation:   None,
      difficulty:    Difficulty::Medium,
    })
    .collect()
}

/// A three-question session driven to completion, `correct` answered right.
fn played_session(correct: usize, started_at: DateTime<Utc>) -> QuizSession {
  let mut session = QuizSession::new(questions(3), started_at);
  for n in 0..3 {
    let right = session.current_question().unwrap().correct_index;
    let pick = if n < correct { right } else { (right + 1) % 4 };
    let at = started_at + Duration::seconds(n as i64 + 1);
    session.submit(pick, at).unwrap();
    session.advance(at);
  }
  assert!(session.is_completed());
  session
}

// ─── Documents ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_store_serves_defaults() {
  let s = store().await;

  assert_eq!(s.load_stats().await.unwrap(), UserStats::default());
  assert_eq!(
    s.load_preferences().await.unwrap(),
    UserPreferences::default()
  );
  assert!(s.load_badges().await.unwrap().is_empty());
  assert!(s.last_quiz_time().await.unwrap().is_none());
  assert_eq!(s.fact_view_count().await.unwrap(), 0);
  assert!(s.quiz_history().await.unwrap().is_empty());
}

#[tokio::test]
async fn stats_document_roundtrip() {
  let s = store().await;

  let mut stats = UserStats::default();
  stats.record_fact_view(Category::History, Utc::now());
  stats.record_quiz_answer(Category::History, true);
  stats.award_points(440);

  s.save_stats(&stats).await.unwrap();
  assert_eq!(s.load_stats().await.unwrap(), stats);
}

#[tokio::test]
async fn preferences_document_roundtrip() {
  let s = store().await;

  let prefs = UserPreferences {
    selected_categories:   vec![Category::Biology, Category::Spelling],
    sound_enabled:         false,
    notifications_enabled: true,
    theme:                 Theme::Light,
    daily_goal:            10,
  };

  s.save_preferences(&prefs).await.unwrap();
  assert_eq!(s.load_preferences().await.unwrap(), prefs);
}

#[tokio::test]
async fn badges_document_roundtrip() {
  let s = store().await;

  let unlocked = vec![
    badge::spec("first-steps").unwrap().unlock(Utc::now()),
    badge::spec("streak-3").unwrap().unlock(Utc::now()),
  ];

  s.save_badges(&unlocked).await.unwrap();
  assert_eq!(s.load_badges().await.unwrap(), unlocked);
}

#[tokio::test]
async fn corrupt_document_serves_defaults() {
  let s = store().await;

  s.execute_raw(
    "INSERT INTO documents (key, value_json, updated_at)
     VALUES ('stats', 'not json at all', '2026-01-01T00:00:00+00:00'),
            ('last_quiz_time', '[[[', '2026-01-01T00:00:00+00:00')",
  )
  .await
  .unwrap();

  assert_eq!(s.load_stats().await.unwrap(), UserStats::default());
  assert!(s.last_quiz_time().await.unwrap().is_none());
}

// ─── Viewed-fact log ─────────────────────────────────────────────────────────

#[tokio::test]
async fn fact_view_log_counts_and_orders() {
  let s = store().await;

  s.append_fact_view(&view("f-1", Category::History)).await.unwrap();
  s.append_fact_view(&view("f-2", Category::Sports)).await.unwrap();
  s.append_fact_view(&view("f-3", Category::Geography)).await.unwrap();

  assert_eq!(s.fact_view_count().await.unwrap(), 3);

  let recent = s.recent_fact_views(2).await.unwrap();
  assert_eq!(recent.len(), 2);
  assert_eq!(recent[0].fact_id, "f-3");
  assert_eq!(recent[1].fact_id, "f-2");

  assert_eq!(s.recent_fact_views(10).await.unwrap().len(), 3);
}

#[tokio::test]
async fn repeat_views_of_one_fact_all_count() {
  let s = store().await;

  s.append_fact_view(&view("f-1", Category::History)).await.unwrap();
  s.append_fact_view(&view("f-1", Category::History)).await.unwrap();

  assert_eq!(s.fact_view_count().await.unwrap(), 2);
}

#[tokio::test]
async fn unknown_category_row_is_an_error() {
  let s = store().await;

  s.execute_raw(
    "INSERT INTO viewed_facts (fact_id, category, viewed_at)
     VALUES ('f-9', 'philosophy', '2026-01-01T00:00:00+00:00')",
  )
  .await
  .unwrap();

  assert!(matches!(
    s.recent_fact_views(10).await,
    Err(crate::Error::UnknownCategory(_))
  ));
}

// ─── Quiz history ────────────────────────────────────────────────────────────

#[tokio::test]
async fn archive_session_sets_the_marker() {
  let s = store().await;

  let session = played_session(2, Utc::now());
  s.archive_session(&session).await.unwrap();

  assert_eq!(s.last_quiz_time().await.unwrap(), session.completed_at);

  let history = s.quiz_history().await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0].id, session.id);
  assert_eq!(history[0].score, 100);
  assert_eq!(history[0].completed_at, session.completed_at);
}

#[tokio::test]
async fn history_lists_newest_first() {
  let s = store().await;

  let older = played_session(3, Utc::now() - Duration::hours(2));
  let newer = played_session(1, Utc::now());
  s.archive_session(&older).await.unwrap();
  s.archive_session(&newer).await.unwrap();

  let history = s.quiz_history().await.unwrap();
  assert_eq!(history.len(), 2);
  assert_eq!(history[0].id, newer.id);
  assert_eq!(history[1].id, older.id);
}

#[tokio::test]
async fn corrupt_history_row_is_skipped() {
  let s = store().await;

  let session = played_session(3, Utc::now());
  s.archive_session(&session).await.unwrap();
  s.execute_raw(
    "INSERT INTO quiz_history
       (session_id, started_at, completed_at, score, perfect, session_json)
     VALUES ('zzz', '2026-01-01T00:00:00+00:00', NULL, 0, 0, '{broken')",
  )
  .await
  .unwrap();

  let history = s.quiz_history().await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0].id, session.id);
}

// ─── Reset ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn reset_all_clears_every_key() {
  let s = store().await;

  let mut stats = UserStats::default();
  stats.award_points(640);
  s.save_stats(&stats).await.unwrap();
  s.save_badges(&[badge::spec("first-steps").unwrap().unlock(Utc::now())])
    .await
    .unwrap();
  s.append_fact_view(&view("f-1", Category::History)).await.unwrap();
  s.archive_session(&played_session(3, Utc::now())).await.unwrap();

  s.reset_all().await.unwrap();

  assert_eq!(s.load_stats().await.unwrap(), UserStats::default());
  assert!(s.load_badges().await.unwrap().is_empty());
  assert!(s.last_quiz_time().await.unwrap().is_none());
  assert_eq!(s.fact_view_count().await.unwrap(), 0);
  assert!(s.quiz_history().await.unwrap().is_empty());
}

// ─── Engine over SQLite ──────────────────────────────────────────────────────

#[tokio::test]
async fn engine_runs_a_full_quiz_over_sqlite() {
  let mut engine = Engine::new(store().await);

  let fact = Fact {
    id:         "f-1".into(),
    category:   Category::Science,
    title:      "A fact".into(),
    body:       "Something true.".into(),
    source:     None,
    difficulty: Difficulty::Medium,
  };
  let outcome = engine.record_fact_view(&fact).await.unwrap();
  assert_eq!(outcome.points.awarded, 10);

  assert_eq!(
    engine.quiz_availability().await.unwrap(),
    QuizAvailability::NeedMoreFacts { facts_needed: 99 }
  );

  engine.start_quiz(questions(10)).unwrap();
  loop {
    let right = engine
      .active_session()
      .unwrap()
      .current_question()
      .unwrap()
      .correct_index;
    engine.submit_answer(right).await.unwrap().unwrap();
    if let AdvanceOutcome::Finished(finish) = engine.advance().await.unwrap() {
      assert!(finish.session.perfect);
      assert_eq!(finish.session.score, 700);
      break;
    }
  }

  let stats = engine.stats().await.unwrap();
  assert_eq!(stats.total_points, 710);
  assert_eq!(stats.level, 2);
  assert_eq!(stats.quizzes_perfect, 1);

  // The archive committed, so the cooldown gate is now closed.
  assert!(matches!(
    engine.quiz_availability().await.unwrap(),
    QuizAvailability::CoolingDown { .. }
  ));
  assert_eq!(engine.quiz_history().await.unwrap().len(), 1);
}
