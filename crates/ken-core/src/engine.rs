//! The profile engine: rules composed over a [`ProfileStore`].
//!
//! Every operation is one logical transaction: load the documents it needs,
//! compute the full next state (including re-derived level fields), write the
//! result back whole. The engine owns the active quiz session in memory; a
//! session only reaches storage once, at finalisation.

use chrono::{DateTime, Utc};

use crate::{
  Error, Result,
  badge::{self, Badge, BadgeSpec},
  eligibility::{self, QuizAvailability},
  fact::{Fact, ViewedFact},
  prefs::UserPreferences,
  quiz::{QuizQuestion, QuizSession, SessionStep},
  stats::{PointsOutcome, UserStats},
  store::ProfileStore,
  streak::{self, StreakOutcome},
};

fn boxed<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}

// ─── Operation outcomes ──────────────────────────────────────────────────────

/// Result of the session-start streak pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakCheck {
  pub outcome: StreakOutcome,
  /// The continuation bonus, when one was earned.
  pub points:  Option<PointsOutcome>,
}

/// Result of recording a fact view.
#[derive(Debug, Clone)]
pub struct FactViewOutcome {
  pub points:     PointsOutcome,
  pub new_badges: Vec<Badge>,
}

/// Feedback for one submitted answer.
#[derive(Debug, Clone)]
pub struct AnswerFeedback {
  pub correct:       bool,
  /// Where the correct option sits in the shuffled order.
  pub correct_index: usize,
  pub explanation:   Option<String>,
  /// The per-answer award, present when the answer was correct.
  pub points:        Option<PointsOutcome>,
}

/// A finalised quiz, with everything the result screen shows.
#[derive(Debug, Clone)]
pub struct QuizFinish {
  pub session:    QuizSession,
  /// The perfect bonus, when the quiz was perfect.
  pub bonus:      Option<PointsOutcome>,
  pub new_badges: Vec<Badge>,
}

/// What [`Engine::advance`] did.
#[derive(Debug, Clone)]
pub enum AdvanceOutcome {
  /// No active session, or the session was already finalised.
  Inactive,
  /// Moved on; `index` is the new current question.
  Next { index: usize },
  Finished(QuizFinish),
}

/// One badge's unlock state plus display progress.
#[derive(Debug, Clone, Copy)]
pub struct BadgeProgress {
  pub spec:        &'static BadgeSpec,
  pub unlocked_at: Option<DateTime<Utc>>,
  pub current:     u64,
  pub target:      u64,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// The rules engine over a storage backend.
pub struct Engine<S> {
  store:   S,
  session: Option<QuizSession>,
}

impl<S: ProfileStore> Engine<S> {
  pub fn new(store: S) -> Self { Self { store, session: None } }

  pub fn store(&self) -> &S { &self.store }

  /// Load stats with the level fields re-derived, so a hand-edited or stale
  /// document can never surface a level that disagrees with its points.
  async fn load_stats(&self) -> Result<UserStats> {
    let mut stats = self.store.load_stats().await.map_err(boxed)?;
    stats.refresh_level();
    Ok(stats)
  }

  // ── Streak ────────────────────────────────────────────────────────────

  /// The once-per-session streak pass: compare the last active day to
  /// today, roll the day over if needed, award the continuation bonus.
  pub async fn check_streak(&self) -> Result<StreakCheck> {
    let now = Utc::now();
    let mut stats = self.load_stats().await?;

    let outcome = streak::evaluate(
      stats.last_active.map(|t| t.date_naive()),
      now.date_naive(),
      stats.current_streak,
    );
    let points = stats.apply_streak(outcome, now);

    if outcome.is_new_day {
      self.store.save_stats(&stats).await.map_err(boxed)?;
    }
    Ok(StreakCheck { outcome, points })
  }

  // ── Facts ─────────────────────────────────────────────────────────────

  /// Record that `fact` was shown: append to the viewed-fact log, bump the
  /// counters, award the view points, and run a badge pass.
  pub async fn record_fact_view(&self, fact: &Fact) -> Result<FactViewOutcome> {
    let now = Utc::now();
    let mut stats = self.load_stats().await?;
    let points = stats.record_fact_view(fact.category, now);

    let view = ViewedFact {
      fact_id:   fact.id.clone(),
      category:  fact.category,
      viewed_at: now,
    };
    self.store.append_fact_view(&view).await.map_err(boxed)?;

    let new_badges = self.unlock_new_badges(&stats, now).await?;
    self.store.save_stats(&stats).await.map_err(boxed)?;

    Ok(FactViewOutcome { points, new_badges })
  }

  pub async fn recent_fact_views(&self, limit: usize) -> Result<Vec<ViewedFact>> {
    self.store.recent_fact_views(limit).await.map_err(boxed)
  }

  // ── Quiz ──────────────────────────────────────────────────────────────

  /// Evaluate the eligibility gate against the stored log and marker.
  pub async fn quiz_availability(&self) -> Result<QuizAvailability> {
    let facts_viewed = self.store.fact_view_count().await.map_err(boxed)?;
    let last_quiz = self.store.last_quiz_time().await.map_err(boxed)?;
    Ok(eligibility::check_availability(facts_viewed, last_quiz, Utc::now()))
  }

  /// Start a session over `questions`, shuffling each question's options.
  ///
  /// A session already in flight is replaced; it was never finalised, so it
  /// leaves no trace. Callers are expected to have consulted
  /// [`quiz_availability`](Self::quiz_availability) first.
  pub fn start_quiz(
    &mut self,
    questions: Vec<QuizQuestion>,
  ) -> Result<&QuizSession> {
    if questions.is_empty() {
      return Err(Error::EmptyQuiz);
    }

    let mut rng = rand::thread_rng();
    let questions: Vec<QuizQuestion> =
      questions.into_iter().map(|q| q.shuffled(&mut rng)).collect();

    Ok(self.session.insert(QuizSession::new(questions, Utc::now())))
  }

  pub fn active_session(&self) -> Option<&QuizSession> {
    self.session.as_ref()
  }

  /// Submit an answer for the current question. Out-of-state calls (no
  /// session, question already answered, session finalised) return
  /// `Ok(None)` and change nothing.
  pub async fn submit_answer(
    &mut self,
    selected_index: usize,
  ) -> Result<Option<AnswerFeedback>> {
    let now = Utc::now();
    let Some(session) = self.session.as_mut() else {
      return Ok(None);
    };
    let Some(question) = session.current_question() else {
      return Ok(None);
    };
    let category = question.category;
    let correct_index = question.correct_index;
    let explanation = question.explanation.clone();

    let Some(correct) = session.submit(selected_index, now) else {
      return Ok(None);
    };

    let mut stats = self.load_stats().await?;
    let points = stats.record_quiz_answer(category, correct);
    self.store.save_stats(&stats).await.map_err(boxed)?;

    Ok(Some(AnswerFeedback { correct, correct_index, explanation, points }))
  }

  /// Move the session forward. Finalisation archives the session together
  /// with the last-quiz marker, applies the completion stats, and runs a
  /// badge pass.
  pub async fn advance(&mut self) -> Result<AdvanceOutcome> {
    let now = Utc::now();
    let Some(session) = self.session.as_mut() else {
      return Ok(AdvanceOutcome::Inactive);
    };

    match session.advance(now) {
      SessionStep::Inactive => Ok(AdvanceOutcome::Inactive),
      SessionStep::Advanced => {
        Ok(AdvanceOutcome::Next { index: session.current_index })
      }
      SessionStep::Finished => {
        let finished = session.clone();
        self.store.archive_session(&finished).await.map_err(boxed)?;

        let mut stats = self.load_stats().await?;
        let bonus = stats.record_quiz_complete(finished.perfect);
        let new_badges = self.unlock_new_badges(&stats, now).await?;
        self.store.save_stats(&stats).await.map_err(boxed)?;

        Ok(AdvanceOutcome::Finished(QuizFinish {
          session: finished,
          bonus,
          new_badges,
        }))
      }
    }
  }

  /// Drop the in-memory session. Finalised sessions were already archived.
  pub fn reset_quiz(&mut self) { self.session = None; }

  pub async fn quiz_history(&self) -> Result<Vec<QuizSession>> {
    self.store.quiz_history().await.map_err(boxed)
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  pub async fn stats(&self) -> Result<UserStats> {
    self.load_stats().await
  }

  pub async fn preferences(&self) -> Result<UserPreferences> {
    self.store.load_preferences().await.map_err(boxed)
  }

  pub async fn unlocked_badges(&self) -> Result<Vec<Badge>> {
    self.store.load_badges().await.map_err(boxed)
  }

  /// Unlock state and display progress for the full badge table.
  pub async fn badge_progress(&self) -> Result<Vec<BadgeProgress>> {
    let stats = self.load_stats().await?;
    let unlocked = self.store.load_badges().await.map_err(boxed)?;

    Ok(
      badge::BADGES
        .iter()
        .map(|spec| {
          let (current, target) = spec.requirement.progress(&stats);
          BadgeProgress {
            spec,
            unlocked_at: unlocked
              .iter()
              .find(|b| b.id == spec.id)
              .map(|b| b.unlocked_at),
            current,
            target,
          }
        })
        .collect(),
    )
  }

  // ── Preferences ───────────────────────────────────────────────────────

  /// Replace the preferences document. The category selection is
  /// deduplicated and must not be empty.
  pub async fn update_preferences(
    &self,
    mut prefs: UserPreferences,
  ) -> Result<UserPreferences> {
    if prefs.selected_categories.is_empty() {
      return Err(Error::NoCategoriesSelected);
    }
    prefs.selected_categories.sort();
    prefs.selected_categories.dedup();

    self.store.save_preferences(&prefs).await.map_err(boxed)?;
    Ok(prefs)
  }

  // ── Reset ─────────────────────────────────────────────────────────────

  /// Clear every persisted key and drop the active session.
  pub async fn reset_all(&mut self) -> Result<()> {
    self.session = None;
    self.store.reset_all().await.map_err(boxed)
  }

  // ── Internals ─────────────────────────────────────────────────────────

  async fn unlock_new_badges(
    &self,
    stats: &UserStats,
    now: DateTime<Utc>,
  ) -> Result<Vec<Badge>> {
    let unlocked = self.store.load_badges().await.map_err(boxed)?;
    let new_badges = badge::evaluate(stats, &unlocked, now);

    if !new_badges.is_empty() {
      let mut merged = unlocked;
      merged.extend(new_badges.iter().cloned());
      self.store.save_badges(&merged).await.map_err(boxed)?;
    }
    Ok(new_badges)
  }
}

#[cfg(test)]
mod tests {
  use std::{convert::Infallible, sync::Mutex};

  use super::*;
  use crate::{category::Category, fact::Difficulty, quiz::QuizFormat};

  // A bare in-memory backend; enough store to drive the engine.
  #[derive(Default)]
  struct MemoryStore {
    inner: Mutex<MemoryInner>,
  }

  #[derive(Default)]
  struct MemoryInner {
    stats:       Option<UserStats>,
    preferences: Option<UserPreferences>,
    badges:      Vec<Badge>,
    views:       Vec<ViewedFact>,
    history:     Vec<QuizSession>,
    last_quiz:   Option<DateTime<Utc>>,
  }

  impl ProfileStore for MemoryStore {
    type Error = Infallible;

    async fn load_stats(&self) -> Result<UserStats, Infallible> {
      Ok(self.inner.lock().unwrap().stats.clone().unwrap_or_default())
    }

    async fn save_stats(&self, stats: &UserStats) -> Result<(), Infallible> {
      self.inner.lock().unwrap().stats = Some(stats.clone());
      Ok(())
    }

    async fn load_preferences(&self) -> Result<UserPreferences, Infallible> {
      Ok(
        self
          .inner
          .lock()
          .unwrap()
          .preferences
          .clone()
          .unwrap_or_default(),
      )
    }

    async fn save_preferences(
      &self,
      prefs: &UserPreferences,
    ) -> Result<(), Infallible> {
      self.inner.lock().unwrap().preferences = Some(prefs.clone());
      Ok(())
    }

    async fn append_fact_view(
      &self,
      view: &ViewedFact,
    ) -> Result<(), Infallible> {
      self.inner.lock().unwrap().views.push(view.clone());
      Ok(())
    }

    async fn fact_view_count(&self) -> Result<u64, Infallible> {
      Ok(self.inner.lock().unwrap().views.len() as u64)
    }

    async fn recent_fact_views(
      &self,
      limit: usize,
    ) -> Result<Vec<ViewedFact>, Infallible> {
      let inner = self.inner.lock().unwrap();
      Ok(inner.views.iter().rev().take(limit).cloned().collect())
    }

    async fn archive_session(
      &self,
      session: &QuizSession,
    ) -> Result<(), Infallible> {
      let mut inner = self.inner.lock().unwrap();
      inner.history.push(session.clone());
      inner.last_quiz = session.completed_at;
      Ok(())
    }

    async fn quiz_history(&self) -> Result<Vec<QuizSession>, Infallible> {
      let inner = self.inner.lock().unwrap();
      Ok(inner.history.iter().rev().cloned().collect())
    }

    async fn last_quiz_time(
      &self,
    ) -> Result<Option<DateTime<Utc>>, Infallible> {
      Ok(self.inner.lock().unwrap().last_quiz)
    }

    async fn load_badges(&self) -> Result<Vec<Badge>, Infallible> {
      Ok(self.inner.lock().unwrap().badges.clone())
    }

    async fn save_badges(&self, badges: &[Badge]) -> Result<(), Infallible> {
      self.inner.lock().unwrap().badges = badges.to_vec();
      Ok(())
    }

    async fn reset_all(&self) -> Result<(), Infallible> {
      *self.inner.lock().unwrap() = MemoryInner::default();
      Ok(())
    }
  }

  fn engine() -> Engine<MemoryStore> {
    Engine::new(MemoryStore::default())
  }

  fn fact(id: &str, category: Category) -> Fact {
    Fact {
      id: id.into(),
      category,
      title: "A fact".into(),
      body: "Something true.".into(),
      source: None,
      difficulty: Difficulty::Medium,
    }
  }

  fn questions(count: usize) -> Vec<QuizQuestion> {
    (0..count)
      .map(|n| QuizQuestion {
        id:            format!("q-{n}"),
        fact_id:       format!("f-{n}"),
        category:      Category::Geography,
        format:        QuizFormat::MultipleChoice,
        question:      format!("Question {n}?"),
        options:       vec!["a".into(), "b".into(), "c".into(), "d".into()],
        correct_index: n % 4,
        explanation:   Some("Because.".into()),
        difficulty:    Difficulty::Easy,
      })
      .collect()
  }

  /// Drive the active session to completion, answering `correct` questions
  /// correctly and the rest wrong.
  async fn play_quiz(
    engine: &mut Engine<MemoryStore>,
    correct: usize,
  ) -> QuizFinish {
    let total = engine.active_session().unwrap().questions.len();
    for n in 0..total {
      let question_correct_index = engine
        .active_session()
        .unwrap()
        .current_question()
        .unwrap()
        .correct_index;
      let selected = if n < correct {
        question_correct_index
      } else {
        (question_correct_index + 1) % 4
      };

      let feedback = engine.submit_answer(selected).await.unwrap().unwrap();
      assert_eq!(feedback.correct, n < correct);

      match engine.advance().await.unwrap() {
        AdvanceOutcome::Next { index } => assert_eq!(index, n + 1),
        AdvanceOutcome::Finished(finish) => {
          assert_eq!(n, total - 1);
          return finish;
        }
        AdvanceOutcome::Inactive => panic!("session went inactive mid-quiz"),
      }
    }
    panic!("quiz never finished");
  }

  #[tokio::test]
  async fn fact_view_awards_points_and_first_badge() {
    let engine = engine();
    let outcome =
      engine.record_fact_view(&fact("f-1", Category::History)).await.unwrap();

    assert_eq!(outcome.points.awarded, 10);
    assert_eq!(outcome.new_badges.len(), 1);
    assert_eq!(outcome.new_badges[0].id, "first-steps");

    let stats = engine.stats().await.unwrap();
    assert_eq!(stats.total_points, 10);
    assert_eq!(stats.facts_viewed, 1);
    assert_eq!(stats.category_stats[&Category::History].facts_viewed, 1);

    assert_eq!(engine.store().fact_view_count().await.unwrap(), 1);
  }

  #[tokio::test]
  async fn perfect_quiz_scores_seven_hundred() {
    let mut engine = engine();
    engine.start_quiz(questions(10)).unwrap();
    let finish = play_quiz(&mut engine, 10).await;

    assert!(finish.session.perfect);
    assert_eq!(finish.session.score, 700);
    assert_eq!(finish.bonus.unwrap().awarded, 200);

    let stats = engine.stats().await.unwrap();
    assert_eq!(stats.total_points, 700);
    assert_eq!(stats.quizzes_completed, 1);
    assert_eq!(stats.quizzes_perfect, 1);

    let badge_ids: Vec<_> =
      finish.new_badges.iter().map(|b| b.id.as_str()).collect();
    assert!(badge_ids.contains(&"quiz-master"));
    assert!(badge_ids.contains(&"perfect-score"));

    assert_eq!(engine.quiz_history().await.unwrap().len(), 1);
    assert!(engine.store().last_quiz_time().await.unwrap().is_some());
  }

  #[tokio::test]
  async fn partial_quiz_scores_three_fifty() {
    let mut engine = engine();
    engine.start_quiz(questions(10)).unwrap();
    let finish = play_quiz(&mut engine, 7).await;

    assert!(!finish.session.perfect);
    assert_eq!(finish.session.score, 350);
    assert!(finish.bonus.is_none());

    let stats = engine.stats().await.unwrap();
    assert_eq!(stats.total_points, 350);
    assert_eq!(stats.quizzes_perfect, 0);

    let geography = &stats.category_stats[&Category::Geography];
    assert_eq!(geography.quiz_correct, 7);
    assert_eq!(geography.quiz_total, 10);
    assert!((geography.accuracy - 70.0).abs() < f64::EPSILON);
  }

  #[tokio::test]
  async fn out_of_state_calls_are_no_ops() {
    let mut engine = engine();
    assert!(engine.submit_answer(0).await.unwrap().is_none());
    assert!(matches!(
      engine.advance().await.unwrap(),
      AdvanceOutcome::Inactive
    ));

    engine.start_quiz(questions(2)).unwrap();
    engine.submit_answer(0).await.unwrap().unwrap();
    // Second submission for the same question.
    assert!(engine.submit_answer(1).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn empty_question_batch_is_rejected() {
    let mut engine = engine();
    assert!(matches!(
      engine.start_quiz(Vec::new()),
      Err(Error::EmptyQuiz)
    ));
  }

  #[tokio::test]
  async fn starting_again_replaces_the_session() {
    let mut engine = engine();
    let first_id = engine.start_quiz(questions(3)).unwrap().id;
    let second_id = engine.start_quiz(questions(3)).unwrap().id;

    assert_ne!(first_id, second_id);
    // The abandoned session never reached the archive.
    assert!(engine.quiz_history().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn availability_flows_through_the_gates() {
    let engine = engine();
    assert_eq!(
      engine.quiz_availability().await.unwrap(),
      QuizAvailability::NeedMoreFacts { facts_needed: 100 }
    );
  }

  #[tokio::test]
  async fn cooldown_starts_when_a_quiz_is_archived() {
    let mut engine = engine();
    for n in 0..100 {
      engine
        .record_fact_view(&fact(&format!("f-{n}"), Category::Science))
        .await
        .unwrap();
    }
    assert!(engine.quiz_availability().await.unwrap().is_ready());

    engine.start_quiz(questions(10)).unwrap();
    play_quiz(&mut engine, 4).await;

    assert!(matches!(
      engine.quiz_availability().await.unwrap(),
      QuizAvailability::CoolingDown { .. }
    ));
  }

  #[tokio::test]
  async fn first_streak_check_starts_a_streak() {
    let engine = engine();
    let check = engine.check_streak().await.unwrap();

    assert!(check.outcome.is_new_day);
    assert_eq!(check.outcome.streak, 1);
    assert!(!check.outcome.bonus_earned);
    assert!(check.points.is_none());

    let stats = engine.stats().await.unwrap();
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.longest_streak, 1);
  }

  #[tokio::test]
  async fn consecutive_day_earns_the_bonus() {
    let engine = engine();

    // Seed a profile that was last active yesterday.
    let mut stats = UserStats::default();
    stats.current_streak = 2;
    stats.longest_streak = 2;
    stats.last_active = Some(Utc::now() - chrono::Duration::days(1));
    engine.store().save_stats(&stats).await.unwrap();

    let check = engine.check_streak().await.unwrap();
    assert!(check.outcome.bonus_earned);
    assert_eq!(check.outcome.streak, 3);
    assert_eq!(check.points.unwrap().awarded, 25);

    // Same-day re-check changes nothing further.
    let again = engine.check_streak().await.unwrap();
    assert!(!again.outcome.is_new_day);
    assert_eq!(engine.stats().await.unwrap().total_points, 25);
  }

  #[tokio::test]
  async fn preferences_validation_and_normalisation() {
    let engine = engine();

    let mut prefs = UserPreferences::default();
    prefs.selected_categories = vec![];
    assert!(matches!(
      engine.update_preferences(prefs).await,
      Err(Error::NoCategoriesSelected)
    ));

    let mut prefs = UserPreferences::default();
    prefs.selected_categories =
      vec![Category::Sports, Category::History, Category::Sports];
    let saved = engine.update_preferences(prefs).await.unwrap();
    assert_eq!(
      saved.selected_categories,
      vec![Category::History, Category::Sports]
    );
    assert_eq!(engine.preferences().await.unwrap(), saved);
  }

  #[tokio::test]
  async fn reset_all_returns_to_defaults() {
    let mut engine = engine();
    engine
      .record_fact_view(&fact("f-1", Category::Spelling))
      .await
      .unwrap();
    engine.start_quiz(questions(2)).unwrap();

    engine.reset_all().await.unwrap();

    assert!(engine.active_session().is_none());
    let stats = engine.stats().await.unwrap();
    assert_eq!(stats, UserStats::default());
    assert!(engine.unlocked_badges().await.unwrap().is_empty());
    assert_eq!(engine.store().fact_view_count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn badge_progress_covers_the_whole_table() {
    let engine = engine();
    engine
      .record_fact_view(&fact("f-1", Category::Biology))
      .await
      .unwrap();

    let progress = engine.badge_progress().await.unwrap();
    assert_eq!(progress.len(), badge::BADGES.len());

    let first_steps = progress
      .iter()
      .find(|p| p.spec.id == "first-steps")
      .unwrap();
    assert!(first_steps.unlocked_at.is_some());
    assert_eq!((first_steps.current, first_steps.target), (1, 1));

    let seeker = progress
      .iter()
      .find(|p| p.spec.id == "knowledge-seeker")
      .unwrap();
    assert!(seeker.unlocked_at.is_none());
    assert_eq!((seeker.current, seeker.target), (1, 100));
  }
}
