//! Quiz questions, sessions, and the session state machine.
//!
//! A session moves through *not started → active → completed*. Answers are
//! append-only and scored as they are recorded; advancing past the last
//! question finalises the session (perfect flag, bonus, completion
//! timestamp). Out-of-state calls are deliberate no-ops rather than errors:
//! they only arise from caller misuse, and the machine tolerates them.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  category::Category,
  fact::Difficulty,
  progress::{CORRECT_ANSWER_POINTS, PERFECT_QUIZ_BONUS},
  shuffle,
};

/// Number of questions drawn into one quiz.
pub const QUESTIONS_PER_QUIZ: usize = 10;

// ─── Question ────────────────────────────────────────────────────────────────

/// How a question is presented. The engine scores every format the same way
/// (one correct option index); the tag drives presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizFormat {
  MultipleChoice,
  TrueFalse,
  MultipleCorrect,
  BestAnswer,
  ClosestEstimate,
  CompleteStatement,
  DefinitionMatching,
  CauseEffect,
  ExceptionFinding,
  CategoryClassification,
  TimelineSort,
  BeforeAfter,
  SizeOrdering,
  ImageRecognition,
  ImageZoom,
  DragDropSort,
}

/// A quiz question. Inside a session the options are already shuffled and
/// `correct_index` points at the correct option's *shuffled* position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
  pub id:            String,
  /// The catalog fact this question was written from.
  pub fact_id:       String,
  pub category:      Category,
  pub format:        QuizFormat,
  pub question:      String,
  pub options:       Vec<String>,
  pub correct_index: usize,
  /// Shown after answering, when the catalog provides one.
  pub explanation:   Option<String>,
  pub difficulty:    Difficulty,
}

impl QuizQuestion {
  /// The same question with its options shuffled and `correct_index`
  /// re-pointed at the correct option's new slot.
  #[must_use]
  pub fn shuffled<R: Rng>(mut self, rng: &mut R) -> Self {
    let (options, correct_index) =
      shuffle::shuffle_options(self.options, self.correct_index, rng);
    self.options = options;
    self.correct_index = correct_index;
    self
  }
}

// ─── Answers ─────────────────────────────────────────────────────────────────

/// One recorded answer. Append-only within a session, in question order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
  pub question_id:    String,
  pub selected_index: usize,
  pub correct:        bool,
  pub answered_at:    DateTime<Utc>,
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// What [`QuizSession::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
  /// Moved on to the question at the new `current_index`.
  Advanced,
  /// The last question was passed; the session is now finalised.
  Finished,
  /// Already finalised; nothing happened.
  Inactive,
}

/// A bounded run of questions answered in one sitting.
///
/// `completed_at` doubles as the terminal-state marker: while it is `None`
/// the session is active and at the question `current_index` points to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
  pub id:            Uuid,
  pub questions:     Vec<QuizQuestion>,
  pub current_index: usize,
  pub answers:       Vec<QuizAnswer>,
  pub score:         u64,
  /// Fixed at finalisation; `false` while active.
  pub perfect:       bool,
  pub started_at:    DateTime<Utc>,
  pub completed_at:  Option<DateTime<Utc>>,
}

impl QuizSession {
  /// Start a session over an already-shuffled question batch.
  #[must_use]
  pub fn new(questions: Vec<QuizQuestion>, started_at: DateTime<Utc>) -> Self {
    Self {
      id: Uuid::new_v4(),
      questions,
      current_index: 0,
      answers: Vec::new(),
      score: 0,
      perfect: false,
      started_at,
      completed_at: None,
    }
  }

  pub fn is_completed(&self) -> bool { self.completed_at.is_some() }

  /// The question currently presented, or `None` once finalised.
  pub fn current_question(&self) -> Option<&QuizQuestion> {
    if self.is_completed() {
      return None;
    }
    self.questions.get(self.current_index)
  }

  /// Whether the current question already has its answer recorded.
  pub fn current_answered(&self) -> bool {
    self.answers.len() > self.current_index
  }

  /// Record an answer for the current question and score it immediately.
  ///
  /// Valid only while active, and once per question; any other call is a
  /// no-op returning `None`. The pointer does not advance — callers show
  /// feedback first, then call [`advance`](Self::advance).
  pub fn submit(
    &mut self,
    selected_index: usize,
    now: DateTime<Utc>,
  ) -> Option<bool> {
    if self.current_answered() {
      return None;
    }
    let question = self.current_question()?;
    let question_id = question.id.clone();
    let correct = selected_index == question.correct_index;

    self.answers.push(QuizAnswer {
      question_id,
      selected_index,
      correct,
      answered_at: now,
    });
    if correct {
      self.score += CORRECT_ANSWER_POINTS as u64;
    }
    Some(correct)
  }

  /// Move the pointer forward; finalise when it passes the last question.
  pub fn advance(&mut self, now: DateTime<Utc>) -> SessionStep {
    if self.is_completed() {
      return SessionStep::Inactive;
    }

    self.current_index += 1;
    if self.current_index < self.questions.len() {
      return SessionStep::Advanced;
    }

    self.perfect = self.answers.len() == self.questions.len()
      && self.answers.iter().all(|a| a.correct);
    if self.perfect {
      self.score += PERFECT_QUIZ_BONUS as u64;
    }
    self.completed_at = Some(now);
    SessionStep::Finished
  }

  pub fn correct_count(&self) -> usize {
    self.answers.iter().filter(|a| a.correct).count()
  }

  /// Share of questions answered correctly, as a percentage.
  pub fn percentage(&self) -> f64 {
    if self.questions.is_empty() {
      return 0.0;
    }
    (self.correct_count() as f64 / self.questions.len() as f64) * 100.0
  }

  pub fn grade(&self) -> QuizGrade {
    QuizGrade::for_percentage(self.percentage())
  }
}

// ─── Grade ───────────────────────────────────────────────────────────────────

/// Result-screen band for a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizGrade {
  Perfect,
  Excellent,
  Good,
  Fair,
  NeedsWork,
}

impl QuizGrade {
  /// Band boundaries: 100 / 80 / 60 / 40.
  #[must_use]
  pub fn for_percentage(percentage: f64) -> Self {
    if percentage >= 100.0 {
      QuizGrade::Perfect
    } else if percentage >= 80.0 {
      QuizGrade::Excellent
    } else if percentage >= 60.0 {
      QuizGrade::Good
    } else if percentage >= 40.0 {
      QuizGrade::Fair
    } else {
      QuizGrade::NeedsWork
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      QuizGrade::Perfect => "PERFECT",
      QuizGrade::Excellent => "EXCELLENT",
      QuizGrade::Good => "GOOD",
      QuizGrade::Fair => "FAIR",
      QuizGrade::NeedsWork => "NEEDS WORK",
    }
  }

  pub fn message(self) -> &'static str {
    match self {
      QuizGrade::Perfect => "Unbelievable! A perfect score!",
      QuizGrade::Excellent => "Excellently done!",
      QuizGrade::Good => "Good going!",
      QuizGrade::Fair => "Not bad, keep practicing!",
      QuizGrade::NeedsWork => "Time to learn some more!",
    }
  }
}
