//! `ken quiz` — the gated quiz flow.

use ken_core::{
  eligibility::COOLDOWN_HOURS,
  engine::{AdvanceOutcome, Engine, QuizFinish},
  quiz::QUESTIONS_PER_QUIZ,
};
use ken_store_sqlite::SqliteStore;
use rand::seq::SliceRandom as _;

use crate::{catalog, prompt};

pub async fn run(engine: &mut Engine<SqliteStore>) -> anyhow::Result<()> {
  let check = engine.check_streak().await?;
  if check.outcome.is_new_day {
    println!("🔥 Day {} of your streak!", check.outcome.streak);
  }

  let availability = engine.quiz_availability().await?;
  if !availability.is_ready() {
    println!("{availability}");
    return Ok(());
  }

  let prefs = engine.preferences().await?;
  let mut pool = catalog::questions_in(&prefs.selected_categories);
  if pool.is_empty() {
    println!("No questions available for the current category selection.");
    return Ok(());
  }

  let mut rng = rand::thread_rng();
  pool.shuffle(&mut rng);
  let batch: Vec<_> = pool
    .into_iter()
    .take(QUESTIONS_PER_QUIZ)
    .map(catalog::QuestionDef::to_question)
    .collect();

  engine.start_quiz(batch)?;

  loop {
    // Present the current question, releasing the session borrow before
    // the prompt blocks.
    let options_len = match engine.active_session() {
      Some(session) => match session.current_question() {
        Some(question) => {
          println!();
          println!(
            "Question {}/{} · {} {}",
            session.current_index + 1,
            session.questions.len(),
            question.category.icon(),
            question.category.label()
          );
          println!("{}", question.question);
          for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {option}", prompt::letter(i));
          }
          question.options.len()
        }
        None => break,
      },
      None => break,
    };

    let Some(pick) = prompt::choose_option(options_len)? else {
      println!();
      println!("Quiz abandoned.");
      engine.reset_quiz();
      return Ok(());
    };

    let Some(feedback) = engine.submit_answer(pick).await? else {
      break;
    };

    if feedback.correct {
      prompt::chime(prefs.sound_enabled);
      let awarded = feedback.points.map(|p| p.awarded).unwrap_or(0);
      println!("✅ Correct! +{awarded} points");
    } else {
      println!(
        "❌ Not quite — the answer was {}).",
        prompt::letter(feedback.correct_index)
      );
    }
    if let Some(explanation) = &feedback.explanation {
      println!("   {explanation}");
    }

    match engine.advance().await? {
      AdvanceOutcome::Next { .. } => {
        if prompt::read_line("\n[Enter] next question ")?.is_none() {
          println!("Quiz abandoned.");
          engine.reset_quiz();
          return Ok(());
        }
      }
      AdvanceOutcome::Finished(finish) => {
        print_results(&finish);
        engine.reset_quiz();
        break;
      }
      AdvanceOutcome::Inactive => break,
    }
  }

  Ok(())
}

fn print_results(finish: &QuizFinish) {
  let session = &finish.session;
  let grade = session.grade();

  println!();
  println!("════ Quiz complete ════");
  println!(
    "{}/{} correct ({:.0}%) — {}",
    session.correct_count(),
    session.questions.len(),
    session.percentage(),
    grade.label()
  );
  println!("{}", grade.message());
  println!("Score: {} points", session.score);
  if let Some(bonus) = finish.bonus {
    println!("💯 Perfect quiz! +{} bonus points", bonus.awarded);
  }
  for badge in &finish.new_badges {
    println!(
      "{} Badge unlocked: {} — {}",
      badge.icon, badge.name, badge.description
    );
  }
  println!("The next quiz unlocks in {COOLDOWN_HOURS} hours.");
}
