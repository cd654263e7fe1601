//! Answer-option shuffling.
//!
//! Options are tagged with a transient correctness flag, run through a
//! uniform Fisher–Yates permutation, and the tagged option's new position is
//! reported back. The flag itself never leaves this function, so consuming
//! code cannot read the answer out of the returned options.

use rand::{Rng, seq::SliceRandom as _};

/// Shuffle `options` and report where the correct one landed.
///
/// Inputs with fewer than two options (or a correct index that does not point
/// into them) pass through unchanged. Never fails.
#[must_use]
pub fn shuffle_options<R: Rng>(
  options: Vec<String>,
  correct_index: usize,
  rng: &mut R,
) -> (Vec<String>, usize) {
  if options.len() < 2 || correct_index >= options.len() {
    return (options, correct_index);
  }

  let mut tagged: Vec<(String, bool)> = options
    .into_iter()
    .enumerate()
    .map(|(i, text)| (text, i == correct_index))
    .collect();

  tagged.shuffle(rng);

  let new_index = tagged
    .iter()
    .position(|(_, is_correct)| *is_correct)
    .unwrap_or(correct_index);

  let options = tagged.into_iter().map(|(text, _)| text).collect();
  (options, new_index)
}
