//! Line-based stdin prompts.

use std::io::{self, BufRead as _, Write as _};

use anyhow::Context as _;

/// Print `prompt` and read one line. `None` means stdin closed.
pub fn read_line(prompt: &str) -> anyhow::Result<Option<String>> {
  print!("{prompt}");
  io::stdout().flush().ok();

  let mut line = String::new();
  let read = io::stdin()
    .lock()
    .read_line(&mut line)
    .context("could not read stdin")?;
  if read == 0 {
    return Ok(None);
  }
  Ok(Some(line.trim().to_string()))
}

/// Keep asking until the answer names one of `len` options, by letter or
/// number. `None` means stdin closed.
pub fn choose_option(len: usize) -> anyhow::Result<Option<usize>> {
  loop {
    let Some(line) = read_line("> ")? else {
      return Ok(None);
    };
    if let Some(pick) = parse_choice(&line, len) {
      return Ok(Some(pick));
    }
    println!(
      "Answer with a letter (a-{}) or a number (1-{len}).",
      letter(len.saturating_sub(1))
    );
  }
}

pub fn letter(index: usize) -> char { (b'a' + (index % 26) as u8) as char }

/// Ring the terminal bell.
pub fn chime(enabled: bool) {
  if enabled {
    print!("\u{7}");
    io::stdout().flush().ok();
  }
}

fn parse_choice(input: &str, len: usize) -> Option<usize> {
  let input = input.trim().to_ascii_lowercase();
  if input.len() == 1 {
    let b = input.as_bytes()[0];
    if b.is_ascii_lowercase() {
      let index = (b - b'a') as usize;
      return (index < len).then_some(index);
    }
  }
  match input.parse::<usize>() {
    Ok(n) if (1..=len).contains(&n) => Some(n - 1),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn letters_and_numbers_both_select() {
    assert_eq!(parse_choice("a", 4), Some(0));
    assert_eq!(parse_choice(" C ", 4), Some(2));
    assert_eq!(parse_choice("4", 4), Some(3));
    assert_eq!(parse_choice("1", 2), Some(0));
  }

  #[test]
  fn out_of_range_answers_are_rejected() {
    assert_eq!(parse_choice("e", 4), None);
    assert_eq!(parse_choice("0", 4), None);
    assert_eq!(parse_choice("5", 4), None);
    assert_eq!(parse_choice("", 4), None);
    assert_eq!(parse_choice("ab", 4), None);
  }
}
