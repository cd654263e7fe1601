//! User preferences.

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Display theme.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Dark,
  Light,
}

/// Profile-wide settings. Invariant: `selected_categories` is never empty —
/// [`crate::engine::Engine::update_preferences`] rejects an empty selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
  /// Categories facts and quiz questions are drawn from.
  pub selected_categories:   Vec<Category>,
  pub sound_enabled:         bool,
  pub notifications_enabled: bool,
  pub theme:                 Theme,
  /// Facts per day the user is aiming for.
  pub daily_goal:            u32,
}

impl Default for UserPreferences {
  fn default() -> Self {
    Self {
      selected_categories:   Category::ALL.to_vec(),
      sound_enabled:         true,
      notifications_enabled: false,
      theme:                 Theme::Dark,
      daily_goal:            5,
    }
  }
}

impl UserPreferences {
  pub fn is_selected(&self, category: Category) -> bool {
    self.selected_categories.contains(&category)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_select_everything() {
    let prefs = UserPreferences::default();
    assert_eq!(prefs.selected_categories.len(), Category::ALL.len());
    assert!(prefs.sound_enabled);
    assert!(!prefs.notifications_enabled);
    assert_eq!(prefs.theme, Theme::Dark);
    assert_eq!(prefs.daily_goal, 5);
  }
}
