//! The closed set of content categories.
//!
//! Categories tag facts, quiz questions, per-category statistics, and the
//! expert badges. The set is fixed; adding a category means touching this
//! module, the badge table, and nothing else.

use serde::{Deserialize, Serialize};

/// A content category tag. Serialised in kebab-case, matching the slugs used
/// as storage keys and badge-id suffixes.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
  History,
  Science,
  Sports,
  Entertainment,
  ArtsCulture,
  Spelling,
  Biology,
  Geography,
}

impl Category {
  /// Every category, in display order.
  pub const ALL: [Category; 8] = [
    Category::History,
    Category::Science,
    Category::Sports,
    Category::Entertainment,
    Category::ArtsCulture,
    Category::Spelling,
    Category::Biology,
    Category::Geography,
  ];

  /// Stable machine-readable tag. Must match the serde representation above.
  pub fn slug(self) -> &'static str {
    match self {
      Category::History => "history",
      Category::Science => "science",
      Category::Sports => "sports",
      Category::Entertainment => "entertainment",
      Category::ArtsCulture => "arts-culture",
      Category::Spelling => "spelling",
      Category::Biology => "biology",
      Category::Geography => "geography",
    }
  }

  /// Parse a slug back into a category. Returns `None` for unknown tags.
  pub fn from_slug(s: &str) -> Option<Self> {
    Category::ALL.into_iter().find(|c| c.slug() == s)
  }

  /// Human-readable display name.
  pub fn label(self) -> &'static str {
    match self {
      Category::History => "History",
      Category::Science => "Science",
      Category::Sports => "Sports",
      Category::Entertainment => "Entertainment",
      Category::ArtsCulture => "Arts & Culture",
      Category::Spelling => "Spelling",
      Category::Biology => "Biology",
      Category::Geography => "Geography",
    }
  }

  /// Display icon shown next to the label.
  pub fn icon(self) -> &'static str {
    match self {
      Category::History => "📜",
      Category::Science => "🔬",
      Category::Sports => "⚽",
      Category::Entertainment => "🎬",
      Category::ArtsCulture => "🎨",
      Category::Spelling => "📝",
      Category::Biology => "🧬",
      Category::Geography => "🌍",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slug_roundtrip() {
    for category in Category::ALL {
      assert_eq!(Category::from_slug(category.slug()), Some(category));
    }
  }

  #[test]
  fn from_slug_rejects_unknown() {
    assert_eq!(Category::from_slug("alchemy"), None);
    assert_eq!(Category::from_slug(""), None);
  }

  #[test]
  fn serde_tag_matches_slug() {
    for category in Category::ALL {
      let json = serde_json::to_string(&category).unwrap();
      assert_eq!(json, format!("\"{}\"", category.slug()));
    }
  }
}
