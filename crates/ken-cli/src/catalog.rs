//! The built-in fact and question catalogue.
//!
//! Content ships inside the binary; the profile database only ever stores
//! references to it by id. Every question is keyed to the fact it tests, so
//! quizzes always cover material the reading flow can teach.

use ken_core::{
  category::Category,
  fact::{Difficulty, Fact},
  quiz::{QuizFormat, QuizQuestion},
};

pub struct FactDef {
  pub id:         &'static str,
  pub category:   Category,
  pub title:      &'static str,
  pub body:       &'static str,
  pub source:     Option<&'static str>,
  pub difficulty: Difficulty,
}

pub struct QuestionDef {
  pub id:            &'static str,
  pub fact_id:       &'static str,
  pub category:      Category,
  pub format:        QuizFormat,
  pub question:      &'static str,
  pub options:       &'static [&'static str],
  pub correct_index: usize,
  pub explanation:   &'static str,
  pub difficulty:    Difficulty,
}

impl FactDef {
  pub fn to_fact(&self) -> Fact {
    Fact {
      id:         self.id.to_owned(),
      category:   self.category,
      title:      self.title.to_owned(),
      body:       self.body.to_owned(),
      source:     self.source.map(str::to_owned),
      difficulty: self.difficulty,
    }
  }
}

impl QuestionDef {
  pub fn to_question(&self) -> QuizQuestion {
    QuizQuestion {
      id:            self.id.to_owned(),
      fact_id:       self.fact_id.to_owned(),
      category:      self.category,
      format:        self.format,
      question:      self.question.to_owned(),
      options:       self.options.iter().map(|o| (*o).to_owned()).collect(),
      correct_index: self.correct_index,
      explanation:   Some(self.explanation.to_owned()),
      difficulty:    self.difficulty,
    }
  }
}

/// All catalogue facts in `selected` categories.
pub fn facts_in(selected: &[Category]) -> Vec<&'static FactDef> {
  FACTS
    .iter()
    .filter(|f| selected.contains(&f.category))
    .collect()
}

/// All catalogue questions in `selected` categories.
pub fn questions_in(selected: &[Category]) -> Vec<&'static QuestionDef> {
  QUESTIONS
    .iter()
    .filter(|q| selected.contains(&q.category))
    .collect()
}

// ─── Facts ───────────────────────────────────────────────────────────────────

pub const FACTS: &[FactDef] = &[
  FactDef {
    id:         "hist-hundred-years",
    category:   Category::History,
    title:      "The Hundred Years' War lasted 116 years",
    body:       "England and France fought from 1337 to 1453, with long truces \
                 in between. The tidy name came centuries later.",
    source:     Some("Encyclopaedia Britannica"),
    difficulty: Difficulty::Easy,
  },
  FactDef {
    id:         "hist-cleopatra",
    category:   Category::History,
    title:      "Cleopatra lived closer to the Moon landing than to the pyramids",
    body:       "The Great Pyramid of Giza was finished around 2560 BC, about \
                 2,500 years before Cleopatra's birth — and she died only \
                 about 2,000 years before Apollo 11.",
    source:     None,
    difficulty: Difficulty::Medium,
  },
  FactDef {
    id:         "sci-mpemba",
    category:   Category::Science,
    title:      "Hot water can freeze faster than cold water",
    body:       "Under some conditions hot water freezes before cold — the \
                 Mpemba effect, named after the Tanzanian student who pressed \
                 physicists to take his observation seriously in 1963.",
    source:     None,
    difficulty: Difficulty::Medium,
  },
  FactDef {
    id:         "sci-neutron-star",
    category:   Category::Science,
    title:      "A teaspoon of neutron star weighs billions of tonnes",
    body:       "Neutron star matter is so dense that a single teaspoon of it \
                 would weigh around four billion tonnes on Earth.",
    source:     Some("NASA"),
    difficulty: Difficulty::Hard,
  },
  FactDef {
    id:         "sport-gold-medal",
    category:   Category::Sports,
    title:      "Olympic gold medals are mostly silver",
    body:       "A modern Olympic gold medal is at least 92.5% silver; the \
                 rules require only six grams of actual gold in the plating.",
    source:     Some("International Olympic Committee"),
    difficulty: Difficulty::Medium,
  },
  FactDef {
    id:         "sport-marathon",
    category:   Category::Sports,
    title:      "The marathon owes its odd distance to a royal balcony",
    body:       "The 42.195 km distance was fixed at the 1908 London Games, \
                 where the course was stretched so the race could finish in \
                 front of the royal viewing box.",
    source:     None,
    difficulty: Difficulty::Medium,
  },
  FactDef {
    id:         "ent-wilhelm",
    category:   Category::Entertainment,
    title:      "One scream echoes through 400+ films",
    body:       "The Wilhelm scream, first recorded in 1951, has been reused \
                 as a stock sound effect in over four hundred films, from \
                 Star Wars to Toy Story.",
    source:     None,
    difficulty: Difficulty::Easy,
  },
  FactDef {
    id:         "ent-lion-king",
    category:   Category::Entertainment,
    title:      "The Lion King was almost King of the Jungle",
    body:       "Disney's working title was 'King of the Jungle' — until \
                 someone pointed out that lions do not live in jungles.",
    source:     None,
    difficulty: Difficulty::Easy,
  },
  FactDef {
    id:         "art-van-gogh",
    category:   Category::ArtsCulture,
    title:      "Van Gogh sold a single painting in his lifetime",
    body:       "Of the roughly 900 paintings Vincent van Gogh produced, only \
                 one — The Red Vineyard — is known to have sold while he \
                 lived.",
    source:     Some("Van Gogh Museum"),
    difficulty: Difficulty::Medium,
  },
  FactDef {
    id:         "art-mona-lisa",
    category:   Category::ArtsCulture,
    title:      "The Mona Lisa has no visible eyebrows",
    body:       "Look closely: the world's most famous portrait shows no \
                 eyebrows. Scans suggest they may have faded or been cleaned \
                 away over the centuries.",
    source:     None,
    difficulty: Difficulty::Easy,
  },
  FactDef {
    id:         "spell-rhythms",
    category:   Category::Spelling,
    title:      "'Rhythms' gets by without a single vowel letter",
    body:       "At seven letters, 'rhythms' is the longest common English \
                 word written without a, e, i, o or u.",
    source:     None,
    difficulty: Difficulty::Medium,
  },
  FactDef {
    id:         "spell-dreamt",
    category:   Category::Spelling,
    title:      "Very few English words end in -mt",
    body:       "'Dreamt', 'undreamt' and their kin form one of the smallest \
                 ending families in English — almost everything else takes \
                 '-med' or '-eamed'.",
    source:     None,
    difficulty: Difficulty::Hard,
  },
  FactDef {
    id:         "bio-octopus",
    category:   Category::Biology,
    title:      "Octopuses run on three hearts and blue blood",
    body:       "Two hearts pump blood through the gills and a third serves \
                 the body. Copper-based haemocyanin makes the blood blue.",
    source:     None,
    difficulty: Difficulty::Easy,
  },
  FactDef {
    id:         "bio-banana-berry",
    category:   Category::Biology,
    title:      "Bananas are berries; strawberries are not",
    body:       "Botanically a berry develops from a single ovary — bananas \
                 qualify, while strawberries are accessory fruits that carry \
                 their seeds on the outside.",
    source:     None,
    difficulty: Difficulty::Medium,
  },
  FactDef {
    id:         "geo-canada-lakes",
    category:   Category::Geography,
    title:      "Canada has more lakes than the rest of the world combined",
    body:       "Over sixty percent of the world's lakes lie inside Canada — \
                 close to two million of them.",
    source:     None,
    difficulty: Difficulty::Medium,
  },
  FactDef {
    id:         "geo-africa-lines",
    category:   Category::Geography,
    title:      "Only one continent sits on both reference lines",
    body:       "Africa is the only continent crossed by both the equator and \
                 the prime meridian, placing it in all four hemispheres.",
    source:     None,
    difficulty: Difficulty::Medium,
  },
];

// ─── Questions ───────────────────────────────────────────────────────────────

pub const QUESTIONS: &[QuestionDef] = &[
  QuestionDef {
    id:            "q-hist-hundred-years",
    fact_id:       "hist-hundred-years",
    category:      Category::History,
    format:        QuizFormat::MultipleChoice,
    question:      "How long did the Hundred Years' War actually last?",
    options:       &["100 years", "116 years", "99 years", "146 years"],
    correct_index: 1,
    explanation:   "It ran from 1337 to 1453 — the round name stuck anyway.",
    difficulty:    Difficulty::Easy,
  },
  QuestionDef {
    id:            "q-hist-cleopatra",
    fact_id:       "hist-cleopatra",
    category:      Category::History,
    format:        QuizFormat::TrueFalse,
    question:      "Cleopatra lived closer in time to the Moon landing than \
                    to the building of the Great Pyramid.",
    options:       &["True", "False"],
    correct_index: 0,
    explanation:   "The pyramid predates her by about 2,500 years; Apollo 11 \
                    followed her by about 2,000.",
    difficulty:    Difficulty::Medium,
  },
  QuestionDef {
    id:            "q-sci-mpemba",
    fact_id:       "sci-mpemba",
    category:      Category::Science,
    format:        QuizFormat::MultipleChoice,
    question:      "Hot water freezing faster than cold is called…",
    options:       &[
      "the Mpemba effect",
      "the Leidenfrost effect",
      "the Coriolis effect",
      "the Doppler effect",
    ],
    correct_index: 0,
    explanation:   "Erasto Mpemba noticed it while making ice cream at school \
                    in 1963.",
    difficulty:    Difficulty::Medium,
  },
  QuestionDef {
    id:            "q-sci-neutron-star",
    fact_id:       "sci-neutron-star",
    category:      Category::Science,
    format:        QuizFormat::ClosestEstimate,
    question:      "Roughly how much would a teaspoon of neutron star matter \
                    weigh on Earth?",
    options:       &[
      "4 thousand tonnes",
      "4 million tonnes",
      "4 billion tonnes",
      "4 trillion tonnes",
    ],
    correct_index: 2,
    explanation:   "Around four billion tonnes — the mass of a mountain in a \
                    spoon.",
    difficulty:    Difficulty::Hard,
  },
  QuestionDef {
    id:            "q-sport-gold-medal",
    fact_id:       "sport-gold-medal",
    category:      Category::Sports,
    format:        QuizFormat::MultipleChoice,
    question:      "How much pure gold must a modern Olympic gold medal \
                    contain?",
    options:       &[
      "At least 6 grams",
      "At least 50 grams",
      "It is solid gold",
      "None at all",
    ],
    correct_index: 0,
    explanation:   "The body of the medal is silver; only the plating is \
                    gold.",
    difficulty:    Difficulty::Medium,
  },
  QuestionDef {
    id:            "q-sport-marathon",
    fact_id:       "sport-marathon",
    category:      Category::Sports,
    format:        QuizFormat::MultipleChoice,
    question:      "Why is the marathon exactly 42.195 km long?",
    options:       &[
      "It matches Pheidippides' original route",
      "The 1908 London course was stretched to the royal box",
      "It converts evenly from Greek miles",
      "Early officials simply rounded up",
    ],
    correct_index: 1,
    explanation:   "The 1908 finish line was moved for the royal family's \
                    view, and the distance later became the standard.",
    difficulty:    Difficulty::Medium,
  },
  QuestionDef {
    id:            "q-ent-wilhelm",
    fact_id:       "ent-wilhelm",
    category:      Category::Entertainment,
    format:        QuizFormat::MultipleChoice,
    question:      "Which stock scream has appeared in over 400 films?",
    options:       &[
      "The Wilhelm scream",
      "The Goofy holler",
      "The Howie scream",
      "Castle thunder",
    ],
    correct_index: 0,
    explanation:   "First recorded for a 1951 western, it became an inside \
                    joke among sound designers.",
    difficulty:    Difficulty::Easy,
  },
  QuestionDef {
    id:            "q-ent-lion-king",
    fact_id:       "ent-lion-king",
    category:      Category::Entertainment,
    format:        QuizFormat::TrueFalse,
    question:      "The Lion King's working title was 'King of the Jungle'.",
    options:       &["True", "False"],
    correct_index: 0,
    explanation:   "It was renamed once someone noted that lions live on the \
                    savannah, not in jungles.",
    difficulty:    Difficulty::Easy,
  },
  QuestionDef {
    id:            "q-art-van-gogh",
    fact_id:       "art-van-gogh",
    category:      Category::ArtsCulture,
    format:        QuizFormat::MultipleChoice,
    question:      "Which painting did Van Gogh sell during his lifetime?",
    options:       &[
      "The Starry Night",
      "Sunflowers",
      "The Red Vineyard",
      "Irises",
    ],
    correct_index: 2,
    explanation:   "The Red Vineyard sold in Brussels in 1890, months before \
                    his death.",
    difficulty:    Difficulty::Medium,
  },
  QuestionDef {
    id:            "q-art-mona-lisa",
    fact_id:       "art-mona-lisa",
    category:      Category::ArtsCulture,
    format:        QuizFormat::TrueFalse,
    question:      "The Mona Lisa has no visible eyebrows.",
    options:       &["True", "False"],
    correct_index: 0,
    explanation:   "Whether painted and lost or never finished, none are \
                    visible today.",
    difficulty:    Difficulty::Easy,
  },
  QuestionDef {
    id:            "q-spell-accommodate",
    fact_id:       "spell-rhythms",
    category:      Category::Spelling,
    format:        QuizFormat::MultipleChoice,
    question:      "Which is the correct spelling?",
    options:       &["accomodate", "acommodate", "accommodate", "acomodate"],
    correct_index: 2,
    explanation:   "Two c's and two m's — it has room for both.",
    difficulty:    Difficulty::Medium,
  },
  QuestionDef {
    id:            "q-spell-dreamt",
    fact_id:       "spell-dreamt",
    category:      Category::Spelling,
    format:        QuizFormat::ExceptionFinding,
    question:      "Which of these is NOT a real English word?",
    options:       &["dreamt", "undreamt", "daydreamt", "redreamt"],
    correct_index: 3,
    explanation:   "'Redreamt' is not in the dictionaries; the -mt family is \
                    tiny.",
    difficulty:    Difficulty::Hard,
  },
  QuestionDef {
    id:            "q-bio-octopus",
    fact_id:       "bio-octopus",
    category:      Category::Biology,
    format:        QuizFormat::MultipleChoice,
    question:      "How many hearts does an octopus have?",
    options:       &["One", "Two", "Three", "Four"],
    correct_index: 2,
    explanation:   "Two serve the gills and one serves the rest of the body.",
    difficulty:    Difficulty::Easy,
  },
  QuestionDef {
    id:            "q-bio-banana-berry",
    fact_id:       "bio-banana-berry",
    category:      Category::Biology,
    format:        QuizFormat::CategoryClassification,
    question:      "Which of these fruits is a true berry, botanically \
                    speaking?",
    options:       &["Strawberry", "Banana", "Raspberry", "Blackberry"],
    correct_index: 1,
    explanation:   "A berry grows from a single ovary — bananas do, the \
                    others only look the part.",
    difficulty:    Difficulty::Medium,
  },
  QuestionDef {
    id:            "q-geo-canada-lakes",
    fact_id:       "geo-canada-lakes",
    category:      Category::Geography,
    format:        QuizFormat::MultipleChoice,
    question:      "Which country contains more lakes than the rest of the \
                    world combined?",
    options:       &["Russia", "Canada", "Finland", "Brazil"],
    correct_index: 1,
    explanation:   "Canada holds around sixty percent of the world's lakes.",
    difficulty:    Difficulty::Medium,
  },
  QuestionDef {
    id:            "q-geo-africa-lines",
    fact_id:       "geo-africa-lines",
    category:      Category::Geography,
    format:        QuizFormat::MultipleChoice,
    question:      "Which continent is crossed by both the equator and the \
                    prime meridian?",
    options:       &["South America", "Asia", "Africa", "Europe"],
    correct_index: 2,
    explanation:   "That puts parts of Africa in all four hemispheres.",
    difficulty:    Difficulty::Medium,
  },
];
