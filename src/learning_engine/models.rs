use std::collections::BTreeSet;
use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Vocabulary primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner     => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced     => write!(f, "Advanced"),
        }
    }
}

/// One catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyWord {
    pub id: String,
    pub thai: String,
    pub transliteration: String,
    pub english: String,
    pub difficulty: Difficulty,
    pub category: String,
}

/// Word IDs the learner has flagged as known.
///
/// Owned by the ledger; the progression engine only ever reads it.
pub type MasteredWords = BTreeSet<String>;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Difficulty filter applied to the catalog. `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyFilter {
    Beginner,
    Intermediate,
    Advanced,
    #[default]
    All,
}

impl DifficultyFilter {
    pub fn matches(self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All          => true,
            DifficultyFilter::Beginner     => difficulty == Difficulty::Beginner,
            DifficultyFilter::Intermediate => difficulty == Difficulty::Intermediate,
            DifficultyFilter::Advanced     => difficulty == Difficulty::Advanced,
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyFilter::Beginner     => write!(f, "beginner"),
            DifficultyFilter::Intermediate => write!(f, "intermediate"),
            DifficultyFilter::Advanced     => write!(f, "advanced"),
            DifficultyFilter::All          => write!(f, "all"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressionSettings {
    pub difficulty: DifficultyFilter,
    /// Empty means every category.
    pub categories: BTreeSet<String>,
    pub shuffle_words: bool,
}

impl Default for ProgressionSettings {
    fn default() -> Self {
        Self {
            difficulty: DifficultyFilter::All,
            categories: BTreeSet::new(),
            shuffle_words: true,
        }
    }
}

impl ProgressionSettings {
    /// True if `word` survives the difficulty and category filters.
    pub fn admits(&self, word: &VocabularyWord) -> bool {
        self.difficulty.matches(word.difficulty)
            && (self.categories.is_empty() || self.categories.contains(&word.category))
    }
}

/// A partial settings update. Every recognised field is listed; anything else
/// in a JSON patch is rejected at deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<DifficultyFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle_words: Option<bool>,
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total: usize,
    pub seen: usize,
    pub mastered: usize,
    pub unseen: usize,
    pub progress_pct: u8,
    pub mastery_pct: u8,
    pub completed_cycle: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub word_id: String,
    pub thai: String,
    pub transliteration: String,
    /// English gloss of the word being asked about.
    pub correct: String,
    /// Display order. Size the answer grid from `options.len()`, not a constant.
    pub options: Vec<String>,
}

impl QuizQuestion {
    pub fn is_correct(&self, option: &str) -> bool {
        option == self.correct
    }

    /// Zero-based display position of the correct option.
    pub fn correct_position(&self) -> Option<usize> {
        self.options.iter().position(|o| o == &self.correct)
    }
}

// ---------------------------------------------------------------------------
// Persisted snapshots
// ---------------------------------------------------------------------------

/// On-disk form of the progression state. The current word itself is never
/// stored; it is re-derived from `current_index` against the fresh list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionSnapshot {
    pub available_words_length: usize,
    pub current_index: usize,
    #[serde(default)]
    pub seen_words: Vec<String>,
    #[serde(default)]
    pub mastered_words: Vec<String>,
    #[serde(default)]
    pub completed_cycle: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: String,
    pub xp: u32,
    pub words_learned: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    First,
    Second,
}

impl Profile {
    /// Suffix used in the persisted record key.
    pub fn storage_suffix(self) -> &'static str {
        match self {
            Profile::First  => "user1",
            Profile::Second => "user2",
        }
    }

    pub fn other(self) -> Profile {
        match self {
            Profile::First  => Profile::Second,
            Profile::Second => Profile::First,
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::First  => write!(f, "first"),
            Profile::Second => write!(f, "second"),
        }
    }
}
