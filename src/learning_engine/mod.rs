//! Core learning engine: word progression, quizzes, sessions and bookkeeping.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Shared types: words, settings, stats, snapshots, profiles |
//! | `catalog`     | The built-in, immutable Thai vocabulary list |
//! | `shuffle`     | Fisher-Yates shuffle and seeded session RNG |
//! | `settings`    | Settings merge and catalog filtering |
//! | `progression` | `WordProgression`, the next-word engine |
//! | `quiz`        | Multiple-choice question builder |
//! | `session`     | Flashcard and quiz sessions, keyboard bindings |
//! | `ledger`      | XP, streak, daily history, mastered words |
//! | `profiles`    | Two alternating profiles with per-profile ledgers |
//! | `store`       | Key/value persistence of JSON snapshots |
//! | `speech`      | Pronunciation service with explicit lifecycle |

pub mod catalog;
pub mod ledger;
pub mod models;
pub mod profiles;
pub mod progression;
pub mod quiz;
pub mod session;
pub mod settings;
pub mod shuffle;
pub mod speech;
pub mod store;

// Re-export the public API surface so callers can use
// `learning_engine::WordProgression` without reaching into sub-modules.
pub use ledger::Ledger;
pub use models::{
    Difficulty, DifficultyFilter, HistoryEntry, MasteredWords, Profile, ProgressStats,
    ProgressionSettings, ProgressionSnapshot, QuizQuestion, SettingsPatch, VocabularyWord,
};
pub use profiles::Profiles;
pub use progression::WordProgression;
pub use session::{FlashcardSession, QuizSession, SessionEvent, View};
pub use settings::update_settings;
