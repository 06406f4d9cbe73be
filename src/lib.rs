//! # thai_vocab_drill
//!
//! Offline Thai vocabulary drills: flashcards and multiple-choice quizzes over
//! a fixed word list, with per-profile mastery, XP and daily streaks.
//!
//! ## How it works
//!
//! 1. Filter the [`vocabulary`](learning_engine::catalog::vocabulary) with
//!    [`ProgressionSettings`] and build a [`WordProgression`]. Pass a seed to
//!    the session RNG for a reproducible shuffle.
//! 2. Drive it from a [`FlashcardSession`] or [`QuizSession`]. Each action
//!    returns [`SessionEvent`]s ("word mastered", "correct answer", "speak")
//!    for the caller to route to the [`Ledger`] and the speech service.
//! 3. Persist snapshots through a [`ProgressStore`](learning_engine::store::ProgressStore).
//!
//! The engine shows every available, unmastered word once before any word
//! repeats, skips mastered words while unmastered ones remain, and never
//! stalls: with everything mastered it simply replays the list.
//!
//! ## Quick start
//!
//! ```rust
//! use thai_vocab_drill::learning_engine::{catalog::vocabulary, shuffle::session_rng};
//! use thai_vocab_drill::{MasteredWords, ProgressionSettings, WordProgression};
//!
//! let settings = ProgressionSettings { shuffle_words: false, ..Default::default() };
//! let mut rng = session_rng(Some(42));
//! let mut engine = WordProgression::initialize(vocabulary(), &settings, None, &mut rng);
//!
//! let mastered = MasteredWords::new();
//! let first = engine.current_word().map(|w| w.english.clone());
//! let second = engine.advance(&mastered).map(|w| w.english.clone());
//! assert_ne!(first, second);
//! println!("{:?}", engine.stats(&mastered));
//! ```

pub mod config;
pub mod error;
pub mod learning_engine;
pub mod logging;

pub use config::AppConfig;
pub use error::{ConfigError, ProgressionError, StoreError};
pub use learning_engine::{
    Difficulty, DifficultyFilter, FlashcardSession, Ledger, MasteredWords, Profile, Profiles,
    ProgressStats, ProgressionSettings, ProgressionSnapshot, QuizQuestion, QuizSession,
    SessionEvent, SettingsPatch, View, VocabularyWord, WordProgression,
};
