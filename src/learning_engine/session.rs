//! Flashcard and quiz sessions plus their keyboard bindings.
//!
//! Sessions never own the progression engine; they borrow it for each
//! action, so both views always agree on the current word. Side effects meant
//! for the ledger or the speech service are returned as [`SessionEvent`]s and
//! routed by the caller.

use std::fmt;
use rand::Rng;
use tracing::debug;

use crate::learning_engine::{
    models::{MasteredWords, QuizQuestion},
    progression::WordProgression,
    quiz::{generate, has_enough_words, MAX_OPTION_COUNT},
};

// ---------------------------------------------------------------------------
// Events and keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    WordMastered(String),
    CorrectAnswer,
    /// Thai text to pronounce.
    Speak(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Flashcards,
    Quiz,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Flashcards => write!(f, "Flashcards"),
            View::Quiz       => write!(f, "Quiz"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    ArrowRight,
}

impl Key {
    /// Parse a typed key name (`space`, `enter`, `right`, or a single character).
    pub fn from_token(token: &str) -> Option<Key> {
        match token.trim().to_ascii_lowercase().as_str() {
            "space"                        => Some(Key::Space),
            "enter" | "return" | ""        => Some(Key::Enter),
            "right" | "arrowright" | "->" => Some(Key::ArrowRight),
            t => {
                let mut chars = t.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// Typed into a text field; every binding ignores these.
    pub from_text_input: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        KeyEvent { key, from_text_input: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashcardAction {
    Reveal,
    KnowIt,
    Skip,
    Speak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    /// Zero-based option position.
    Select(usize),
    Next,
}

/// `1` and `2` switch between the two views.
pub fn global_action(event: KeyEvent) -> Option<View> {
    if event.from_text_input {
        return None;
    }
    match event.key {
        Key::Char('1') => Some(View::Flashcards),
        Key::Char('2') => Some(View::Quiz),
        _ => None,
    }
}

pub fn flashcard_action(event: KeyEvent, revealed: bool) -> Option<FlashcardAction> {
    if event.from_text_input {
        return None;
    }
    match event.key {
        Key::Space | Key::Enter if revealed => Some(FlashcardAction::KnowIt),
        Key::Space | Key::Enter             => Some(FlashcardAction::Reveal),
        Key::ArrowRight | Key::Char('n')    => Some(FlashcardAction::Skip),
        Key::Char('s')                      => Some(FlashcardAction::Speak),
        _ => None,
    }
}

/// Digits pick an option while the question is open; `Enter`/`Space`/`→`
/// move on once the result is showing.
pub fn quiz_action(event: KeyEvent, showing_result: bool, option_count: usize) -> Option<QuizAction> {
    if event.from_text_input {
        return None;
    }
    if showing_result {
        return match event.key {
            Key::Enter | Key::Space | Key::ArrowRight => Some(QuizAction::Next),
            _ => None,
        };
    }
    match event.key {
        Key::Char(c) => {
            let n = c.to_digit(10)? as usize;
            (1..=MAX_OPTION_COUNT).contains(&n).then(|| n - 1).filter(|&i| i < option_count).map(QuizAction::Select)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Flashcards
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct FlashcardSession {
    revealed: bool,
}

impl FlashcardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Show the translation and record the exposure.
    pub fn reveal(&mut self, engine: &mut WordProgression) {
        if engine.current_word().is_some() {
            self.revealed = true;
            engine.mark_current_seen();
        }
    }

    /// Mark the current word known (once) and move on.
    pub fn know_it(&mut self, engine: &mut WordProgression, mastered: &MasteredWords) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if let Some(word) = engine.current_word() {
            if !mastered.contains(&word.id) {
                events.push(SessionEvent::WordMastered(word.id.clone()));
            }
        }
        self.skip(engine, mastered);
        events
    }

    /// Move on without marking anything.
    pub fn skip(&mut self, engine: &mut WordProgression, mastered: &MasteredWords) {
        engine.advance(mastered);
        self.revealed = false;
    }

    pub fn speak(&self, engine: &WordProgression) -> Option<SessionEvent> {
        engine.current_word().map(|w| SessionEvent::Speak(w.thai.clone()))
    }

    pub fn handle(
        &mut self, action: FlashcardAction, engine: &mut WordProgression, mastered: &MasteredWords,
    ) -> Vec<SessionEvent> {
        match action {
            FlashcardAction::Reveal => {
                self.reveal(engine);
                Vec::new()
            }
            FlashcardAction::KnowIt => self.know_it(engine, mastered),
            FlashcardAction::Skip => {
                self.skip(engine, mastered);
                Vec::new()
            }
            FlashcardAction::Speak => self.speak(engine).into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizState {
    /// Fewer distinct glosses than options; show a "not enough words" message.
    Unavailable,
    Asking(QuizQuestion),
    Answered { question: QuizQuestion, selected: usize },
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    state: QuizState,
    option_count: usize,
    score: u32,
    answered: u32,
}

impl QuizSession {
    pub fn new<R: Rng + ?Sized>(engine: &WordProgression, option_count: usize, rng: &mut R) -> Self {
        let mut session = QuizSession {
            state: QuizState::Unavailable,
            option_count,
            score: 0,
            answered: 0,
        };
        session.refresh(engine, rng);
        session
    }

    /// Rebuild the question from the engine's current word.
    pub fn refresh<R: Rng + ?Sized>(&mut self, engine: &WordProgression, rng: &mut R) {
        let pool = engine.available_words();
        self.state = match engine.current_word() {
            Some(word) if has_enough_words(pool, self.option_count) => {
                QuizState::Asking(generate(word, pool, self.option_count, rng))
            }
            _ => {
                debug!(pool = pool.len(), "quiz unavailable");
                QuizState::Unavailable
            }
        };
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn question(&self) -> Option<&QuizQuestion> {
        match &self.state {
            QuizState::Asking(q) | QuizState::Answered { question: q, .. } => Some(q),
            QuizState::Unavailable => None,
        }
    }

    pub fn showing_result(&self) -> bool {
        matches!(self.state, QuizState::Answered { .. })
    }

    pub fn option_count(&self) -> usize {
        self.question().map_or(0, |q| q.options.len())
    }

    /// Answer with the option at `position`. Ignored once answered or if the
    /// position does not exist.
    pub fn select(&mut self, position: usize) -> Option<SessionEvent> {
        let QuizState::Asking(question) = &self.state else {
            return None;
        };
        let option = question.options.get(position)?;
        let correct = question.is_correct(option);
        self.answered += 1;
        if correct {
            self.score += 1;
        }
        self.state = QuizState::Answered { question: question.clone(), selected: position };
        correct.then_some(SessionEvent::CorrectAnswer)
    }

    /// Advance the engine and ask about the next word.
    pub fn next<R: Rng + ?Sized>(&mut self, engine: &mut WordProgression, mastered: &MasteredWords, rng: &mut R) {
        engine.advance(mastered);
        self.refresh(engine, rng);
    }

    pub fn handle<R: Rng + ?Sized>(
        &mut self, action: QuizAction, engine: &mut WordProgression, mastered: &MasteredWords, rng: &mut R,
    ) -> Vec<SessionEvent> {
        match action {
            QuizAction::Select(i) => self.select(i).into_iter().collect(),
            QuizAction::Next => {
                if self.showing_result() {
                    self.next(engine, mastered, rng);
                }
                Vec::new()
            }
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn answered(&self) -> u32 {
        self.answered
    }

    /// Rounded percentage of correct answers, 0 before the first answer.
    pub fn accuracy(&self) -> u8 {
        if self.answered == 0 {
            return 0;
        }
        (self.score as f64 / self.answered as f64 * 100.0).round() as u8
    }
}
