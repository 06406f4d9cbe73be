//! `thai-drill`: Thai vocabulary flashcards and quizzes in the terminal.
//!
//! Reads one key token per line from stdin, applies it to the active view,
//! routes the resulting events to the ledger and the speech service, and
//! saves everything after each action.

mod cli;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use tracing::{info, warn};

use thai_vocab_drill::config::AppConfig;
use thai_vocab_drill::learning_engine::{
    catalog::{categories, vocabulary},
    ledger::today,
    session::{flashcard_action, global_action, quiz_action, Key, KeyEvent, QuizState},
    settings::{parse_patch, update_settings},
    shuffle::session_rng,
    speech::{LogBackend, SpeechService},
    store::{self, FileStore},
};
use thai_vocab_drill::logging::{init_logging, LogConfig};
use thai_vocab_drill::{
    FlashcardSession, Profiles, ProgressionSettings, QuizSession, SessionEvent, StoreError, View,
    WordProgression,
};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose)).context("failed to initialize logging")?;
    let config = cli
        .resolve_config()
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let mut drill = Drill::start(&cli, &config)?;
    drill.run()
}

struct Drill {
    store: FileStore,
    settings: ProgressionSettings,
    engine: WordProgression,
    profiles: Profiles,
    view: View,
    flashcards: FlashcardSession,
    quiz: QuizSession,
    speech: SpeechService<LogBackend>,
    rng: StdRng,
}

impl Drill {
    fn start(cli: &Cli, config: &AppConfig) -> Result<Self> {
        let store = FileStore::open(config.data_dir.clone())?;
        let settings = store::load_settings(&store)?;
        let saved = store::load_progression(&store)?;

        let mut rng = session_rng(cli.seed);
        let engine = WordProgression::initialize(vocabulary(), &settings, saved.as_ref(), &mut rng);
        let profiles = Profiles::load(
            &store,
            cli.profile.into(),
            config.profile_names.clone(),
            config.daily_goal,
            today(),
        )?;
        let quiz = QuizSession::new(&engine, config.quiz_options, &mut rng);

        let mut speech = SpeechService::new(LogBackend, config.speech_rate);
        speech.open();

        info!(
            words = engine.available_words().len(),
            profile = %profiles.display_name(profiles.active()),
            data_dir = %config.data_dir.display(),
            "session started"
        );
        Ok(Drill {
            store,
            settings,
            engine,
            profiles,
            view: cli.view.into(),
            flashcards: FlashcardSession::new(),
            quiz,
            speech,
            rng,
        })
    }

    fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut line = String::new();

        self.render();
        loop {
            print!("> ");
            io::stdout().flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let token = line.trim().to_string();
            match token.as_str() {
                "q" | "quit" => break,
                "reset" => self.reset(&mut input),
                _ => self.dispatch(&token),
            }
            if let Err(e) = self.save() {
                warn!(error = %e, "failed to save progress");
            }
            self.render();
        }

        self.speech.close();
        info!("session ended");
        Ok(())
    }

    fn dispatch(&mut self, token: &str) {
        if token == "p" {
            let profile = self.profiles.switch();
            println!("Active profile: {}", self.profiles.display_name(profile));
            return;
        }
        if let Some(json) = token.strip_prefix("set ") {
            self.apply_settings(json);
            return;
        }
        let Some(key) = Key::from_token(token) else {
            println!("Unknown input {token:?}");
            return;
        };
        let event = KeyEvent::new(key);

        // View bindings win: quiz digits 1 and 2 answer before they switch views.
        let mastered = self.profiles.ledger().mastered_words();
        let handled = match self.view {
            View::Flashcards => flashcard_action(event, self.flashcards.is_revealed())
                .map(|action| self.flashcards.handle(action, &mut self.engine, mastered)),
            View::Quiz => quiz_action(event, self.quiz.showing_result(), self.quiz.option_count())
                .map(|action| self.quiz.handle(action, &mut self.engine, mastered, &mut self.rng)),
        };
        match handled {
            Some(events) => self.route(events),
            None => {
                if let Some(view) = global_action(event) {
                    self.switch_view(view);
                }
            }
        }
    }

    fn route(&mut self, events: Vec<SessionEvent>) {
        let today = today();
        for event in events {
            match event {
                SessionEvent::WordMastered(id) => {
                    let ledger = self.profiles.ledger_mut();
                    ledger.roll_over(today);
                    ledger.on_word_mastered(&id, today);
                }
                SessionEvent::CorrectAnswer => {
                    let ledger = self.profiles.ledger_mut();
                    ledger.roll_over(today);
                    ledger.on_correct_answer(today);
                }
                SessionEvent::Speak(text) => self.speech.speak(&text),
            }
        }
    }

    fn switch_view(&mut self, view: View) {
        if view == self.view {
            return;
        }
        self.view = view;
        // The other view may have moved the engine.
        match view {
            View::Flashcards => self.flashcards = FlashcardSession::new(),
            View::Quiz => self.quiz.refresh(&self.engine, &mut self.rng),
        }
    }

    fn apply_settings(&mut self, json: &str) {
        let patch = match parse_patch(json) {
            Ok(patch) => patch,
            Err(e) => {
                println!("Invalid settings: {e}");
                return;
            }
        };
        if let Some(requested) = &patch.categories {
            let known = categories(vocabulary());
            let unknown: Vec<&str> = requested
                .iter()
                .map(String::as_str)
                .filter(|tag| !known.contains(tag))
                .collect();
            if !unknown.is_empty() {
                println!("Unknown categories {unknown:?}; known: {}", known.join(", "));
            }
        }
        self.settings = update_settings(&self.settings, patch);
        self.engine = WordProgression::rebuild(vocabulary(), &self.settings, &self.engine, &mut self.rng);
        self.flashcards = FlashcardSession::new();
        self.quiz.refresh(&self.engine, &mut self.rng);
    }

    fn reset(&mut self, input: &mut impl BufRead) {
        match self.profiles.reset_active(&mut self.store, today(), |name| confirm(input, name)) {
            Ok(true) => {
                self.engine.reset();
                if let Err(e) = store::clear_progression(&mut self.store) {
                    warn!(error = %e, "failed to clear saved progression");
                }
                self.flashcards = FlashcardSession::new();
                self.quiz.refresh(&self.engine, &mut self.rng);
                println!("Progress reset.");
            }
            Ok(false) => println!("Reset cancelled."),
            Err(e) => warn!(error = %e, "reset failed"),
        }
    }

    fn save(&mut self) -> Result<(), StoreError> {
        let snapshot = self.engine.snapshot(self.profiles.ledger().mastered_words());
        store::save_progression(&mut self.store, &snapshot)?;
        store::save_settings(&mut self.store, &self.settings)?;
        self.profiles.save(&mut self.store)
    }

    fn render(&self) {
        let ledger = self.profiles.ledger();
        let stats = self.engine.stats(ledger.mastered_words());
        println!();
        println!(
            "── {} · {} · XP {} (goal {}) · streak {} · learned today {} ──",
            self.view,
            self.profiles.display_name(self.profiles.active()),
            ledger.xp,
            ledger.daily_goal,
            ledger.streak,
            ledger.words_learned_today,
        );
        println!(
            "   seen {}/{} ({}%)  mastered {} ({}%){}",
            stats.seen,
            stats.total,
            stats.progress_pct,
            stats.mastered,
            stats.mastery_pct,
            if stats.completed_cycle { "  cycle complete" } else { "" },
        );
        println!();
        match self.view {
            View::Flashcards => self.render_flashcard(),
            View::Quiz => self.render_quiz(),
        }
    }

    fn render_flashcard(&self) {
        let Some(word) = self.engine.current_word() else {
            println!("  No words match the current settings.");
            return;
        };
        println!("  {}    [{}, {}]", word.thai, word.difficulty, word.category);
        if self.flashcards.is_revealed() {
            println!("  {}  =  {}", word.transliteration, word.english);
            println!();
            println!("  [space] know it  [n] skip  [s] speak  [2] quiz  [p] profile  [q] quit");
        } else {
            println!();
            println!("  [space] reveal  [n] skip  [s] speak  [2] quiz  [p] profile  [q] quit");
        }
    }

    fn render_quiz(&self) {
        match self.quiz.state() {
            QuizState::Unavailable => {
                println!("  Not enough words for a quiz with these settings.");
            }
            QuizState::Asking(q) => {
                println!("  {}    ({})", q.thai, q.transliteration);
                println!();
                for (i, option) in q.options.iter().enumerate() {
                    println!("  [{}] {option}", i + 1);
                }
            }
            QuizState::Answered { question: q, selected } => {
                println!("  {}    ({})", q.thai, q.transliteration);
                println!();
                for (i, option) in q.options.iter().enumerate() {
                    let marker = match (q.is_correct(option), i == *selected) {
                        (true, _)     => "✓",
                        (false, true) => "✗",
                        _             => " ",
                    };
                    println!("  [{}] {marker} {option}", i + 1);
                }
                println!();
                println!(
                    "  Score {}/{} ({}%)  [enter] next",
                    self.quiz.score(),
                    self.quiz.answered(),
                    self.quiz.accuracy()
                );
            }
        }
    }
}

fn confirm(input: &mut impl BufRead, name: &str) -> bool {
    print!("Reset all progress for {name}? [y/N] ");
    io::stdout().flush().ok();
    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
