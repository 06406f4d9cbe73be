//! Walk through the library end to end.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **Progression**: a seeded, unshuffled engine over the beginner words,
//!    advanced through a full cycle so the wrap-around is visible.
//! 2. **Mastery**: the same walk with a few words mastered; they are skipped
//!    until the cycle ends.
//! 3. **Quiz**: one question per seed, with the correct option marked.
//! 4. **Ledger**: session events credited to an in-memory profile.
//!
//! ## Key concepts demonstrated
//!
//! - `session_rng(Some(seed))` makes word order and quiz options reproducible.
//! - The engine never owns the mastered set; it is passed to each call.
//! - Sessions return `SessionEvent`s; the caller routes them.

use thai_vocab_drill::learning_engine::{
    catalog::vocabulary,
    ledger::today,
    quiz::{generate, DEFAULT_OPTION_COUNT},
    shuffle::session_rng,
    store::MemoryStore,
};
use thai_vocab_drill::{
    DifficultyFilter, FlashcardSession, MasteredWords, Profile, Profiles, ProgressionSettings,
    QuizSession, SessionEvent, WordProgression,
};

fn beginner_settings() -> ProgressionSettings {
    ProgressionSettings {
        difficulty: DifficultyFilter::Beginner,
        shuffle_words: false,
        ..ProgressionSettings::default()
    }
}

/// Advance through one full cycle and print every word shown.
fn print_cycle(title: &str, mastered: &MasteredWords) {
    let mut engine = WordProgression::initialize(vocabulary(), &beginner_settings(), None, &mut session_rng(Some(1)));
    println!("══ {title} ══");
    println!();
    if let Some(w) = engine.current_word() {
        println!("  start  {:<12} {}", w.thai, w.english);
    }
    while !engine.completed_cycle() {
        let Some(w) = engine.advance(mastered).cloned() else { break };
        let marker = if engine.completed_cycle() { "wrap " } else { "     " };
        println!("  {marker}  {:<12} {}", w.thai, w.english);
    }
    let stats = engine.stats(mastered);
    println!();
    println!("  {} words, {} mastered ({}%)", stats.total, stats.mastered, stats.mastery_pct);
    println!();
}

fn main() {
    // ── Progression ──────────────────────────────────────────────────────────
    println!();
    print_cycle("Beginner words, in catalog order", &MasteredWords::new());

    // ── Mastery ──────────────────────────────────────────────────────────────
    // Mastered words are skipped while unmastered ones remain.
    let mastered: MasteredWords = ["2", "6", "7"].iter().map(|s| s.to_string()).collect();
    print_cycle("Same walk with Thank you / Yes / No mastered", &mastered);

    // ── Quiz ─────────────────────────────────────────────────────────────────
    println!("══ Quiz questions ══");
    println!();
    let pool = vocabulary();
    for (id, seed) in [("1", 101u64), ("12", 202), ("35", 303)] {
        let Some(word) = pool.iter().find(|w| w.id == id) else { continue };
        let q = generate(word, pool, DEFAULT_OPTION_COUNT, &mut session_rng(Some(seed)));
        println!("  {}  ({})", q.thai, q.transliteration);
        for (i, option) in q.options.iter().enumerate() {
            let marker = if q.is_correct(option) { "✓" } else { " " };
            println!("    [{}] {marker} {option}", i + 1);
        }
        println!();
    }

    // ── Ledger ───────────────────────────────────────────────────────────────
    // A flashcard "know it" and a correct quiz answer, credited to a profile.
    println!("══ Ledger ══");
    println!();
    let day = today();
    let store = MemoryStore::new();
    let mut profiles = match Profiles::load(&store, Profile::First, ["Dale".into(), "Noi".into()], 50, day) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("could not load profiles: {e}");
            return;
        }
    };
    let mut rng = session_rng(Some(7));
    let mut engine = WordProgression::initialize(pool, &beginner_settings(), None, &mut rng);

    let mut cards = FlashcardSession::new();
    let mut events = cards.know_it(&mut engine, profiles.ledger().mastered_words());
    let mut quiz = QuizSession::new(&engine, DEFAULT_OPTION_COUNT, &mut rng);
    if let Some(pos) = quiz.question().and_then(|q| q.correct_position()) {
        events.extend(quiz.select(pos));
    }

    for event in events {
        println!("  event: {event:?}");
        match event {
            SessionEvent::WordMastered(id) => profiles.ledger_mut().on_word_mastered(&id, day),
            SessionEvent::CorrectAnswer => profiles.ledger_mut().on_correct_answer(day),
            SessionEvent::Speak(_) => {}
        }
    }
    let ledger = profiles.ledger();
    println!();
    println!(
        "  {}: XP {}  streak {}  learned today {}  mastered {:?}",
        profiles.display_name(profiles.active()),
        ledger.xp,
        ledger.streak,
        ledger.words_learned_today,
        ledger.mastered_words(),
    );
    println!();
}
