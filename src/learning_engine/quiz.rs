//! Multiple-choice question builder.
//!
//! Distractors come from the same pool the learner is working through. Words
//! that share the correct word's English gloss are never used, and distractors
//! that share a gloss with each other are collapsed, so no option text appears
//! twice.

use std::collections::HashSet;
use rand::Rng;
use tracing::trace;

use crate::learning_engine::{
    models::{QuizQuestion, VocabularyWord},
    shuffle::{shuffle_in_place, shuffled},
};

/// Options per question when the caller has no preference.
pub const DEFAULT_OPTION_COUNT: usize = 4;

/// Most options a question can show; digit keys `1`..=`4` pick them.
pub const MAX_OPTION_COUNT: usize = 4;

/// True if `pool` has at least `option_count` distinct English glosses.
///
/// Views check this first and show a "not enough words" message instead of
/// a short question.
pub fn has_enough_words(pool: &[VocabularyWord], option_count: usize) -> bool {
    let glosses: HashSet<&str> = pool.iter().map(|w| w.english.as_str()).collect();
    glosses.len() >= option_count
}

/// Build a question for `correct` with up to `option_count` options.
///
/// With too few usable distractors the question simply has fewer options.
pub fn generate<R: Rng + ?Sized>(
    correct: &VocabularyWord,
    pool: &[VocabularyWord],
    option_count: usize,
    rng: &mut R,
) -> QuizQuestion {
    let candidates: Vec<&VocabularyWord> = pool
        .iter()
        .filter(|w| w.id != correct.id && w.english != correct.english)
        .collect();

    let mut used: HashSet<&str> = HashSet::new();
    let mut options: Vec<String> = shuffled(&candidates, rng)
        .into_iter()
        .filter(|&w| used.insert(w.english.as_str()))
        .take(option_count.saturating_sub(1))
        .map(|w| w.english.clone())
        .collect();

    options.push(correct.english.clone());
    shuffle_in_place(&mut options, rng);
    trace!(word = %correct.id, options = options.len(), "quiz question built");

    QuizQuestion {
        word_id: correct.id.clone(),
        thai: correct.thai.clone(),
        transliteration: correct.transliteration.clone(),
        correct: correct.english.clone(),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning_engine::catalog::{vocabulary, word};
    use crate::learning_engine::models::Difficulty;
    use crate::learning_engine::shuffle::session_rng;

    fn w(id: &str, english: &str) -> VocabularyWord {
        word(id, id, id, english, Difficulty::Beginner, "c")
    }

    #[test]
    fn four_unique_options_with_one_correct() {
        let pool = vocabulary();
        for seed in 0..50u64 {
            let mut rng = session_rng(Some(seed));
            let q = generate(&pool[0], pool, DEFAULT_OPTION_COUNT, &mut rng);
            assert_eq!(q.options.len(), 4);
            assert_eq!(q.options.iter().filter(|o| q.is_correct(o)).count(), 1);
            let unique: HashSet<&String> = q.options.iter().collect();
            assert_eq!(unique.len(), q.options.len(), "duplicate option text: {:?}", q.options);
        }
    }

    #[test]
    fn shared_gloss_is_never_a_distractor() {
        // Two Thai words for "I" in the built-in catalog.
        let pool = vocabulary();
        let chan = pool.iter().find(|w| w.thai == "ฉัน").cloned().unwrap_or_else(|| w("x", "I"));
        for seed in 0..50u64 {
            let q = generate(&chan, pool, 4, &mut session_rng(Some(seed)));
            assert_eq!(q.options.iter().filter(|o| o.as_str() == "I").count(), 1);
        }
    }

    #[test]
    fn duplicate_distractor_glosses_collapse() {
        let pool = vec![w("a", "Apple"), w("b", "Pear"), w("c", "Pear"), w("d", "Pear")];
        for seed in 0..20u64 {
            let q = generate(&pool[0], &pool, 4, &mut session_rng(Some(seed)));
            assert_eq!(q.options.len(), 2);
            assert!(q.options.contains(&"Pear".to_string()));
        }
    }

    #[test]
    fn small_pool_gives_fewer_options() {
        let pool = vec![w("a", "One"), w("b", "Two")];
        let q = generate(&pool[0], &pool, 4, &mut session_rng(Some(5)));
        assert_eq!(q.options.len(), 2);
        assert!(q.correct_position().is_some());
        assert!(!has_enough_words(&pool, 4));
    }

    #[test]
    fn lone_word_is_its_own_only_option() {
        let pool = vec![w("a", "One")];
        let q = generate(&pool[0], &pool, 4, &mut session_rng(Some(5)));
        assert_eq!(q.options, vec!["One".to_string()]);
    }

    #[test]
    fn enough_words_counts_distinct_glosses() {
        let pool = vec![w("a", "I"), w("b", "I"), w("c", "You"), w("d", "We")];
        assert!(!has_enough_words(&pool, 4));
        assert!(has_enough_words(&pool, 3));
        assert!(has_enough_words(vocabulary(), 4));
    }

    #[test]
    fn same_seed_same_question() {
        let pool = vocabulary();
        let a = generate(&pool[3], pool, 4, &mut session_rng(Some(9)));
        let b = generate(&pool[3], pool, 4, &mut session_rng(Some(9)));
        assert_eq!(a, b);
    }
}
