//! Word progression engine.
//!
//! Owns the filtered word list, the current position, and the set of words
//! seen in the running cycle. Picks the next word so that every available,
//! unmastered word is shown once before anything repeats.
//!
//! ## Next-word policy
//!
//! 1. The word being left counts as seen.
//! 2. The first word (in list order) that is neither seen nor mastered wins.
//! 3. If there is none, the cycle is complete: the seen set restarts with the
//!    first unmastered word, or with the first word when everything is mastered.
//!
//! Ties always go to the earliest list position, so progression is
//! reproducible; variety comes from the optional shuffle at build time.

use std::collections::BTreeSet;
use rand::Rng;
use tracing::{debug, trace};

use crate::error::ProgressionError;
use crate::learning_engine::{
    models::{MasteredWords, ProgressStats, ProgressionSettings, ProgressionSnapshot, VocabularyWord},
    settings::filter_catalog,
    shuffle::shuffle_in_place,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordProgression {
    available: Vec<VocabularyWord>,
    current_index: usize,
    seen: BTreeSet<String>,
    completed_cycle: bool,
}

/// Filter the catalog and shuffle it when the settings ask for it.
fn build_word_list<R: Rng + ?Sized>(
    catalog: &[VocabularyWord], settings: &ProgressionSettings, rng: &mut R,
) -> Vec<VocabularyWord> {
    let mut words = filter_catalog(catalog, settings);
    if settings.shuffle_words {
        shuffle_in_place(&mut words, rng);
    }
    words
}

/// Rounded percentage, 0 when `total` is 0.
fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

impl WordProgression {
    fn fresh(available: Vec<VocabularyWord>) -> Self {
        WordProgression {
            available,
            current_index: 0,
            seen: BTreeSet::new(),
            completed_cycle: false,
        }
    }

    /// Build the starting state from the catalog and settings.
    ///
    /// A saved snapshot is restored only when its recorded word count equals
    /// the freshly filtered list's length; otherwise progression starts at the
    /// first word.
    pub fn initialize<R: Rng + ?Sized>(
        catalog: &[VocabularyWord],
        settings: &ProgressionSettings,
        saved: Option<&ProgressionSnapshot>,
        rng: &mut R,
    ) -> Self {
        let available = build_word_list(catalog, settings, rng);
        let len = available.len();

        let mut state = match saved {
            Some(snap) if snap.available_words_length == len && len > 0 => {
                let ids: BTreeSet<&str> = available.iter().map(|w| w.id.as_str()).collect();
                let seen = snap
                    .seen_words
                    .iter()
                    .filter(|id| ids.contains(id.as_str()))
                    .cloned()
                    .collect();
                debug!(words = len, index = snap.current_index, "restored progression snapshot");
                WordProgression {
                    available,
                    current_index: snap.current_index,
                    seen,
                    completed_cycle: snap.completed_cycle,
                }
            }
            Some(snap) => {
                debug!(
                    saved = snap.available_words_length,
                    current = len,
                    "word count changed, discarding progression snapshot"
                );
                Self::fresh(available)
            }
            None => Self::fresh(available),
        };

        state.clamp_index();
        state
    }

    /// Re-derive the state after a settings change.
    ///
    /// The word that was current stays current if it survives the new
    /// filter. Otherwise the first word of the new list takes over.
    pub fn rebuild<R: Rng + ?Sized>(
        catalog: &[VocabularyWord],
        settings: &ProgressionSettings,
        previous: &WordProgression,
        rng: &mut R,
    ) -> Self {
        let available = build_word_list(catalog, settings, rng);
        let same_size = available.len() == previous.available.len();
        let mut state = Self::fresh(available);

        if same_size {
            state.completed_cycle = previous.completed_cycle;
            let ids: BTreeSet<&str> = state.available.iter().map(|w| w.id.as_str()).collect();
            state.seen = previous
                .seen
                .iter()
                .filter(|id| ids.contains(id.as_str()))
                .cloned()
                .collect();
        }

        if let Some(current) = previous.current_word() {
            match state.position_of(&current.id) {
                Some(i) => state.current_index = i,
                None => debug!(word = %current.id, "current word filtered out, falling back to first word"),
            }
        }
        state
    }

    pub fn available_words(&self) -> &[VocabularyWord] {
        &self.available
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_word(&self) -> Option<&VocabularyWord> {
        self.available.get(self.current_index)
    }

    pub fn seen_words(&self) -> &BTreeSet<String> {
        &self.seen
    }

    pub fn completed_cycle(&self) -> bool {
        self.completed_cycle
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.available.iter().position(|w| w.id == id)
    }

    fn clamp_index(&mut self) {
        if self.current_index >= self.available.len() {
            self.current_index = self.available.len().saturating_sub(1);
        }
    }

    /// Move to the next word. Returns `None` only when the list is empty.
    pub fn advance(&mut self, mastered: &MasteredWords) -> Option<&VocabularyWord> {
        if self.available.is_empty() {
            return None;
        }
        let leaving = self.current_word().map(|w| w.id.clone());
        let counts_as_seen =
            |w: &VocabularyWord| self.seen.contains(&w.id) || leaving.as_deref() == Some(w.id.as_str());

        let unseen = self
            .available
            .iter()
            .position(|w| !counts_as_seen(w) && !mastered.contains(&w.id));

        match unseen {
            Some(next) => {
                if let Some(id) = leaving {
                    self.seen.insert(id);
                }
                self.current_index = next;
            }
            None => {
                let next = self
                    .available
                    .iter()
                    .position(|w| !mastered.contains(&w.id))
                    .unwrap_or(0);
                self.seen.clear();
                self.seen.insert(self.available[next].id.clone());
                self.completed_cycle = true;
                self.current_index = next;
                debug!(restart = %self.available[next].id, "word cycle completed");
            }
        }

        let current = self.current_word();
        trace!(word = current.map(|w| w.id.as_str()), "advanced");
        current
    }

    /// Record the current word as seen without moving.
    pub fn mark_current_seen(&mut self) {
        if let Some(id) = self.current_word().map(|w| w.id.clone()) {
            self.seen.insert(id);
        }
    }

    /// Jump straight to `word_id`. Fails if the word is not in the filtered list.
    pub fn go_to(&mut self, word_id: &str) -> Result<&VocabularyWord, ProgressionError> {
        let index = self
            .position_of(word_id)
            .ok_or_else(|| ProgressionError::WordNotFound { id: word_id.to_string() })?;
        self.current_index = index;
        Ok(&self.available[index])
    }

    /// Start over from the first word with nothing seen.
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.seen.clear();
        self.completed_cycle = false;
        debug!("progression reset");
    }

    pub fn stats(&self, mastered: &MasteredWords) -> ProgressStats {
        let total = self.available.len();
        let seen = self.seen.len();
        let mastered = self.available.iter().filter(|w| mastered.contains(&w.id)).count();
        ProgressStats {
            total,
            seen,
            mastered,
            unseen: total.saturating_sub(seen),
            progress_pct: percent(seen, total),
            mastery_pct: percent(mastered, total),
            completed_cycle: self.completed_cycle,
        }
    }

    pub fn snapshot(&self, mastered: &MasteredWords) -> ProgressionSnapshot {
        ProgressionSnapshot {
            available_words_length: self.available.len(),
            current_index: self.current_index,
            seen_words: self.seen.iter().cloned().collect(),
            mastered_words: mastered.iter().cloned().collect(),
            completed_cycle: self.completed_cycle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning_engine::catalog::word;
    use crate::learning_engine::models::{Difficulty, DifficultyFilter};
    use crate::learning_engine::shuffle::session_rng;

    fn five_words() -> Vec<VocabularyWord> {
        (1..=5)
            .map(|i| {
                let id = format!("w{i}");
                word(&id, &format!("t{i}"), &format!("tr{i}"), &format!("e{i}"), Difficulty::Beginner, "c")
            })
            .collect()
    }

    fn ordered() -> ProgressionSettings {
        ProgressionSettings { shuffle_words: false, ..ProgressionSettings::default() }
    }

    fn mastered(ids: &[&str]) -> MasteredWords {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn start(catalog: &[VocabularyWord]) -> WordProgression {
        WordProgression::initialize(catalog, &ordered(), None, &mut session_rng(Some(1)))
    }

    fn current_id(p: &WordProgression) -> &str {
        p.current_word().map(|w| w.id.as_str()).unwrap_or("")
    }

    #[test]
    fn full_cycle_then_wrap() {
        let catalog = five_words();
        let mut p = start(&catalog);
        let none = MasteredWords::new();
        assert_eq!(current_id(&p), "w1");

        let mut order = Vec::new();
        for _ in 0..4 {
            order.push(p.advance(&none).map(|w| w.id.clone()).unwrap_or_default());
        }
        assert_eq!(order, ["w2", "w3", "w4", "w5"]);
        assert!(!p.completed_cycle());

        assert_eq!(p.advance(&none).map(|w| w.id.as_str()), Some("w1"));
        assert!(p.completed_cycle());
        assert_eq!(p.seen_words().iter().collect::<Vec<_>>(), ["w1"]);
    }

    #[test]
    fn mastered_words_are_skipped() {
        let catalog = five_words();
        let mut p = start(&catalog);
        let m = mastered(&["w2", "w4"]);

        assert_eq!(p.advance(&m).map(|w| w.id.as_str()), Some("w3"));
        assert_eq!(p.advance(&m).map(|w| w.id.as_str()), Some("w5"));
        assert!(!p.completed_cycle());
        assert_eq!(p.advance(&m).map(|w| w.id.as_str()), Some("w1"));
        assert!(p.completed_cycle());
    }

    #[test]
    fn all_mastered_never_stalls() {
        let catalog = five_words();
        let mut p = start(&catalog);
        let m = mastered(&["w1", "w2", "w3", "w4", "w5"]);
        for _ in 0..=catalog.len() {
            assert_eq!(p.advance(&m).map(|w| w.id.as_str()), Some("w1"));
        }
        assert!(p.completed_cycle());
        assert_eq!(p.seen_words().len(), 1);
    }

    #[test]
    fn single_word_list_keeps_returning_it() {
        let catalog = vec![word("only", "t", "tr", "e", Difficulty::Beginner, "c")];
        let mut p = start(&catalog);
        let none = MasteredWords::new();
        for _ in 0..3 {
            assert_eq!(p.advance(&none).map(|w| w.id.as_str()), Some("only"));
        }
    }

    #[test]
    fn empty_list_has_no_current_word() {
        let mut p = start(&[]);
        assert!(p.current_word().is_none());
        assert!(p.advance(&MasteredWords::new()).is_none());
        p.mark_current_seen();
        assert!(p.seen_words().is_empty());
        let stats = p.stats(&MasteredWords::new());
        assert_eq!((stats.total, stats.progress_pct, stats.mastery_pct), (0, 0, 0));
    }

    #[test]
    fn mark_current_seen_does_not_move() {
        let catalog = five_words();
        let mut p = start(&catalog);
        p.mark_current_seen();
        assert_eq!(current_id(&p), "w1");
        assert!(p.seen_words().contains("w1"));
    }

    #[test]
    fn go_to_known_and_unknown_ids() {
        let catalog = five_words();
        let mut p = start(&catalog);
        assert_eq!(p.go_to("w4").map(|w| w.id.clone()), Ok("w4".to_string()));
        assert_eq!(p.current_index(), 3);
        assert_eq!(
            p.go_to("nope").map(|w| w.id.clone()),
            Err(ProgressionError::WordNotFound { id: "nope".into() })
        );
        assert_eq!(current_id(&p), "w4");
    }

    #[test]
    fn stats_count_only_filtered_mastery() {
        let catalog = five_words();
        let mut p = start(&catalog);
        let m = mastered(&["w2", "elsewhere"]);
        p.mark_current_seen();
        p.advance(&m);
        let s = p.stats(&m);
        assert_eq!(s.total, 5);
        assert_eq!(s.seen, 1);
        assert_eq!(s.mastered, 1);
        assert_eq!(s.unseen, 4);
        assert_eq!(s.progress_pct, 20);
        assert_eq!(s.mastery_pct, 20);
        assert_eq!(p.stats(&m), s);
    }

    #[test]
    fn percentages_round_to_nearest() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn snapshot_restores_when_count_matches() {
        let catalog = five_words();
        let none = MasteredWords::new();
        let mut p = start(&catalog);
        p.advance(&none);
        p.advance(&none);
        let snap = p.snapshot(&none);

        let restored = WordProgression::initialize(&catalog, &ordered(), Some(&snap), &mut session_rng(Some(2)));
        assert_eq!(current_id(&restored), "w3");
        assert_eq!(restored.seen_words(), p.seen_words());
    }

    #[test]
    fn snapshot_discarded_when_count_differs() {
        let catalog = five_words();
        let snap = ProgressionSnapshot {
            available_words_length: 9,
            current_index: 3,
            seen_words: vec!["w1".into()],
            mastered_words: vec![],
            completed_cycle: true,
        };
        let p = WordProgression::initialize(&catalog, &ordered(), Some(&snap), &mut session_rng(Some(2)));
        assert_eq!(p.current_index(), 0);
        assert!(p.seen_words().is_empty());
        assert!(!p.completed_cycle());
    }

    #[test]
    fn out_of_range_snapshot_index_is_clamped() {
        let catalog = five_words();
        let snap = ProgressionSnapshot {
            available_words_length: 5,
            current_index: 40,
            seen_words: vec!["w1".into(), "ghost".into()],
            mastered_words: vec![],
            completed_cycle: false,
        };
        let p = WordProgression::initialize(&catalog, &ordered(), Some(&snap), &mut session_rng(Some(2)));
        assert_eq!(current_id(&p), "w5");
        assert_eq!(p.seen_words().len(), 1);
    }

    #[test]
    fn rebuild_keeps_current_word_by_identity() {
        let catalog = five_words();
        let mut p = start(&catalog);
        p.go_to("w2").ok();

        let shuffled = ProgressionSettings::default();
        let rebuilt = WordProgression::rebuild(&catalog, &shuffled, &p, &mut session_rng(Some(77)));
        assert_eq!(current_id(&rebuilt), "w2");
    }

    #[test]
    fn rebuild_falls_back_when_current_is_filtered_out() {
        let mut catalog = five_words();
        catalog[1].difficulty = Difficulty::Advanced;
        let mut p = start(&catalog);
        p.go_to("w2").ok();

        let beginners = ProgressionSettings {
            difficulty: DifficultyFilter::Beginner,
            shuffle_words: false,
            ..ProgressionSettings::default()
        };
        let rebuilt = WordProgression::rebuild(&catalog, &beginners, &p, &mut session_rng(Some(3)));
        assert_eq!(rebuilt.available_words().len(), 4);
        assert_eq!(current_id(&rebuilt), "w1");
    }

    #[test]
    fn reset_returns_to_first_word() {
        let catalog = five_words();
        let none = MasteredWords::new();
        let mut p = start(&catalog);
        for _ in 0..5 {
            p.advance(&none);
        }
        p.reset();
        assert_eq!(current_id(&p), "w1");
        assert!(p.seen_words().is_empty());
        assert!(!p.completed_cycle());
    }
}
