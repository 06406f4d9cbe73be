//! XP, streak and daily history for one learner profile.
//!
//! The ledger listens to events raised by the session views ("word mastered",
//! "correct answer") and owns the mastered-word set that the progression
//! engine reads. Every mutating call takes `today` explicitly so day
//! boundaries are testable; [`today`] gives the local calendar date.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::learning_engine::models::{HistoryEntry, MasteredWords};

pub const DEFAULT_DAILY_GOAL: u32 = 50;
pub const MASTERED_WORD_XP: u32 = 10;
pub const CORRECT_ANSWER_XP: u32 = 5;
/// Days of history kept.
pub const HISTORY_DAYS: usize = 14;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub xp: u32,
    pub streak: u32,
    pub daily_goal: u32,
    pub words_learned_today: u32,
    /// `YYYY-MM-DD`.
    pub last_active_date: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub mastered_words: MasteredWords,
}

impl Ledger {
    pub fn new(daily_goal: u32, today: NaiveDate) -> Self {
        Ledger {
            xp: 0,
            streak: 0,
            daily_goal,
            words_learned_today: 0,
            last_active_date: format_date(today),
            history: Vec::new(),
            mastered_words: MasteredWords::new(),
        }
    }

    pub fn mastered_words(&self) -> &MasteredWords {
        &self.mastered_words
    }

    pub fn is_mastered(&self, word_id: &str) -> bool {
        self.mastered_words.contains(word_id)
    }

    /// Reset the per-day counters when `today` is a new day.
    ///
    /// The streak survives only if the last active day was exactly yesterday.
    /// An unparseable stored date counts as a gap.
    pub fn roll_over(&mut self, today: NaiveDate) {
        let today_str = format_date(today);
        if self.last_active_date == today_str {
            return;
        }
        let was_yesterday = parse_date(&self.last_active_date)
            .and_then(|last| last.succ_opt())
            .is_some_and(|next| next == today);
        if !was_yesterday {
            self.streak = 0;
        }
        self.words_learned_today = 0;
        debug!(from = %self.last_active_date, to = %today_str, streak = self.streak, "day rollover");
        self.last_active_date = today_str;
    }

    /// Credit `amount` XP and count one learning action for today.
    ///
    /// The streak is set to 1 the first time total XP reaches the daily goal
    /// while the streak is 0. It is never raised past 1 here.
    pub fn add_xp(&mut self, amount: u32, today: NaiveDate) {
        let date = format_date(today);
        self.xp = self.xp.saturating_add(amount);
        self.words_learned_today = self.words_learned_today.saturating_add(1);

        match self.history.iter_mut().find(|h| h.date == date) {
            Some(entry) => {
                entry.xp = entry.xp.saturating_add(amount);
                entry.words_learned = self.words_learned_today;
            }
            None => self.history.push(HistoryEntry {
                date,
                xp: amount,
                words_learned: self.words_learned_today,
            }),
        }
        if self.history.len() > HISTORY_DAYS {
            let excess = self.history.len() - HISTORY_DAYS;
            self.history.drain(..excess);
        }

        if self.xp >= self.daily_goal && self.streak == 0 {
            self.streak = 1;
            info!(xp = self.xp, goal = self.daily_goal, "daily goal reached");
        }
    }

    /// Record `word_id` as known and credit mastery XP.
    pub fn on_word_mastered(&mut self, word_id: &str, today: NaiveDate) {
        if self.mastered_words.insert(word_id.to_string()) {
            debug!(word = word_id, "word mastered");
        }
        self.add_xp(MASTERED_WORD_XP, today);
    }

    pub fn on_correct_answer(&mut self, today: NaiveDate) {
        self.add_xp(CORRECT_ANSWER_XP, today);
    }

    /// Restore defaults, keeping the configured daily goal.
    pub fn clear(&mut self, today: NaiveDate) {
        *self = Ledger::new(self.daily_goal, today);
    }
}
