//! The built-in Thai vocabulary catalog.
//!
//! Built once on first access and shared as `&'static [VocabularyWord]`.
//! IDs are unique and the list never changes at runtime.

use std::sync::OnceLock;
use crate::learning_engine::models::{Difficulty, VocabularyWord};

use crate::learning_engine::models::Difficulty::{Advanced as A, Beginner as B, Intermediate as I};

/// Build one catalog entry.
pub fn word(
    id: &str, thai: &str, transliteration: &str, english: &str,
    difficulty: Difficulty, category: &str,
) -> VocabularyWord {
    VocabularyWord {
        id: id.to_string(),
        thai: thai.to_string(),
        transliteration: transliteration.to_string(),
        english: english.to_string(),
        difficulty,
        category: category.to_string(),
    }
}

// (id, thai, transliteration, english, difficulty, category)
const ENTRIES: &[(&str, &str, &str, &str, Difficulty, &str)] = &[
    ("1",  "สวัสดี",     "sà-wàt-dii",        "Hello",          B, "greetings"),
    ("2",  "ขอบคุณ",     "kɔ̀ɔp-kun",          "Thank you",      B, "greetings"),
    ("3",  "ขอโทษ",      "kɔ̌ɔ-tôot",          "Sorry",          B, "greetings"),
    ("4",  "ลาก่อน",     "laa-kɔ̀ɔn",          "Goodbye",        B, "greetings"),
    ("5",  "ไม่เป็นไร",   "mâi-bpen-rai",      "Never mind",     I, "greetings"),
    ("6",  "ใช่",        "châi",              "Yes",            B, "basics"),
    ("7",  "ไม่",        "mâi",               "No",             B, "basics"),
    ("8",  "ฉัน",        "chǎn",              "I",              B, "basics"),
    ("9",  "ผม",         "pǒm",               "I",              B, "basics"),
    ("10", "คุณ",        "kun",               "You",            B, "basics"),
    ("11", "น้ำ",        "náam",              "Water",          B, "food"),
    ("12", "ข้าว",       "kâao",              "Rice",           B, "food"),
    ("13", "อร่อย",      "à-ròi",             "Delicious",      B, "food"),
    ("14", "กาแฟ",       "gaa-fae",           "Coffee",         B, "food"),
    ("15", "ชา",         "chaa",              "Tea",            B, "food"),
    ("16", "เผ็ด",       "pèt",               "Spicy",          I, "food"),
    ("17", "หิว",        "hǐu",               "Hungry",         I, "food"),
    ("18", "บ้าน",       "bâan",              "House",          B, "places"),
    ("19", "โรงเรียน",    "roong-rian",        "School",         I, "places"),
    ("20", "ตลาด",       "dtà-làat",          "Market",         I, "places"),
    ("21", "โรงพยาบาล",   "roong-pá-yaa-baan", "Hospital",       A, "places"),
    ("22", "สนามบิน",    "sà-nǎam-bin",       "Airport",        A, "places"),
    ("23", "หนึ่ง",      "nʉ̀ng",              "One",            B, "numbers"),
    ("24", "สอง",        "sɔ̌ɔng",             "Two",            B, "numbers"),
    ("25", "สาม",        "sǎam",              "Three",          B, "numbers"),
    ("26", "สิบ",        "sìp",               "Ten",            I, "numbers"),
    ("27", "ร้อย",       "rɔ́ɔi",              "Hundred",        I, "numbers"),
    ("28", "แม่",        "mâe",               "Mother",         B, "family"),
    ("29", "พ่อ",        "pɔ̂ɔ",               "Father",         B, "family"),
    ("30", "พี่สาว",      "pîi-sǎao",          "Older sister",   I, "family"),
    ("31", "น้องชาย",     "nɔ́ɔng-chaai",       "Younger brother", I, "family"),
    ("32", "กิน",        "gin",               "Eat",            B, "verbs"),
    ("33", "ไป",         "bpai",              "Go",             B, "verbs"),
    ("34", "นอน",        "nɔɔn",              "Sleep",          I, "verbs"),
    ("35", "เข้าใจ",      "kâo-jai",           "Understand",     A, "verbs"),
    ("36", "หนังสือ",     "nǎng-sʉ̌ʉ",          "Book",           I, "objects"),
    ("37", "รถ",         "rót",               "Car",            B, "objects"),
    ("38", "สวย",        "sǔai",              "Beautiful",      I, "adjectives"),
    ("39", "แพง",        "paeng",             "Expensive",      I, "adjectives"),
    ("40", "ร้อน",       "rɔ́ɔn",              "Hot",            B, "adjectives"),
    ("41", "ความรับผิดชอบ", "kwaam-ráp-pìt-chɔ̂ɔp", "Responsibility", A, "abstract"),
    ("42", "ประสบการณ์",  "bprà-sòp-gaan",     "Experience",     A, "abstract"),
];

static CATALOG: OnceLock<Vec<VocabularyWord>> = OnceLock::new();

/// The full, immutable vocabulary catalog in canonical order.
pub fn vocabulary() -> &'static [VocabularyWord] {
    CATALOG.get_or_init(|| {
        ENTRIES
            .iter()
            .map(|&(id, thai, tr, en, diff, cat)| word(id, thai, tr, en, diff, cat))
            .collect()
    })
}

/// Distinct category tags in first-appearance order.
pub fn categories(catalog: &[VocabularyWord]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for w in catalog {
        if !out.contains(&w.category.as_str()) {
            out.push(&w.category);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let mut seen = HashSet::new();
        for w in vocabulary() {
            assert!(seen.insert(w.id.as_str()), "duplicate id {}", w.id);
        }
    }

    #[test]
    fn catalog_covers_every_difficulty() {
        for d in [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced] {
            assert!(vocabulary().iter().any(|w| w.difficulty == d), "no {d} words");
        }
    }

    #[test]
    fn catalog_entries_are_non_empty() {
        for w in vocabulary() {
            assert!(!w.thai.is_empty() && !w.english.is_empty() && !w.category.is_empty());
        }
    }

    #[test]
    fn categories_are_listed_once_in_order() {
        let cats = categories(vocabulary());
        assert_eq!(cats.first(), Some(&"greetings"));
        let unique: HashSet<_> = cats.iter().collect();
        assert_eq!(unique.len(), cats.len());
    }
}
