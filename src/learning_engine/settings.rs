//! Settings merge and catalog filtering.

use tracing::debug;
use crate::learning_engine::models::{ProgressionSettings, SettingsPatch, VocabularyWord};

/// Merge `patch` over `current`, field by field.
///
/// The engine does not rebuild itself; callers pass the merged settings to
/// [`WordProgression::rebuild`](crate::learning_engine::progression::WordProgression::rebuild).
pub fn update_settings(current: &ProgressionSettings, patch: SettingsPatch) -> ProgressionSettings {
    let SettingsPatch { difficulty, categories, shuffle_words } = patch;
    let merged = ProgressionSettings {
        difficulty: difficulty.unwrap_or(current.difficulty),
        categories: categories.unwrap_or_else(|| current.categories.clone()),
        shuffle_words: shuffle_words.unwrap_or(current.shuffle_words),
    };
    debug!(
        difficulty = %merged.difficulty,
        categories = merged.categories.len(),
        shuffle = merged.shuffle_words,
        "settings updated"
    );
    merged
}

/// Parse a JSON settings patch. Unknown fields are an error.
pub fn parse_patch(json: &str) -> Result<SettingsPatch, serde_json::Error> {
    serde_json::from_str(json)
}

/// Catalog entries admitted by `settings`, in catalog order.
pub fn filter_catalog(catalog: &[VocabularyWord], settings: &ProgressionSettings) -> Vec<VocabularyWord> {
    catalog.iter().filter(|w| settings.admits(w)).cloned().collect()
}
