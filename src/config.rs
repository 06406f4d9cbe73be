//! Application configuration (`thai-drill.toml`).
//!
//! Every field is optional in the file; anything missing takes its default.
//! Command-line flags override the loaded values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::learning_engine::{ledger::DEFAULT_DAILY_GOAL, quiz::{DEFAULT_OPTION_COUNT, MAX_OPTION_COUNT}, speech::DEFAULT_RATE};

pub const DEFAULT_CONFIG_FILE: &str = "thai-drill.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the JSON progress records.
    pub data_dir: PathBuf,
    pub daily_goal: u32,
    pub speech_rate: f32,
    /// Display names for the first and second profile.
    pub profile_names: [String; 2],
    pub quiz_options: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: PathBuf::from(".thai-drill"),
            daily_goal: DEFAULT_DAILY_GOAL,
            speech_rate: DEFAULT_RATE,
            profile_names: ["Learner 1".to_string(), "Learner 2".to_string()],
            quiz_options: DEFAULT_OPTION_COUNT,
        }
    }
}

impl AppConfig {
    /// Parse and validate TOML text.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(AppConfig::default());
        }
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml(&text, path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.daily_goal == 0 {
            return Err(ConfigError::Invalid { field: "daily_goal", reason: "must be at least 1".into() });
        }
        if !(0.1..=10.0).contains(&self.speech_rate) {
            return Err(ConfigError::Invalid {
                field: "speech_rate",
                reason: format!("{} is outside 0.1..=10", self.speech_rate),
            });
        }
        if !(2..=MAX_OPTION_COUNT).contains(&self.quiz_options) {
            return Err(ConfigError::Invalid {
                field: "quiz_options",
                reason: format!("{} is outside 2..={MAX_OPTION_COUNT}", self.quiz_options),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = AppConfig::from_toml("", Path::new("x.toml")).expect("parse");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_given_fields() {
        let text = r#"
            daily_goal = 80
            profile_names = ["Dale", "Noi"]
        "#;
        let cfg = AppConfig::from_toml(text, Path::new("x.toml")).expect("parse");
        assert_eq!(cfg.daily_goal, 80);
        assert_eq!(cfg.profile_names[1], "Noi");
        assert_eq!(cfg.quiz_options, DEFAULT_OPTION_COUNT);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            AppConfig::from_toml("daily_goal = 0", Path::new("x.toml")),
            Err(ConfigError::Invalid { field: "daily_goal", .. })
        ));
        assert!(matches!(
            AppConfig::from_toml("speech_rate = 40.0", Path::new("x.toml")),
            Err(ConfigError::Invalid { field: "speech_rate", .. })
        ));
        assert!(matches!(
            AppConfig::from_toml("quiz_options = 1", Path::new("x.toml")),
            Err(ConfigError::Invalid { field: "quiz_options", .. })
        ));
        assert!(matches!(
            AppConfig::from_toml("daily_goal = \"lots\"", Path::new("x.toml")),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn quiz_options_beyond_the_digit_keys_are_rejected() {
        let ok = AppConfig::from_toml("quiz_options = 4", Path::new("x.toml")).expect("parse");
        assert_eq!(ok.quiz_options, MAX_OPTION_COUNT);
        assert!(matches!(
            AppConfig::from_toml("quiz_options = 6", Path::new("x.toml")),
            Err(ConfigError::Invalid { field: "quiz_options", .. })
        ));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = AppConfig::load(Path::new("/definitely/not/here.toml")).expect("defaults");
        assert_eq!(cfg, AppConfig::default());
    }
}
