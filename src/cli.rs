//! Command-line arguments for `thai-drill`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use thai_vocab_drill::config::{AppConfig, DEFAULT_CONFIG_FILE};
use thai_vocab_drill::{ConfigError, Profile, View};

#[derive(Debug, Parser)]
#[command(
    name = "thai-drill",
    version,
    about = "Thai vocabulary flashcards and quizzes in the terminal",
    long_about = "Thai vocabulary flashcards and quizzes in the terminal.\n\n\
                  Type one key per line: 1/2 switch view, space/enter reveal or\n\
                  confirm, right/n skip, s speak, 1-4 answer, p switch profile,\n\
                  `set {json}` change settings, reset, q quit."
)]
pub struct Cli {
    /// Configuration file. A missing file means defaults.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory for progress records (overrides the config file).
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Profile to start with.
    #[arg(long, value_enum, default_value = "first")]
    pub profile: ProfileArg,

    /// Seed for a reproducible word order and quiz options.
    #[arg(long, value_name = "U64")]
    pub seed: Option<u64>,

    /// View to open first.
    #[arg(long, value_enum, default_value = "flashcards")]
    pub view: ViewArg,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    First,
    Second,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::First  => Profile::First,
            ProfileArg::Second => Profile::Second,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Flashcards,
    Quiz,
}

impl From<ViewArg> for View {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Flashcards => View::Flashcards,
            ViewArg::Quiz       => View::Quiz,
        }
    }
}

impl Cli {
    /// Load the config file and apply flag overrides.
    pub fn resolve_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::load(&self.config)?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        Ok(config)
    }
}
