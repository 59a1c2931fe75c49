#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::roll::DEFAULT_ROLL_SEED;
use crate::core::ConfigProvider;
use toml_config::TomlConfig;

/// Effective settings: command-line values win over the file, the file wins
/// over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub roll_seed: u32,
    pub log_level: Option<String>,
    pub log_json: bool,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            roll_seed: DEFAULT_ROLL_SEED,
            log_level: None,
            log_json: false,
            verbose: false,
        }
    }
}

impl Settings {
    pub fn from_file(file: &TomlConfig) -> Self {
        Self {
            roll_seed: file.roll_seed(),
            log_level: file.log_level().map(str::to_string),
            log_json: file.logging.json,
            verbose: false,
        }
    }

    #[cfg(feature = "cli")]
    pub fn merge(file: Option<&TomlConfig>, cli: &cli::CliConfig) -> Self {
        let base = file.map(Self::from_file).unwrap_or_default();
        Self {
            roll_seed: cli.roll_seed.unwrap_or(base.roll_seed),
            log_level: cli.log_level.clone().or(base.log_level),
            log_json: cli.log_json || base.log_json,
            verbose: cli.verbose,
        }
    }
}

impl ConfigProvider for Settings {
    fn roll_seed(&self) -> u32 {
        self.roll_seed
    }
}
