use crate::config::toml_config::LOG_LEVELS;
use crate::core::roll::{DEFAULT_ROLL_SEED, MAX_ROLL_SEED};
use crate::core::ConfigProvider;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{validate_one_of, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "student-registry")]
#[command(about = "Interactive in-memory student record manager")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for automatically assigned rolls (the first one is seed + 1)
    #[arg(long)]
    pub roll_seed: Option<u32>,

    /// Log level for this crate (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn roll_seed(&self) -> u32 {
        self.roll_seed.unwrap_or(DEFAULT_ROLL_SEED)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(level) = &self.log_level {
            validate_one_of("--log-level", level, &LOG_LEVELS)?;
        }
        if let Some(seed) = self.roll_seed {
            if seed > MAX_ROLL_SEED {
                return Err(RegistryError::ConfigError {
                    message: format!(
                        "--roll-seed must be at most {}, got {}",
                        MAX_ROLL_SEED, seed
                    ),
                });
            }
        }
        if let Some(path) = &self.config {
            if path.is_empty() {
                return Err(RegistryError::ConfigError {
                    message: "--config path cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
