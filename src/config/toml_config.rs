use crate::core::roll::{DEFAULT_ROLL_SEED, MAX_ROLL_SEED};
use crate::core::ConfigProvider;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{validate_one_of, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub registry: RegistrySection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySection {
    /// Signed so that a negative value is reported by `validate` rather than
    /// failing to parse with a less helpful message.
    #[serde(default = "default_roll_seed")]
    pub roll_seed: i64,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            roll_seed: default_roll_seed(),
        }
    }
}

fn default_roll_seed() -> i64 {
    i64::from(DEFAULT_ROLL_SEED)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RegistryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.registry.roll_seed < 0 || self.registry.roll_seed > i64::from(MAX_ROLL_SEED) {
            return Err(RegistryError::ConfigError {
                message: format!(
                    "registry.roll_seed must be between 0 and {}, got {}",
                    MAX_ROLL_SEED,
                    self.registry.roll_seed
                ),
            });
        }

        if let Some(level) = &self.logging.level {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }
}

impl ConfigProvider for TomlConfig {
    fn roll_seed(&self) -> u32 {
        u32::try_from(self.registry.roll_seed).unwrap_or(DEFAULT_ROLL_SEED)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[registry]
roll_seed = 5000

[logging]
level = "debug"
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.roll_seed(), 5000);
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.roll_seed(), 1000);
        assert_eq!(config.log_level(), None);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_config_validation() {
        let negative_seed = TomlConfig::from_toml_str("[registry]\nroll_seed = -1\n").unwrap();
        assert!(negative_seed.validate().is_err());

        let max_seed = TomlConfig::from_toml_str("[registry]\nroll_seed = 2147483646\n").unwrap();
        assert!(max_seed.validate().is_ok());

        let seed_past_terminal_range =
            TomlConfig::from_toml_str("[registry]\nroll_seed = 2147483647\n").unwrap();
        assert!(seed_past_terminal_range.validate().is_err());

        let bad_level = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(bad_level.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[registry\n").unwrap_err();
        assert!(matches!(err, RegistryError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[registry]\nroll_seed = 42\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.roll_seed(), 42);
    }
}
