pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::Console;
pub use app::Session;
pub use config::{toml_config::TomlConfig, Settings};
pub use crate::core::{repository::StudentRepository, roll::RollCounter};
pub use domain::model::{Address, Course, Person, Role, Roll, Student};
pub use utils::error::{RegistryError, Result};
