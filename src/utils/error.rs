use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("{message}")]
    ValidationError { message: String },

    #[error("Duplicate roll")]
    DuplicateKeyError { roll: u32 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Input closed")]
    InputClosed,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RegistryError {
    pub fn validation(message: impl Into<String>) -> Self {
        RegistryError::ValidationError {
            message: message.into(),
        }
    }

    /// Errors the session reports as `Error: <message>` before carrying on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RegistryError::ValidationError { .. } | RegistryError::DuplicateKeyError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
