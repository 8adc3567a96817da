//! Error types for settings editing and persistence

use thiserror::Error;

/// Roll-duration field validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// Field left empty
    #[error("roll duration is empty")]
    Empty,

    /// Not an integer in 1..=10
    #[error("roll duration must be an integer between 1 and 10, got {input:?}")]
    OutOfRange { input: String },
}

impl DurationError {
    /// Translation key of the user-facing message.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            DurationError::Empty => "errors.enterRollTime",
            DurationError::OutOfRange { .. } => "errors.invalidInteger",
        }
    }
}

/// Key-value storage failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend refused the write (quota, privacy mode)
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Settings store errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error("failed to persist settings: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}
