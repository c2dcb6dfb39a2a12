use crate::config::ConfigError;
use crate::scoring::{LexiconError, PriorResultError};
use crate::store::RepositoryError;
use crate::telemetry::TelemetryError;
use std::fmt;

/// Exit status for a lexicon that cannot be trusted (duplicate or malformed
/// entry). Distinct from the generic failure status.
pub const LEXICON_CONFIG_EXIT_CODE: i32 = 7;
pub const FAILURE_EXIT_CODE: i32 = 1;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Lexicon(LexiconError),
    PriorResult(PriorResultError),
    Repository(RepositoryError),
    Serialization(serde_json::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Lexicon(LexiconError::DuplicateWord { .. })
            | AppError::Lexicon(LexiconError::MalformedLine { .. }) => LEXICON_CONFIG_EXIT_CODE,
            _ => FAILURE_EXIT_CODE,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Lexicon(err) => write!(f, "lexicon error: {}; please fix and run again", err),
            AppError::PriorResult(err) => write!(f, "repeat mode error: {}", err),
            AppError::Repository(err) => write!(f, "result store error: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Lexicon(err) => Some(err),
            AppError::PriorResult(err) => Some(err),
            AppError::Repository(err) => Some(err),
            AppError::Serialization(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<LexiconError> for AppError {
    fn from(value: LexiconError) -> Self {
        Self::Lexicon(value)
    }
}

impl From<PriorResultError> for AppError {
    fn from(value: PriorResultError) -> Self {
        Self::PriorResult(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}
