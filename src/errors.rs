use thiserror::Error;

/// Failures raised by the allocation and forecasting calculators.
///
/// All of them are local and synchronous; callers decide whether to retry,
/// log or surface them to a user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Catch-up range of {requested} days exceeds the limit of {limit} days")]
    RangeTooLarge { requested: i64, limit: u32 },
}

/// Errors produced while loading or saving [`crate::config::CalculatorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err.to_string())
    }
}
