//! Error types for Calcbox

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CalcboxError>;

#[derive(Error, Debug)]
pub enum CalcboxError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Calculation error: {0}")]
    Engine(#[from] EngineError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CalcboxError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CalcboxError::InvalidInput(_) => 3,
            CalcboxError::Engine(_) => 2,
            CalcboxError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Failures raised by the arithmetic engine.
///
/// The display text of each variant is the message shown to the user,
/// so the reducer can surface `error.to_string()` directly.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Zero divisor or modulus, zero reciprocal, or a non-finite result
    #[error("Cannot divide by zero")]
    DivisionByZero,

    /// Negative square root, unparseable text, or a NaN result
    #[error("Invalid input")]
    InvalidInput,

    /// Overlong display text whose numeric value is not finite
    #[error("Result too large")]
    ResultTooLarge,
}
