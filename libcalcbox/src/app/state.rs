//! Application state
//!
//! Plain value types; all transitions happen through the reducer
//! (see `reducer.rs`).

use std::time::Duration;

use crate::config::Config;
use crate::error::EngineError;
use crate::types::Operator;

/// Root calculator state
///
/// This is everything the presentation layer needs to render the
/// calculator, apart from the memory and history lists themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Display and pending-operation state
    pub calculation: CalculationState,

    /// Memory indicator ("M" badge)
    pub has_memory: bool,

    /// Transient error overlay
    pub error: Option<ErrorNotice>,

    /// UI configuration
    pub config: UiConfig,
}

/// Display and entry state of the calculator
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationState {
    /// Text currently shown on the display
    pub display_value: String,

    /// Left-hand operand and operator waiting for a right-hand operand
    pub pending: Option<PendingOperation>,

    /// Next digit replaces the display instead of appending to it
    pub waiting_for_operand: bool,

    /// Secondary display line, e.g. `√(9)`
    pub expression: String,
}

/// Left-hand operand paired with the operator to apply to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingOperation {
    pub operand: f64,
    pub operator: Operator,
}

/// Error shown to the user until it times out or is dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorNotice {
    pub message: String,
    pub kind: EngineError,
    /// Time left before the notice is dismissed automatically
    pub remaining: Duration,
}

/// UI configuration
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// How long an error stays visible
    pub error_timeout: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            calculation: CalculationState::default(),
            has_memory: false,
            error: None,
            config: UiConfig::default(),
        }
    }
}

impl Default for CalculationState {
    fn default() -> Self {
        Self {
            display_value: "0".to_string(),
            pending: None,
            waiting_for_operand: false,
            expression: String::new(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for UiConfig {
    fn from(config: &Config) -> Self {
        Self {
            error_timeout: config.display.error_timeout(),
        }
    }
}

impl CalculationState {
    /// Left-hand operand of the pending operation
    pub fn previous_value(&self) -> Option<f64> {
        self.pending.map(|pending| pending.operand)
    }

    /// Operator of the pending operation
    pub fn operator(&self) -> Option<Operator> {
        self.pending.map(|pending| pending.operator)
    }
}

impl ErrorNotice {
    pub fn new(kind: EngineError, timeout: Duration) -> Self {
        Self {
            message: kind.to_string(),
            kind,
            remaining: timeout,
        }
    }
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state using the given configuration
    pub fn with_config(config: &Config) -> Self {
        Self {
            config: UiConfig::from(config),
            ..Self::default()
        }
    }

    /// Is an error currently shown?
    pub fn show_error(&self) -> bool {
        self.error.is_some()
    }

    /// Message of the error currently shown
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|notice| notice.message.as_str())
    }
}
