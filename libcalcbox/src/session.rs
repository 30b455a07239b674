//! Calculator session
//!
//! A `CalculatorSession` is the single owner of one calculator's state and
//! stores. Front ends feed it actions and read back snapshots; nothing is
//! persisted and dropping the session discards memory and history.
//!
//! # Example
//!
//! ```
//! use libcalcbox::{Action, CalculatorSession, Operator};
//!
//! let mut session = CalculatorSession::new();
//! session.dispatch(Action::Digit('5'));
//! session.dispatch(Action::Operator(Operator::Add));
//! session.dispatch(Action::Digit('3'));
//! session.dispatch(Action::Equals);
//!
//! assert_eq!(session.display(), "8");
//! assert_eq!(session.history_items()[0].expression, "5 + 3");
//! ```

use std::time::{Duration, Instant};

use crate::app::{reduce, Action, AppState, CalculationState};
use crate::error::{CalcboxError, Result};
use crate::service::CalcService;
use crate::types::{HistoryItem, MemoryItem};
use crate::Config;

/// One running calculator
pub struct CalculatorSession {
    state: AppState,
    services: CalcService,
    last_tick: Instant,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    /// Create a session with default configuration
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Create a session sized and timed from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            state: AppState::with_config(config),
            services: CalcService::from_config(config),
            last_tick: Instant::now(),
        }
    }

    /// Apply a user action
    ///
    /// Wall-clock time since the last tick is applied first, so an error
    /// raised earlier expires even if the front end never ticks. An explicit
    /// [`Action::Tick`] is applied as given.
    pub fn dispatch(&mut self, action: Action) -> &AppState {
        if !matches!(action, Action::Tick(_)) {
            self.tick();
        }
        self.apply(action)
    }

    /// Map a keyboard key to an action and apply it
    ///
    /// # Errors
    ///
    /// Returns `CalcboxError::InvalidInput` for keys with no mapping.
    pub fn press_key(&mut self, key: &str) -> Result<&AppState> {
        let action = Action::from_key(key)
            .ok_or_else(|| CalcboxError::InvalidInput(format!("Unknown key: '{}'", key)))?;
        Ok(self.dispatch(action))
    }

    /// Advance the error timer by the wall-clock time since the last tick
    pub fn tick(&mut self) -> &AppState {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.apply(Action::Tick(elapsed))
    }

    /// Advance the error timer by a fixed amount
    pub fn advance(&mut self, elapsed: Duration) -> &AppState {
        self.apply(Action::Tick(elapsed))
    }

    fn apply(&mut self, action: Action) -> &AppState {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action, &mut self.services);
        &self.state
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn calculation(&self) -> &CalculationState {
        &self.state.calculation
    }

    pub fn display(&self) -> &str {
        &self.state.calculation.display_value
    }

    pub fn expression(&self) -> &str {
        &self.state.calculation.expression
    }

    pub fn has_memory(&self) -> bool {
        self.state.has_memory
    }

    pub fn show_error(&self) -> bool {
        self.state.show_error()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.state.error_message()
    }

    /// Memory slots, newest first
    pub fn memory_items(&self) -> Vec<MemoryItem> {
        self.services.memory().get_all()
    }

    /// History records, newest first
    pub fn history_items(&self) -> Vec<HistoryItem> {
        self.services.history().get_all()
    }

    pub fn services(&self) -> &CalcService {
        &self.services
    }
}
