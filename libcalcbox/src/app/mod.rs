//! Application module
//!
//! Contains the input/state machine of the calculator:
//! - Actions: What the user can do
//! - State: What the display shows right now
//! - Reducer: (State, Action, stores) -> State
//!
//! Memory and history stores are injected into the reducer rather than
//! held globally, so every session and every test starts clean.

pub mod actions;
pub mod reducer;
pub mod state;

// Re-export commonly used types
pub use actions::Action;
pub use reducer::reduce;
pub use state::{AppState, CalculationState, ErrorNotice, PendingOperation, UiConfig};
