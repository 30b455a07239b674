//! Actions for the reducer pattern
//!
//! Every user interaction with the calculator is one `Action`. The reducer
//! (see `reducer.rs`) applies actions to state.

use std::time::Duration;

use crate::types::{ModifyOp, Operator, UnaryOp};

/// Actions that trigger state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // === Entry ===
    /// Digit key `0`-`9`
    Digit(char),

    /// Decimal point
    Decimal,

    /// Binary operator key
    Operator(Operator),

    /// Evaluate the pending operation
    Equals,

    /// Reset the display only (CE)
    ClearEntry,

    /// Reset everything (C)
    ClearAll,

    /// Drop the last display character
    Backspace,

    /// Percent key
    Percent,

    /// Flip the sign of the display value
    Negate,

    /// Square root, square or reciprocal of the display value
    Unary(UnaryOp),

    // === Memory ===
    /// MS
    MemoryStore,

    /// MR, cycling through slots on repeated presses
    MemoryRecall,

    /// M+
    MemoryAdd,

    /// M-
    MemorySubtract,

    /// MC
    MemoryClear,

    /// M+ / M- on a specific slot
    MemoryModify { id: String, op: ModifyOp },

    /// Remove a specific slot
    MemoryRemove { id: String },

    // === History ===
    /// Clear the history log
    HistoryClear,

    /// Show a history record's result and expression
    SelectHistory { id: String },

    /// Show a memory slot's value
    SelectMemory { id: String },

    /// Replace the display without evaluating anything
    ReplaceDisplay { value: String, expression: String },

    // === Error Handling ===
    /// Dismiss the error overlay
    DismissError,

    /// Time has passed; expires the error overlay
    Tick(Duration),
}

impl Action {
    /// Map a keyboard key name to an action
    ///
    /// Accepts digits, `.`, `+ - * /`, `Enter`/`=`, `Escape`, `Backspace`
    /// and `%`. Returns `None` for any other key.
    pub fn from_key(key: &str) -> Option<Self> {
        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_digit() {
                return Some(Action::Digit(c));
            }
        }

        match key {
            "." => Some(Action::Decimal),
            "+" | "-" | "*" | "/" => Operator::from_symbol(key).map(Action::Operator),
            "Enter" | "=" => Some(Action::Equals),
            "Escape" => Some(Action::ClearAll),
            "Backspace" => Some(Action::Backspace),
            "%" => Some(Action::Percent),
            _ => None,
        }
    }

    /// Does this action restart memory recall cycling?
    ///
    /// Everything the user does other than recalling resets the cursor;
    /// timer ticks are not user actions.
    pub fn resets_recall(&self) -> bool {
        !matches!(self, Action::MemoryRecall | Action::Tick(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_digits_and_operators() {
        assert_eq!(Action::from_key("7"), Some(Action::Digit('7')));
        assert_eq!(Action::from_key("."), Some(Action::Decimal));
        assert_eq!(Action::from_key("*"), Some(Action::Operator(Operator::Multiply)));
        assert_eq!(Action::from_key("/"), Some(Action::Operator(Operator::Divide)));
        assert_eq!(Action::from_key("-"), Some(Action::Operator(Operator::Subtract)));
    }

    #[test]
    fn test_from_key_commands() {
        assert_eq!(Action::from_key("Enter"), Some(Action::Equals));
        assert_eq!(Action::from_key("="), Some(Action::Equals));
        assert_eq!(Action::from_key("Escape"), Some(Action::ClearAll));
        assert_eq!(Action::from_key("Backspace"), Some(Action::Backspace));
        assert_eq!(Action::from_key("%"), Some(Action::Percent));
    }

    #[test]
    fn test_from_key_unknown() {
        assert_eq!(Action::from_key("a"), None);
        assert_eq!(Action::from_key("12"), None);
        assert_eq!(Action::from_key(""), None);
    }

    #[test]
    fn test_resets_recall() {
        assert!(!Action::MemoryRecall.resets_recall());
        assert!(!Action::Tick(Duration::from_millis(10)).resets_recall());
        assert!(Action::Digit('1').resets_recall());
        assert!(Action::MemoryStore.resets_recall());
    }
}
