//! Reducer for calculator state transitions
//!
//! The reducer is a function `(State, Action) -> State`. The session's
//! memory and history stores are passed in explicitly; they are the only
//! things it mutates besides the returned state.
//!
//! The reducer never fails. An engine failure becomes an [`ErrorNotice`] on
//! the returned state and the calculation state is otherwise left alone,
//! except for `Equals`, which always drops the pending operation.

use std::time::Duration;

use tracing::{debug, warn};

use super::actions::Action;
use super::state::{AppState, CalculationState, ErrorNotice, PendingOperation};
use crate::engine;
use crate::error::EngineError;
use crate::service::CalcService;
use crate::types::{Operator, UnaryOp};

/// Apply one action to the calculator
///
/// Each call records at most one history entry, so replaying the same
/// action twice is the only way to record twice.
pub fn reduce(state: AppState, action: Action, services: &mut CalcService) -> AppState {
    debug!(?action, "reducing action");

    if action.resets_recall() {
        services.memory_mut().reset_recall_index();
    }

    let state = match action {
        // === Entry ===
        Action::Digit(digit) => input_digit(state, digit),
        Action::Decimal => input_decimal(state),
        Action::Operator(op) => input_operator(state, op, services),
        Action::Equals => perform_calculation(state, services),

        Action::ClearEntry => AppState {
            calculation: CalculationState {
                display_value: "0".to_string(),
                ..state.calculation
            },
            ..state
        },

        Action::ClearAll => AppState {
            calculation: CalculationState::default(),
            ..state
        },

        Action::Backspace => backspace(state),
        Action::Percent => percentage(state),
        Action::Negate => negate(state),
        Action::Unary(op) => apply_unary(state, op),

        // === Memory ===
        Action::MemoryStore => {
            with_display_value(state, |value| services.memory_mut().store(value))
        }
        Action::MemoryAdd => with_display_value(state, |value| services.memory_mut().add(value)),
        Action::MemorySubtract => {
            with_display_value(state, |value| services.memory_mut().subtract(value))
        }
        Action::MemoryModify { id, op } => with_display_value(state, |value| {
            services.memory_mut().modify_item(&id, value, op)
        }),

        Action::MemoryRecall => {
            // Recall interrupts any calculation in progress
            let value = services.memory_mut().recall();
            replace_display(state, engine::to_display_text(value), String::new())
        }

        Action::MemoryRemove { id } => {
            services.memory_mut().remove(&id);
            state
        }

        Action::MemoryClear => {
            services.memory_mut().clear();
            state
        }

        // === History ===
        Action::HistoryClear => {
            services.history_mut().clear();
            state
        }

        Action::SelectHistory { id } => {
            let selected = services
                .history()
                .get(&id)
                .map(|item| (item.result.clone(), item.expression.clone()));
            match selected {
                Some((value, expression)) => replace_display(state, value, expression),
                None => state,
            }
        }

        Action::SelectMemory { id } => {
            let selected = services.memory().get(&id).map(|item| item.value);
            match selected {
                Some(value) => replace_display(state, engine::to_display_text(value), String::new()),
                None => state,
            }
        }

        Action::ReplaceDisplay { value, expression } => replace_display(state, value, expression),

        // === Error Handling ===
        Action::DismissError => AppState {
            error: None,
            ..state
        },

        Action::Tick(elapsed) => tick(state, elapsed),
    };

    AppState {
        has_memory: services.memory().has_value(),
        ..state
    }
}

fn input_digit(state: AppState, digit: char) -> AppState {
    if !digit.is_ascii_digit() {
        return surface(state, EngineError::InvalidInput);
    }

    let calculation = &state.calculation;
    let display_value = if calculation.waiting_for_operand || calculation.display_value == "0" {
        digit.to_string()
    } else {
        format!("{}{}", calculation.display_value, digit)
    };

    AppState {
        calculation: CalculationState {
            display_value,
            waiting_for_operand: false,
            ..state.calculation
        },
        ..state
    }
}

fn input_decimal(state: AppState) -> AppState {
    let display_value = if state.calculation.waiting_for_operand {
        "0.".to_string()
    } else if !state.calculation.display_value.contains('.') {
        format!("{}.", state.calculation.display_value)
    } else {
        return state;
    };

    AppState {
        calculation: CalculationState {
            display_value,
            waiting_for_operand: false,
            ..state.calculation
        },
        ..state
    }
}

fn input_operator(state: AppState, op: Operator, services: &mut CalcService) -> AppState {
    let operand = match engine::parse_input(&state.calculation.display_value) {
        Ok(operand) => operand,
        Err(error) => return surface(state, error),
    };

    let Some(pending) = state.calculation.pending else {
        return AppState {
            calculation: CalculationState {
                pending: Some(PendingOperation {
                    operand,
                    operator: op,
                }),
                waiting_for_operand: true,
                expression: String::new(),
                ..state.calculation
            },
            ..state
        };
    };

    // Chained operator: commit the pending operation first
    match evaluate(pending, operand) {
        Ok((result, display_value)) => {
            record(services, pending, operand, &display_value);
            AppState {
                calculation: CalculationState {
                    display_value,
                    pending: Some(PendingOperation {
                        operand: result,
                        operator: op,
                    }),
                    waiting_for_operand: true,
                    expression: String::new(),
                },
                ..state
            }
        }
        Err(error) => surface(state, error),
    }
}

fn perform_calculation(state: AppState, services: &mut CalcService) -> AppState {
    let Some(pending) = state.calculation.pending else {
        return state;
    };

    let outcome = engine::parse_input(&state.calculation.display_value).and_then(|operand| {
        evaluate(pending, operand).map(|(_, display_value)| (operand, display_value))
    });

    match outcome {
        Ok((operand, display_value)) => {
            record(services, pending, operand, &display_value);
            AppState {
                calculation: CalculationState {
                    display_value,
                    pending: None,
                    waiting_for_operand: true,
                    expression: String::new(),
                },
                ..state
            }
        }
        Err(error) => {
            // Abort the calculation but keep the user unblocked
            let aborted = AppState {
                calculation: CalculationState {
                    pending: None,
                    waiting_for_operand: true,
                    expression: String::new(),
                    ..state.calculation
                },
                ..state
            };
            surface(aborted, error)
        }
    }
}

fn evaluate(pending: PendingOperation, operand: f64) -> Result<(f64, String), EngineError> {
    let result = engine::calculate(pending.operand, operand, pending.operator)?;
    let display_value = engine::format_display(result)?;
    Ok((result, display_value))
}

fn record(services: &mut CalcService, pending: PendingOperation, operand: f64, result: &str) {
    let expression = format!(
        "{} {} {}",
        engine::to_display_text(pending.operand),
        pending.operator,
        engine::to_display_text(operand)
    );
    let item = services.history_mut().add(expression, result);
    debug!(id = %item.id, expression = %item.expression, result = %item.result, "history recorded");
}

fn backspace(state: AppState) -> AppState {
    let mut display_value = state.calculation.display_value.clone();
    display_value.pop();
    if display_value.is_empty() {
        display_value = "0".to_string();
    }

    AppState {
        calculation: CalculationState {
            display_value,
            ..state.calculation
        },
        ..state
    }
}

fn percentage(state: AppState) -> AppState {
    let value = match engine::parse_input(&state.calculation.display_value) {
        Ok(value) => value,
        Err(error) => return surface(state, error),
    };

    // With a pending operation the display is a percentage of the left operand
    let result = match state.calculation.pending {
        Some(pending) => value / 100.0 * pending.operand,
        None => value / 100.0,
    };
    if let Err(error) = engine::format_display(result) {
        return surface(state, error);
    }

    AppState {
        calculation: CalculationState {
            display_value: engine::to_display_text(result),
            waiting_for_operand: false,
            ..state.calculation
        },
        ..state
    }
}

fn negate(state: AppState) -> AppState {
    match engine::parse_input(&state.calculation.display_value) {
        Ok(value) => AppState {
            calculation: CalculationState {
                display_value: engine::to_display_text(-value),
                ..state.calculation
            },
            ..state
        },
        Err(error) => surface(state, error),
    }
}

fn apply_unary(state: AppState, op: UnaryOp) -> AppState {
    let value = match engine::parse_input(&state.calculation.display_value) {
        Ok(value) => value,
        Err(error) => return surface(state, error),
    };

    match engine::apply_unary(op, value).and_then(engine::format_display) {
        Ok(display_value) => AppState {
            calculation: CalculationState {
                expression: op.trace(&engine::to_display_text(value)),
                display_value,
                waiting_for_operand: true,
                ..state.calculation
            },
            ..state
        },
        Err(error) => surface(state, error),
    }
}

/// Parse the display and hand the value to a store mutation
fn with_display_value(state: AppState, write: impl FnOnce(f64)) -> AppState {
    match engine::parse_input(&state.calculation.display_value) {
        Ok(value) => {
            write(value);
            state
        }
        Err(error) => surface(state, error),
    }
}

fn replace_display(state: AppState, display_value: String, expression: String) -> AppState {
    AppState {
        calculation: CalculationState {
            display_value,
            pending: None,
            waiting_for_operand: true,
            expression,
        },
        ..state
    }
}

fn tick(state: AppState, elapsed: Duration) -> AppState {
    let error = state.error.as_ref().and_then(|notice| {
        let remaining = notice.remaining.saturating_sub(elapsed);
        (!remaining.is_zero()).then(|| ErrorNotice {
            remaining,
            ..notice.clone()
        })
    });

    AppState { error, ..state }
}

/// Show an engine failure; a newer error replaces any older one
fn surface(state: AppState, error: EngineError) -> AppState {
    warn!(%error, "calculation failed");
    AppState {
        error: Some(ErrorNotice::new(error, state.config.error_timeout)),
        ..state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(actions: Vec<Action>) -> (AppState, CalcService) {
        let mut services = CalcService::new();
        let state = actions
            .into_iter()
            .fold(AppState::new(), |state, action| reduce(state, action, &mut services));
        (state, services)
    }

    #[test]
    fn test_reducer_returns_new_state() {
        let mut services = CalcService::new();
        let state = AppState::new();
        let original = state.clone();

        let new_state = reduce(state, Action::Digit('7'), &mut services);

        assert_eq!(original.calculation.display_value, "0");
        assert_eq!(new_state.calculation.display_value, "7");
    }

    #[test]
    fn test_digits_append() {
        let (state, _) = run(vec![Action::Digit('1'), Action::Digit('2'), Action::Digit('3')]);
        assert_eq!(state.calculation.display_value, "123");
    }

    #[test]
    fn test_leading_zero_is_replaced() {
        let (state, _) = run(vec![Action::Digit('0'), Action::Digit('0'), Action::Digit('4')]);
        assert_eq!(state.calculation.display_value, "4");
    }

    #[test]
    fn test_non_digit_is_rejected() {
        let (state, _) = run(vec![Action::Digit('x')]);
        assert_eq!(state.calculation.display_value, "0");
        assert_eq!(state.error_message(), Some("Invalid input"));
    }

    #[test]
    fn test_decimal_only_once() {
        let (state, _) = run(vec![
            Action::Digit('1'),
            Action::Decimal,
            Action::Digit('5'),
            Action::Decimal,
        ]);
        assert_eq!(state.calculation.display_value, "1.5");
    }

    #[test]
    fn test_decimal_after_operator_starts_fresh() {
        let (state, _) = run(vec![
            Action::Digit('4'),
            Action::Operator(Operator::Add),
            Action::Decimal,
        ]);
        assert_eq!(state.calculation.display_value, "0.");
        assert!(!state.calculation.waiting_for_operand);
    }

    #[test]
    fn test_first_operator_sets_pending() {
        let (state, services) = run(vec![Action::Digit('5'), Action::Operator(Operator::Multiply)]);
        assert_eq!(state.calculation.previous_value(), Some(5.0));
        assert_eq!(state.calculation.operator(), Some(Operator::Multiply));
        assert!(state.calculation.waiting_for_operand);
        assert!(services.history().is_empty());
    }

    #[test]
    fn test_clear_entry_keeps_pending() {
        let (state, _) = run(vec![
            Action::Digit('5'),
            Action::Operator(Operator::Add),
            Action::Digit('9'),
            Action::ClearEntry,
        ]);
        assert_eq!(state.calculation.display_value, "0");
        assert_eq!(state.calculation.previous_value(), Some(5.0));
    }

    #[test]
    fn test_clear_all_resets() {
        let (state, _) = run(vec![
            Action::Digit('5'),
            Action::Operator(Operator::Add),
            Action::Digit('9'),
            Action::ClearAll,
        ]);
        assert_eq!(state.calculation, CalculationState::default());
    }

    #[test]
    fn test_backspace() {
        let (state, _) = run(vec![Action::Digit('4'), Action::Digit('2'), Action::Backspace]);
        assert_eq!(state.calculation.display_value, "4");

        let (state, _) = run(vec![Action::Digit('4'), Action::Backspace]);
        assert_eq!(state.calculation.display_value, "0");
    }

    #[test]
    fn test_negate() {
        let (state, _) = run(vec![Action::Digit('8'), Action::Negate]);
        assert_eq!(state.calculation.display_value, "-8");

        let (state, _) = run(vec![Action::Negate]);
        assert_eq!(state.calculation.display_value, "0");
    }

    #[test]
    fn test_tick_expires_error() {
        let mut services = CalcService::new();
        let state = reduce(AppState::new(), Action::Unary(UnaryOp::Reciprocal), &mut services);
        assert!(state.show_error());

        let state = reduce(state, Action::Tick(Duration::from_millis(1500)), &mut services);
        assert!(state.show_error());

        let state = reduce(state, Action::Tick(Duration::from_millis(500)), &mut services);
        assert!(!state.show_error());
    }

    #[test]
    fn test_dismiss_error() {
        let (state, _) = run(vec![Action::Unary(UnaryOp::Reciprocal), Action::DismissError]);
        assert!(!state.show_error());
    }
}
