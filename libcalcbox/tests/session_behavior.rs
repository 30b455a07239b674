//! Session behavior with real configuration files

use std::fs;
use std::time::Duration;

use libcalcbox::{Action, CalculatorSession, Config, Operator, UnaryOp};
use serial_test::serial;
use tempfile::TempDir;

fn config_from_file(content: &str) -> Config {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, content).unwrap();

    std::env::set_var("CALCBOX_CONFIG", &config_path);
    let config = Config::load();
    std::env::remove_var("CALCBOX_CONFIG");
    config.unwrap()
}

#[test]
#[serial]
fn test_history_capacity_from_config_file() {
    let config = config_from_file("[history]\ncapacity = 3\n");
    let mut session = CalculatorSession::from_config(&config);

    session.press_key("1").unwrap();
    for _ in 0..5 {
        session.press_key("+").unwrap();
        session.press_key("1").unwrap();
    }
    session.press_key("Enter").unwrap();

    assert_eq!(session.display(), "6");
    let expressions: Vec<String> = session
        .history_items()
        .into_iter()
        .map(|item| item.expression)
        .collect();
    assert_eq!(expressions, vec!["5 + 1", "4 + 1", "3 + 1"]);
}

#[test]
#[serial]
fn test_error_timeout_from_config_file() {
    let config = config_from_file("[display]\nerror_timeout_ms = 50\n");
    let mut session = CalculatorSession::from_config(&config);

    session.dispatch(Action::Unary(UnaryOp::Reciprocal));
    assert_eq!(session.error_message(), Some("Cannot divide by zero"));

    session.advance(Duration::from_millis(49));
    assert!(session.show_error());

    session.advance(Duration::from_millis(1));
    assert!(!session.show_error());
}

#[test]
fn test_wall_clock_expires_error_on_next_action() {
    let mut config = Config::default();
    config.display.error_timeout_ms = 1;
    let mut session = CalculatorSession::from_config(&config);

    session.dispatch(Action::Unary(UnaryOp::Reciprocal));
    assert!(session.show_error());

    std::thread::sleep(Duration::from_millis(20));
    session.dispatch(Action::Digit('3'));
    assert!(!session.show_error());
    assert_eq!(session.display(), "3");
}

#[test]
fn test_error_does_not_block_input() {
    let mut session = CalculatorSession::new();
    session.dispatch(Action::Digit('6'));
    session.dispatch(Action::Operator(Operator::Divide));
    session.dispatch(Action::Digit('0'));
    session.dispatch(Action::Equals);
    assert!(session.show_error());

    session.dispatch(Action::Digit('2'));
    session.dispatch(Action::Operator(Operator::Multiply));
    session.dispatch(Action::Digit('4'));
    session.dispatch(Action::Equals);

    assert_eq!(session.display(), "8");
    assert_eq!(session.history_items().len(), 1);
}

#[test]
fn test_memory_snapshot_is_newest_first() {
    let mut session = CalculatorSession::new();
    for value in ['1', '2', '3'] {
        session.dispatch(Action::ClearEntry);
        session.dispatch(Action::Digit(value));
        session.dispatch(Action::MemoryStore);
    }

    let values: Vec<f64> = session.memory_items().iter().map(|item| item.value).collect();
    assert_eq!(values, vec![3.0, 2.0, 1.0]);
    assert!(session.has_memory());
}
