//! calcbox - Drive the calculator from the command line

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use libcalcbox::engine::to_display_text;
use libcalcbox::logging::LoggingConfig;
use libcalcbox::{
    Action, CalcboxError, CalculatorSession, Config, HistoryItem, MemoryItem, ModifyOp, Operator,
    UnaryOp,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "calcbox")]
#[command(version, about = "Press calculator keys and print the display")]
#[command(long_about = r#"Press calculator keys and print the display.

Keys are given as arguments or read from stdin, separated by whitespace.

EXAMPLES:
    calcbox 5 + 3 =
    calcbox 9 sqrt
    echo "2 + 3 * 4 =" | calcbox --history
    calcbox 10 MS 20 MS MR MR --memory --format json
    calcbox 10 MS 20 MS 5 M-@2 --memory

KEYS:
    12.5             a number, typed as a fresh entry
    .                decimal point
    + - * / mod      operators (also x, ×, ÷)
    = Enter          evaluate
    %                percent
    neg +/-          negate
    sqrt sqr inv     square root, square, reciprocal
    CE C Escape      clear entry, clear all
    Backspace DEL    delete last character
    MS MR M+ M- MC   memory store, recall, add, subtract, clear
    HC               clear history

SLOT REFERENCES (N counts from 1, newest first, as listed by --memory/--history):
    M+@N M-@N        add the display to / subtract it from memory slot N
    MD@N             remove memory slot N
    MR@N             show memory slot N
    H@N              show history record N

EXIT CODES:
    0 - Success
    1 - Configuration error
    2 - Calculation error still showing when input ends
    3 - Unknown key or slot reference
"#)]
struct Cli {
    /// Keys to press (reads from stdin if not provided)
    #[arg(value_name = "KEY")]
    keys: Vec<String>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Also print the history log
    #[arg(long)]
    history: bool,

    /// Also print the memory registers
    #[arg(long)]
    memory: bool,

    /// Path to configuration file
    #[arg(short, long, env = "CALCBOX_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Final calculator state as printed in JSON mode
#[derive(Debug, Serialize)]
struct Report {
    display: String,
    expression: String,
    has_memory: bool,
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<HistoryItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    memory: Option<Vec<MemoryItem>>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<CalcboxError>()
            .map(CalcboxError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    LoggingConfig::from_config(&config.logging, cli.verbose).init();
    tracing::debug!("calcbox started with args: {:?}", cli);

    let keys = if cli.keys.is_empty() {
        read_keys_from_stdin()?
    } else {
        cli.keys.clone()
    };

    let mut session = CalculatorSession::from_config(&config);
    for key in &keys {
        for action in actions_for_token(key, &session)? {
            session.dispatch(action);
        }
    }

    match cli.format.as_str() {
        "json" => print_json(&session, &cli)?,
        _ => print_text(&session, &cli),
    }

    // An error still on screen is the outcome of the run
    match session.state().error.as_ref() {
        Some(notice) => Err(CalcboxError::Engine(notice.kind).into()),
        None => Ok(()),
    }
}

fn read_keys_from_stdin() -> Result<Vec<String>> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(CalcboxError::InvalidInput(
            "No keys given. Pass keys as arguments or pipe them to stdin".to_string(),
        )
        .into());
    }

    let mut input = String::new();
    stdin
        .read_to_string(&mut input)
        .context("Failed to read keys from stdin")?;
    Ok(input.split_whitespace().map(str::to_string).collect())
}

/// Map a command-line token to the actions it stands for
///
/// A number is typed as a fresh entry, one key per character. Then come the
/// keyboard keys, the names of the on-screen buttons, and slot references
/// like `M+@2` that act on the second-newest memory slot.
fn actions_for_token(token: &str, session: &CalculatorSession) -> libcalcbox::Result<Vec<Action>> {
    if is_number(token) {
        let keys = token.chars().map(|c| match c {
            '.' => Action::Decimal,
            digit => Action::Digit(digit),
        });
        return Ok(std::iter::once(Action::ClearEntry).chain(keys).collect());
    }

    if let Some((name, slot)) = token.split_once('@') {
        let index = slot
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .ok_or_else(|| unknown_key(token))?;
        return slot_action(token, name, index, session).map(|action| vec![action]);
    }

    button_action(token)
        .map(|action| vec![action])
        .ok_or_else(|| unknown_key(token))
}

fn is_number(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token.chars().all(|c| c.is_ascii_digit() || c == '.')
        && token.matches('.').count() <= 1
}

fn button_action(token: &str) -> Option<Action> {
    if let Some(action) = Action::from_key(token) {
        return Some(action);
    }

    let action = match token {
        "x" | "X" => Action::Operator(Operator::Multiply),
        "mod" => Action::Operator(Operator::Modulo),
        "neg" | "+/-" | "±" => Action::Negate,
        "sqrt" | "√" => Action::Unary(UnaryOp::SquareRoot),
        "sqr" | "x²" => Action::Unary(UnaryOp::Square),
        "inv" | "1/x" => Action::Unary(UnaryOp::Reciprocal),
        "CE" => Action::ClearEntry,
        "C" => Action::ClearAll,
        "DEL" => Action::Backspace,
        "MS" => Action::MemoryStore,
        "MR" => Action::MemoryRecall,
        "M+" => Action::MemoryAdd,
        "M-" => Action::MemorySubtract,
        "MC" => Action::MemoryClear,
        "HC" => Action::HistoryClear,
        _ => return Operator::from_symbol(token).map(Action::Operator),
    };
    Some(action)
}

/// Resolve a 0-based, newest-first slot reference against the session
fn slot_action(
    token: &str,
    name: &str,
    index: usize,
    session: &CalculatorSession,
) -> libcalcbox::Result<Action> {
    let memory_id = || {
        session
            .memory_items()
            .get(index)
            .map(|item| item.id.clone())
            .ok_or_else(|| CalcboxError::InvalidInput(format!("No memory slot {}", index + 1)))
    };

    match name {
        "M+" => Ok(Action::MemoryModify {
            id: memory_id()?,
            op: ModifyOp::Add,
        }),
        "M-" => Ok(Action::MemoryModify {
            id: memory_id()?,
            op: ModifyOp::Subtract,
        }),
        "MD" => Ok(Action::MemoryRemove { id: memory_id()? }),
        "MR" => Ok(Action::SelectMemory { id: memory_id()? }),
        "H" => session
            .history_items()
            .get(index)
            .map(|item| Action::SelectHistory {
                id: item.id.clone(),
            })
            .ok_or_else(|| CalcboxError::InvalidInput(format!("No history record {}", index + 1))),
        _ => Err(unknown_key(token)),
    }
}

fn unknown_key(token: &str) -> CalcboxError {
    CalcboxError::InvalidInput(format!("Unknown key: '{}'", token))
}

fn print_text(session: &CalculatorSession, cli: &Cli) {
    if !session.expression().is_empty() {
        println!("{}", session.expression());
    }
    println!("{}", session.display());

    if cli.history {
        println!();
        println!("History:");
        for (n, item) in session.history_items().iter().enumerate() {
            println!("  {}. {} = {}  [{}]", n + 1, item.expression, item.result, item.id);
        }
    }

    if cli.memory {
        println!();
        println!("Memory:");
        for (n, item) in session.memory_items().iter().enumerate() {
            println!("  {}. {}  [{}]", n + 1, to_display_text(item.value), item.id);
        }
    }
}

fn print_json(session: &CalculatorSession, cli: &Cli) -> Result<()> {
    let report = Report {
        display: session.display().to_string(),
        expression: session.expression().to_string(),
        has_memory: session.has_memory(),
        error: session.error_message().map(str::to_string),
        history: cli.history.then(|| session.history_items()),
        memory: cli.memory.then(|| session.memory_items()),
    };

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
