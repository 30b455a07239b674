//! Core types for Calcbox

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Operator {
    /// Symbol used in history expressions (e.g. "6 × 7")
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Modulo => "%",
        }
    }

    /// Parse an operator from its display symbol or keyboard alias
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "×" | "*" => Some(Self::Multiply),
            "÷" | "/" => Some(Self::Divide),
            "%" => Some(Self::Modulo),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Single-operand operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    SquareRoot,
    Square,
    Reciprocal,
}

impl UnaryOp {
    /// Textual trace shown as the expression, e.g. `√(9)`
    pub fn trace(&self, operand: &str) -> String {
        match self {
            Self::SquareRoot => format!("√({})", operand),
            Self::Square => format!("sqr({})", operand),
            Self::Reciprocal => format!("1/({})", operand),
        }
    }
}

/// Operation applied to a specific memory slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifyOp {
    Add,
    Subtract,
}

impl FromStr for ModifyOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" => Ok(ModifyOp::Add),
            "subtract" => Ok(ModifyOp::Subtract),
            _ => Err(format!(
                "Invalid memory operation: '{}'. Valid options: add, subtract",
                s
            )),
        }
    }
}

impl std::fmt::Display for ModifyOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModifyOp::Add => write!(f, "add"),
            ModifyOp::Subtract => write!(f, "subtract"),
        }
    }
}

/// A single memory register slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryItem {
    pub id: String,
    pub value: f64,
    /// Unix milliseconds of the last write
    pub timestamp: i64,
}

impl MemoryItem {
    pub fn new(value: f64) -> Self {
        Self {
            id: new_id(),
            value,
            timestamp: now_millis(),
        }
    }

    /// Apply `op` with `operand` and refresh the timestamp
    pub fn modify(&mut self, operand: f64, op: ModifyOp) {
        match op {
            ModifyOp::Add => self.value += operand,
            ModifyOp::Subtract => self.value -= operand,
        }
        self.timestamp = now_millis();
    }
}

/// A completed calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub expression: String,
    /// Already formatted for display
    pub result: String,
    pub timestamp: i64,
}

impl HistoryItem {
    pub fn new(expression: String, result: String) -> Self {
        Self {
            id: new_id(),
            expression,
            result,
            timestamp: now_millis(),
        }
    }
}

/// Generate a unique, time-ordered record id
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// Current time as Unix milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
