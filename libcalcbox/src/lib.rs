//! Calcbox - calculator engine with memory registers and history
//!
//! This library provides the core of a desk calculator: the arithmetic
//! engine, the memory register and history stores, and the reducer that
//! turns key presses into engine calls. Rendering and input capture are
//! left to front ends.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod service;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use app::{reduce, Action, AppState, CalculationState};
pub use config::Config;
pub use error::{CalcboxError, ConfigError, EngineError, Result};
pub use service::CalcService;
pub use session::CalculatorSession;
pub use types::{HistoryItem, MemoryItem, ModifyOp, Operator, UnaryOp};
