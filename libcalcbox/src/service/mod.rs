//! Service layer for Calcbox
//!
//! The two stateful stores behind the calculator live here:
//!
//! - `MemoryService`: memory register slots with cycling recall
//! - `HistoryService`: bounded log of completed calculations
//!
//! `CalcService` owns one of each. It is constructed explicitly per session
//! and handed to the reducer, so separate sessions (and separate tests)
//! never share state.
//!
//! # Example
//!
//! ```
//! use libcalcbox::service::CalcService;
//!
//! let mut service = CalcService::new();
//! service.memory_mut().store(42.0);
//! service.history_mut().add("40 + 2", "42");
//!
//! assert!(service.memory().has_value());
//! assert_eq!(service.history().len(), 1);
//! ```

pub mod history;
pub mod memory;

use self::history::HistoryService;
use self::memory::MemoryService;
use crate::Config;

/// Facade owning the memory and history stores of one session
#[derive(Debug, Clone, Default)]
pub struct CalcService {
    memory: MemoryService,
    history: HistoryService,
}

impl CalcService {
    /// Create a service with default history capacity
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service sized from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            memory: MemoryService::new(),
            history: HistoryService::with_capacity(config.history.capacity),
        }
    }

    pub fn memory(&self) -> &MemoryService {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryService {
        &mut self.memory
    }

    pub fn history(&self) -> &HistoryService {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryService {
        &mut self.history
    }
}
