//! Error types for timetabling.
//!
//! Search outcomes (a branch that dead-ends, a crossover child that could
//! not be completed) are reported as [`SearchState`](crate::cp::SearchState)
//! values, not errors. Errors are reserved for setup problems and for a
//! driver run that cannot produce any schedule.

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::{ItemKey, SlotKey};

/// Main error type for timetabling operations.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// A partial assignment places an item where it may not go.
    #[error("illegal partial assignment: {item} at {slot}")]
    IllegalPartialAssignment { item: ItemKey, slot: SlotKey },

    /// A slot is referenced that is not in the slot catalogue.
    #[error("unknown slot: {0}")]
    UnknownSlot(SlotKey),

    /// No complete legal schedule exists for the problem.
    #[error("no valid schedule: {0}")]
    Infeasible(String),

    /// Solver configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for timetabling operations.
pub type Result<T> = std::result::Result<T, TimetableError>;
