//! University course timetabling for the U-Engine ecosystem.
//!
//! Places lecture and lab sections into weekly time slots so that every
//! hard constraint holds, while keeping the weighted soft-constraint
//! penalty low.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Slot`, `SlotCatalogue`, `Item`,
//!   `ItemCatalogue`, `Penalties`, `Problem`
//! - **`schedule`**: `Schedule`, the incremental constraint and evaluation engine
//! - **`cp`**: `OrTree` backtracking search with cooperative limits
//! - **`ga`**: `Crossover` of two complete schedules
//! - **`scheduler`**: `HillClimber` driver and `ScoreBreakdown` KPI
//! - **`validation`**: Input integrity checks (slot bounds, partial assignment)
//! - **`config`**: TOML-loadable `SolverConfig`
//!
//! # Architecture
//!
//! Catalogues are built once and shared read-only through a `Problem`.
//! Every search branch and crossover trial owns its own `Schedule`; the
//! random source is always passed in, so seeded runs are reproducible.
//! Parsing input files and writing results are left to callers.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod config;
pub mod cp;
pub mod error;
pub mod ga;
pub mod models;
pub mod schedule;
pub mod scheduler;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use error::{Result, TimetableError};
