//! Driver and schedule quality metrics.
//!
//! # Algorithm
//!
//! [`HillClimber`] builds two initial schedules with the backtracking
//! search and improves on them with a fixed number of crossover
//! generations, keeping the best valid child.
//!
//! # KPI
//!
//! [`ScoreBreakdown`] recomputes every soft-constraint penalty of a
//! schedule from scratch: unmet minimums, ignored preferences, split pairs
//! and section collisions.
//!
//! # References
//!
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod hill_climb;
mod kpi;

pub use hill_climb::{HillClimber, Solution};
pub use kpi::ScoreBreakdown;
