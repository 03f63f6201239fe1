//! Constraint-satisfaction search.
//!
//! [`OrTree`] builds a complete legal timetable by depth-first search over
//! item placements, from scratch or from a partial schedule. It is used
//! directly to create initial schedules and by the crossover search to
//! finish children.
//!
//! # Reference
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Dechter (2003), "Constraint Processing"

mod limits;
mod or_tree;

pub use limits::SearchLimits;
pub use or_tree::{OrTree, SearchState};
