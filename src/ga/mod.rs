//! Crossover-based improvement.
//!
//! Blends two complete timetables into a new candidate. Each item keeps a
//! slot one of its parents used when that slot is still legal in the child;
//! the rest are placed by a fresh [`OrTree`](crate::cp::OrTree).
//!
//! There is no mutation operator: the randomized completing search and the
//! random inheritance order supply the variation.
//!
//! # Reference
//! - Eiben & Smith (2015), "Introduction to Evolutionary Computing", Ch. 4
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod crossover;

pub use crossover::{choose_first, Crossover, Offspring, Parent, PARENT_SCORE_FLOOR};
