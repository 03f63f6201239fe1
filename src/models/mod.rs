//! Timetabling domain models.
//!
//! Provides the static inputs of a timetabling problem: the weekly slot
//! grid, the course sections to place, their constraint graph, and the
//! penalties that price soft violations.
//!
//! # Domain Mappings
//!
//! | u-timetable | Meaning |
//! |-------------|---------|
//! | Slot | Day pattern + start time, with max/min occupancy |
//! | Item | Lecture or lab section of a course |
//! | ItemCatalogue | Items plus incompatibility/pair/preference/unwanted relations |
//! | Problem | Both catalogues, penalties and the partial assignment |

mod catalogue;
mod item;
mod penalties;
mod problem;
mod slot;
mod timetable;

pub use catalogue::{EdgeSet, ItemCatalogue};
pub use item::{Item, ItemId, ItemKey, ItemKind};
pub use penalties::{Penalties, Weights};
pub use problem::{CounterpartRule, Problem};
pub use slot::{Slot, SlotKey, SlotKind, SlotTime};
pub use timetable::SlotCatalogue;
