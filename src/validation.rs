//! Input validation for timetabling problems.
//!
//! Checks structural integrity of a [`Problem`] before searching. Detects:
//! - Slots whose minimum exceeds their maximum
//! - Preferences and unwanted entries naming unknown or wrong-type slots
//! - Partial assignments that name unknown slots, mismatch types, place an
//!   item twice, or break a hard constraint
//!
//! Constraint references to unknown *items* cannot occur: the catalogue
//! drops them when they are authored.

use std::collections::HashSet;

use crate::models::{ItemId, Problem, SlotKey};
use crate::schedule::Schedule;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A slot's minimum is larger than its maximum.
    MinExceedsMax,
    /// A preference or unwanted entry names a slot not in the catalogue.
    UnknownSlot,
    /// A preference, unwanted or partial entry pairs an item with a slot of
    /// the other type.
    SlotTypeMismatch,
    /// An item appears more than once in the partial assignment.
    DuplicatePartial,
    /// A partial assignment entry breaks a hard constraint.
    IllegalPartial,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a timetabling problem.
///
/// Checks:
/// 1. Every slot has `min <= max`
/// 2. Every preference names a catalogue slot of the item's type
/// 3. Every unwanted entry names a catalogue slot of the item's type
/// 4. Every partial entry names a catalogue slot of the item's type
/// 5. No item is partially assigned twice
/// 6. Partial entries are legal when applied in order
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &Problem) -> ValidationResult {
    let mut errors = Vec::new();

    for slot in problem.slots().slots() {
        if slot.min > slot.max {
            errors.push(ValidationError::new(
                ValidationErrorKind::MinExceedsMax,
                format!("Slot {}: min {} exceeds max {}", slot.key, slot.min, slot.max),
            ));
        }
    }

    let items = problem.items();
    for id in items.ids() {
        for (slot, _) in items.preferences(id) {
            check_slot(problem, id, &slot, "preference", &mut errors);
        }
        for slot in items.unwanted(id) {
            check_slot(problem, id, &slot, "unwanted", &mut errors);
        }
    }

    validate_partial(problem, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_slot(
    problem: &Problem,
    id: ItemId,
    slot: &SlotKey,
    what: &str,
    errors: &mut Vec<ValidationError>,
) -> bool {
    let item = problem.items().item(id);
    if !problem.slots().contains(slot) {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownSlot,
            format!("{item}: {what} names unknown slot {slot}"),
        ));
        return false;
    }
    if slot.kind.is_lecture() != item.is_lecture() {
        errors.push(ValidationError::new(
            ValidationErrorKind::SlotTypeMismatch,
            format!("{item}: {what} names slot {slot} of the other type"),
        ));
        return false;
    }
    true
}

/// Replays the partial assignment, reporting every bad entry.
fn validate_partial(problem: &Problem, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    let mut schedule = Schedule::new(problem);
    for &(slot, id) in problem.partial() {
        let item = problem.items().item(id);
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePartial,
                format!("{item} is partially assigned more than once"),
            ));
            continue;
        }
        if !check_slot(problem, id, &slot, "partial assignment", errors) {
            continue;
        }
        if !schedule.is_legal(slot, id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::IllegalPartial,
                format!("{item} may not be placed at {slot}"),
            ));
            continue;
        }
        schedule.place(slot, id);
    }
}
