//! Shared test fixtures.

use crate::models::{
    Item, ItemCatalogue, ItemId, ItemKey, Penalties, Problem, Slot, SlotCatalogue, SlotKey,
    SlotKind, SlotTime,
};
use crate::schedule::Schedule;

/// Looks up an item id, panicking when the item is missing.
pub fn key(problem: &Problem, course: &str, number: u16, lecture: bool, section: u16) -> ItemId {
    let key = if lecture {
        ItemKey::lecture(course, number, section)
    } else {
        ItemKey::lab(course, number, section)
    };
    problem
        .items()
        .id_of(&key)
        .unwrap_or_else(|| panic!("no item {key}"))
}

/// Asserts that `schedule` is complete and that every placement passes
/// `is_legal` when replayed in slot order onto an empty schedule. The
/// replay must also reproduce the running score.
pub fn assert_complete_and_legal(problem: &Problem, schedule: &Schedule<'_>) {
    assert!(schedule.is_complete(), "incomplete: {} placed", schedule.placed_count());
    let mut replay = Schedule::new(problem);
    for (slot, ids) in schedule.assignments() {
        for &id in ids {
            assert_eq!(slot.kind.is_lecture(), problem.items().item(id).is_lecture());
            assert!(
                replay.is_legal(*slot, id),
                "{} is illegal at {slot}",
                problem.items().item(id)
            );
            replay.place(*slot, id);
        }
    }
    assert_eq!(replay.score(), schedule.score());
}

fn slot(kind: SlotKind, hour: u8, minute: u8, max: u32) -> Slot {
    Slot::new(kind, SlotTime::hm(hour, minute)).with_max(max)
}

/// Small department with no slot minimums.
///
/// Lecture slots: MWF 8:00, 9:00, 10:00 and TuTh 9:30 (max 2 each).
/// Lab slots: MW 8:00 and 10:00 (max 2), Fri 10:00 (max 1).
/// Items: CPSC 433 LEC 01/02 with TUT 01 under LEC 01, SENG 311 LEC 01
/// and a parent-less SENG 311 TUT 01.
pub fn sample_problem() -> Problem {
    let mut slots = SlotCatalogue::new();
    for s in [
        slot(SlotKind::MwfLecture, 8, 0, 2),
        slot(SlotKind::MwfLecture, 9, 0, 2),
        slot(SlotKind::MwfLecture, 10, 0, 2),
        slot(SlotKind::TtLecture, 9, 30, 2),
        slot(SlotKind::MwLab, 8, 0, 2),
        slot(SlotKind::MwLab, 10, 0, 2),
        slot(SlotKind::FriLab, 10, 0, 1),
    ] {
        slots.upsert(s);
    }

    let mut items = ItemCatalogue::new();
    items.add(Item::lecture("CPSC", 433, 1));
    items.add(Item::lecture("CPSC", 433, 2));
    items.add(Item::lab_of("CPSC", 433, 1, 1));
    items.add(Item::lecture("SENG", 311, 1));
    items.add(Item::lab("SENG", 311, 1));

    Problem::new(slots, items, Penalties::new(0, 0, 5, 3))
}

/// Two lectures of different courses that want to share a slot.
pub fn paired_problem() -> Problem {
    let mut slots = SlotCatalogue::new();
    slots.upsert(slot(SlotKind::MwfLecture, 8, 0, 2));
    slots.upsert(slot(SlotKind::MwfLecture, 9, 0, 2));

    let mut items = ItemCatalogue::new();
    items.add(Item::lecture("CPSC", 231, 1));
    items.add(Item::lecture("SENG", 300, 1));
    items.add_pair(&ItemKey::lecture("CPSC", 231, 1), &ItemKey::lecture("SENG", 300, 1));

    Problem::new(slots, items, Penalties::new(0, 0, 5, 0))
}

/// Department with minimums, preferences, a pair and an incompatibility,
/// roomy enough that the search always finds a complete schedule.
pub fn department_problem() -> Problem {
    let mut slots = SlotCatalogue::new();
    for hour in [8, 9, 10, 11] {
        slots.upsert(slot(SlotKind::MwfLecture, hour, 0, 3).with_min(1));
    }
    slots.upsert(slot(SlotKind::TtLecture, 9, 30, 3));
    slots.upsert(slot(SlotKind::TtLecture, 14, 0, 3));
    for hour in [8, 10, 13] {
        slots.upsert(slot(SlotKind::MwLab, hour, 0, 3));
    }
    slots.upsert(slot(SlotKind::TtLab, 14, 0, 2).with_min(1));
    slots.upsert(slot(SlotKind::FriLab, 10, 0, 2));

    let mut items = ItemCatalogue::new();
    for section in 1..=2 {
        items.add(Item::lecture("CPSC", 231, section));
    }
    items.add(Item::lab_of("CPSC", 231, 1, 1));
    items.add(Item::lab_of("CPSC", 231, 2, 2));
    items.add(Item::lecture("CPSC", 433, 1));
    items.add(Item::lab("CPSC", 433, 1));
    items.add(Item::lecture("SENG", 300, 1));
    items.add(Item::lecture("SENG", 311, 1));
    items.add(Item::lab("SENG", 311, 1));

    let cpsc433 = ItemKey::lecture("CPSC", 433, 1);
    let seng300 = ItemKey::lecture("SENG", 300, 1);
    let seng311 = ItemKey::lecture("SENG", 311, 1);
    items.add_pair(&cpsc433, &seng300);
    items.add_incompatibility(&seng300, &seng311);
    items.add_preference(&cpsc433, SlotKey::at(SlotKind::MwfLecture, 9, 0), 6);
    items.add_preference(&seng311, SlotKey::at(SlotKind::TtLecture, 9, 30), 4);

    Problem::new(slots, items, Penalties::new(5, 4, 3, 2))
}
