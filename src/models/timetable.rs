//! Slot catalogue.
//!
//! The complete, finite set of slots a department may use. Lookup is by
//! [`SlotKey`]; enumeration is deterministic (day pattern, then start time).
//!
//! The catalogue also tracks how many lecture and lab slots declare a
//! positive minimum. Every such slot starts out "unfilled", which gives the
//! baseline penalty an empty schedule begins with.

use std::collections::BTreeMap;

use super::{Penalties, Slot, SlotKey, SlotKind, SlotTime};

/// The department's slot catalogue.
#[derive(Debug, Clone, Default)]
pub struct SlotCatalogue {
    slots: BTreeMap<SlotKey, Slot>,
    lectures_with_min: usize,
    labs_with_min: usize,
}

impl SlotCatalogue {
    /// Creates an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the standard weekly grid with every slot at max = min = 0.
    ///
    /// - MWF lectures, MW labs, TuTh labs: hourly, 8:00 to 20:00
    /// - TuTh lectures: every 1.5h, 8:00 to 18:30
    /// - Friday labs: every 2h, 8:00 to 18:00
    ///
    /// Real capacities are filled in afterwards with [`upsert`](Self::upsert).
    pub fn standard_grid() -> Self {
        let mut catalogue = Self::new();
        for hour in 8..=20 {
            for kind in [SlotKind::MwfLecture, SlotKind::MwLab, SlotKind::TtLab] {
                catalogue.upsert(Slot::new(kind, SlotTime::hm(hour, 0)));
            }
        }
        for ticks in (16..=37).step_by(3) {
            catalogue.upsert(Slot::new(SlotKind::TtLecture, SlotTime::from_ticks(ticks)));
        }
        for hour in (8..=18).step_by(2) {
            catalogue.upsert(Slot::new(SlotKind::FriLab, SlotTime::hm(hour, 0)));
        }
        catalogue
    }

    /// Inserts a slot, replacing any slot with the same key.
    ///
    /// Returns the replaced slot, if any.
    pub fn upsert(&mut self, slot: Slot) -> Option<Slot> {
        self.track(&slot, true);
        let previous = self.slots.insert(slot.key, slot);
        if let Some(old) = &previous {
            self.track(old, false);
        }
        previous
    }

    fn track(&mut self, slot: &Slot, added: bool) {
        if slot.min == 0 {
            return;
        }
        let counter = if slot.key.kind.is_lecture() {
            &mut self.lectures_with_min
        } else {
            &mut self.labs_with_min
        };
        if added {
            *counter += 1;
        } else {
            *counter -= 1;
        }
    }

    /// Looks up a slot by key.
    #[inline]
    pub fn get(&self, key: &SlotKey) -> Option<&Slot> {
        self.slots.get(key)
    }

    /// Whether a slot with this key exists.
    #[inline]
    pub fn contains(&self, key: &SlotKey) -> bool {
        self.slots.contains_key(key)
    }

    /// All slots in canonical order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values()
    }

    /// Lecture slots in canonical order.
    pub fn lecture_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values().filter(|s| s.key.kind.is_lecture())
    }

    /// Lab slots in canonical order.
    pub fn lab_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values().filter(|s| s.key.kind.is_lab())
    }

    /// Slots of the requested type (lecture or lab).
    pub fn slots_for(&self, lecture: bool) -> impl Iterator<Item = &Slot> {
        self.slots
            .values()
            .filter(move |s| s.key.kind.is_lecture() == lecture)
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the catalogue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of lecture slots with a positive minimum.
    #[inline]
    pub fn lectures_with_min(&self) -> usize {
        self.lectures_with_min
    }

    /// Number of lab slots with a positive minimum.
    #[inline]
    pub fn labs_with_min(&self) -> usize {
        self.labs_with_min
    }

    /// Penalty of a schedule in which no slot has reached its minimum.
    pub fn baseline_penalty(&self, penalties: &Penalties) -> i64 {
        self.lectures_with_min as i64 * penalties.unfilled_min(true)
            + self.labs_with_min as i64 * penalties.unfilled_min(false)
    }
}
