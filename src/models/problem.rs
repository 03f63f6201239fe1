//! Problem description.
//!
//! The read-only bundle every search works against: both catalogues, the
//! penalties, the counterpart rules, and an optional partial assignment.
//! Built once, then shared by reference for the whole run.

use serde::{Deserialize, Serialize};

use tracing::debug;

use super::{Item, ItemCatalogue, ItemId, ItemKey, Penalties, SlotCatalogue, SlotKey, SlotKind, SlotTime};

/// A course that must be scheduled in the evening and away from its base.
///
/// Sections of `counterpart` must start exactly at 18:00 and may not
/// overlap any section of `base`; sections of `base` may not overlap any
/// section of `counterpart`. Both courses belong to department `course`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterpartRule {
    /// Department code shared by both courses.
    pub course: String,
    /// Number of the base course (e.g. 313).
    pub base: u16,
    /// Number of the counterpart course (e.g. 813).
    pub counterpart: u16,
}

impl CounterpartRule {
    /// Creates a rule.
    pub fn new(course: impl Into<String>, base: u16, counterpart: u16) -> Self {
        Self {
            course: course.into(),
            base,
            counterpart,
        }
    }

    /// The department's standing rules: CPSC 313/813 and CPSC 413/913.
    pub fn defaults() -> Vec<Self> {
        vec![Self::new("CPSC", 313, 813), Self::new("CPSC", 413, 913)]
    }
}

/// A complete timetabling problem.
#[derive(Debug, Clone)]
pub struct Problem {
    slots: SlotCatalogue,
    items: ItemCatalogue,
    penalties: Penalties,
    counterparts: Vec<CounterpartRule>,
    partial: Vec<(SlotKey, ItemId)>,
}

impl Problem {
    /// Creates a problem with the default counterpart rules and no partial
    /// assignment.
    pub fn new(slots: SlotCatalogue, items: ItemCatalogue, penalties: Penalties) -> Self {
        Self {
            slots,
            items,
            penalties,
            counterparts: CounterpartRule::defaults(),
            partial: Vec::new(),
        }
    }

    /// Replaces the counterpart rules.
    pub fn with_counterparts(mut self, rules: Vec<CounterpartRule>) -> Self {
        self.counterparts = rules;
        self
    }

    /// Replaces the penalties.
    pub fn with_penalties(mut self, penalties: Penalties) -> Self {
        self.penalties = penalties;
        self
    }

    /// Adds one entry to the partial assignment.
    ///
    /// Returns `false` (and changes nothing) when `item` is not in the
    /// catalogue. Slot and legality are checked when the seed schedule is
    /// built, and by [`validate_problem`](crate::validation::validate_problem).
    pub fn add_partial(&mut self, item: &ItemKey, slot: SlotKey) -> bool {
        match self.items.id_of(item) {
            Some(id) => {
                self.partial.push((slot, id));
                true
            }
            None => false,
        }
    }

    /// Adds a counterpart lecture for every lecture of a rule's base course
    /// and pins it at TuTh 18:00 in the partial assignment.
    ///
    /// Each base section `n` gets counterpart section `n`. Sections that
    /// already exist are reused; items already pinned are left alone.
    /// The TuTh 18:00 slot must be in the slot catalogue for the seed
    /// schedule to accept the new entries. Returns the number of entries
    /// added to the partial assignment.
    pub fn add_counterpart_sections(&mut self) -> usize {
        let slot = SlotKey::new(SlotKind::TtLecture, SlotTime::EVENING);
        let mut sections = Vec::new();
        for rule in &self.counterparts {
            for id in self.items.lectures() {
                let key = &self.items.item(id).key;
                if key.course == rule.course && key.number == rule.base {
                    sections.push((rule.course.clone(), rule.counterpart, key.section));
                }
            }
        }

        let mut pinned = 0;
        for (course, number, section) in sections {
            let Some(id) = self.items.add(Item::lecture(course, number, section)) else {
                continue;
            };
            if self.is_seeded(id) {
                continue;
            }
            debug!(event = "counterpart_pinned", item = %self.items.item(id), slot = %slot);
            self.partial.push((slot, id));
            pinned += 1;
        }
        pinned
    }

    /// Builder form of [`add_counterpart_sections`](Self::add_counterpart_sections).
    pub fn with_counterpart_sections(mut self) -> Self {
        self.add_counterpart_sections();
        self
    }

    /// Builder form of [`add_partial`](Self::add_partial).
    pub fn with_partial(mut self, item: &ItemKey, slot: SlotKey) -> Self {
        self.add_partial(item, slot);
        self
    }

    #[inline]
    pub fn slots(&self) -> &SlotCatalogue {
        &self.slots
    }

    #[inline]
    pub fn items(&self) -> &ItemCatalogue {
        &self.items
    }

    #[inline]
    pub fn penalties(&self) -> &Penalties {
        &self.penalties
    }

    #[inline]
    pub fn counterparts(&self) -> &[CounterpartRule] {
        &self.counterparts
    }

    /// Partial assignment entries, in insertion order.
    #[inline]
    pub fn partial(&self) -> &[(SlotKey, ItemId)] {
        &self.partial
    }

    /// Whether `item` is fixed by the partial assignment.
    pub fn is_seeded(&self, item: ItemId) -> bool {
        self.partial.iter().any(|(_, id)| *id == item)
    }

    /// Score of a schedule with nothing placed.
    pub fn baseline_score(&self) -> i64 {
        self.slots.baseline_penalty(&self.penalties)
    }
}
