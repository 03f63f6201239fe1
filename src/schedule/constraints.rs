//! Hard constraints.
//!
//! [`Schedule::is_legal`] is the conjunction of eight independent checks.
//! None of them mutates the schedule.

use crate::models::{ItemId, SlotKey, SlotTime};

use super::Schedule;

/// Tuesday/Thursday starts in `[11:00, 12:30)` are reserved.
const DEAD_ZONE: std::ops::Range<u8> = 22..25;

impl<'a> Schedule<'a> {
    /// Whether placing `item` at `slot` keeps every hard constraint.
    ///
    /// Slot type is not part of legality; [`rank`](Self::rank) only offers
    /// slots of the item's own type.
    pub fn is_legal(&self, slot: SlotKey, item: ItemId) -> bool {
        self.under_max(&slot)
            && self.lecture_lab_apart(&slot, item)
            && self.compatible(&slot, item)
            && self.wanted(&slot, item)
            && self.evening_ok(&slot, item)
            && self.level_500_alone(&slot, item)
            && outside_dead_zone(&slot)
            && self.counterpart_ok(&slot, item)
    }

    /// Items in occupied slots overlapping `slot` (including `slot` itself).
    fn overlapping(&self, slot: &SlotKey) -> impl Iterator<Item = ItemId> + '_ {
        let slot = *slot;
        self.occupants
            .iter()
            .filter(move |(other, _)| slot.overlaps(other))
            .flat_map(|(_, ids)| ids.iter().copied())
    }

    /// Slots missing from the catalogue have no capacity.
    fn under_max(&self, slot: &SlotKey) -> bool {
        let max = self.problem.slots().get(slot).map_or(0, |s| s.max);
        self.occupancy(slot) < max as usize
    }

    /// A lecture and a lab of its own section may not meet at the same time.
    fn lecture_lab_apart(&self, slot: &SlotKey, item: ItemId) -> bool {
        let it = self.item(item);
        self.overlapping(slot).all(|other| {
            let other = self.item(other);
            if it.is_lecture() {
                !other.lab_clashes_with(it)
            } else {
                !it.lab_clashes_with(other)
            }
        })
    }

    fn compatible(&self, slot: &SlotKey, item: ItemId) -> bool {
        let items = self.problem.items();
        self.occupants(slot)
            .all(|other| !items.are_incompatible(item, other))
    }

    fn wanted(&self, slot: &SlotKey, item: ItemId) -> bool {
        !self.problem.items().is_unwanted(item, slot)
    }

    /// Evening sections need an evening slot; day sections may go anywhere.
    fn evening_ok(&self, slot: &SlotKey, item: ItemId) -> bool {
        !self.item(item).is_evening() || slot.is_evening()
    }

    fn level_500_alone(&self, slot: &SlotKey, item: ItemId) -> bool {
        !self.item(item).is_500_level()
            || self.occupants(slot).all(|other| !self.item(other).is_500_level())
    }

    /// Counterpart courses start at 18:00 and never overlap their base.
    ///
    /// Only direct overlap with the other course is checked; items that are
    /// merely incompatible with the base course are not considered.
    fn counterpart_ok(&self, slot: &SlotKey, item: ItemId) -> bool {
        let key = &self.item(item).key;
        for rule in self.problem.counterparts() {
            if key.course != rule.course {
                continue;
            }
            let other = if key.number == rule.counterpart {
                if slot.time != SlotTime::EVENING {
                    return false;
                }
                rule.base
            } else if key.number == rule.base {
                rule.counterpart
            } else {
                continue;
            };
            let clash = self.overlapping(slot).any(|id| {
                let k = &self.item(id).key;
                k.number == other && k.course == rule.course
            });
            if clash {
                return false;
            }
        }
        true
    }
}

fn outside_dead_zone(slot: &SlotKey) -> bool {
    !(slot.kind.meets_tuesday() && DEAD_ZONE.contains(&slot.time.ticks()))
}
