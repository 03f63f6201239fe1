//! Scheduling state: the constraint and evaluation engine.
//!
//! A [`Schedule`] maps slots to the items placed there and keeps a running
//! penalty score. Placements are only ever added; every search branch and
//! every crossover trial works on its own clone.
//!
//! # Scoring
//! An empty schedule starts at the problem's baseline: every slot with a
//! positive minimum counts as unfilled. Each placement then adjusts the
//! score incrementally (see [`Schedule::score_if`]), so reading the score
//! is O(1) at any point of the search.
//!
//! # Pairs
//! Pair penalties are charged once per pair, when its second member is
//! placed. Until then the first member sits in a pending index recording
//! its slot and the partners it still expects.

mod constraints;
mod eval;

pub use eval::Candidate;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, TimetableError};
use crate::models::{Item, ItemId, ItemKey, Problem, SlotKey};

/// A placed item whose pair partners are not all placed yet.
#[derive(Debug, Clone)]
struct PendingPair {
    slot: SlotKey,
    partners: BTreeSet<ItemId>,
}

/// One placement, in a form external writers can serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The placed item.
    pub item: ItemKey,
    /// Where it was placed.
    pub slot: SlotKey,
}

/// A (partial or complete) timetable for one problem.
#[derive(Debug, Clone)]
pub struct Schedule<'a> {
    problem: &'a Problem,
    occupants: BTreeMap<SlotKey, BTreeSet<ItemId>>,
    placement: HashMap<ItemId, SlotKey>,
    score: i64,
    pending: HashMap<ItemId, PendingPair>,
}

impl<'a> Schedule<'a> {
    /// Creates an empty schedule scored at the problem's baseline.
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            problem,
            occupants: BTreeMap::new(),
            placement: HashMap::new(),
            score: problem.baseline_score(),
            pending: HashMap::new(),
        }
    }

    /// Creates a schedule holding the problem's partial assignment.
    ///
    /// Returns the schedule together with every item it leaves unassigned,
    /// in catalogue order.
    ///
    /// # Errors
    /// - [`TimetableError::UnknownSlot`] when an entry names a slot that is
    ///   not in the slot catalogue.
    /// - [`TimetableError::IllegalPartialAssignment`] when an entry has the
    ///   wrong slot type, places an item twice, or breaks a hard constraint.
    pub fn seeded(problem: &'a Problem) -> Result<(Self, Vec<ItemId>)> {
        let mut schedule = Self::new(problem);
        for &(slot, id) in problem.partial() {
            let item = problem.items().item(id);
            if !problem.slots().contains(&slot) {
                return Err(TimetableError::UnknownSlot(slot));
            }
            let fits = slot.kind.is_lecture() == item.is_lecture()
                && !schedule.is_placed(id)
                && schedule.is_legal(slot, id);
            if !fits {
                return Err(TimetableError::IllegalPartialAssignment {
                    item: item.key.clone(),
                    slot,
                });
            }
            schedule.place(slot, id);
        }
        let unassigned = problem
            .items()
            .ids()
            .filter(|id| !schedule.is_placed(*id))
            .collect();
        Ok((schedule, unassigned))
    }

    /// Places `item` at `slot`, updating the score and pending pairs.
    ///
    /// Hard constraints are not checked here; call [`is_legal`](Self::is_legal)
    /// first. A lecture offered to a lab slot (or vice versa), or an item
    /// that is already placed, is ignored and `false` is returned.
    pub fn place(&mut self, slot: SlotKey, item: ItemId) -> bool {
        let it = self.problem.items().item(item);
        if slot.kind.is_lecture() != it.is_lecture() {
            trace!(event = "place_type_mismatch", item = %it, slot = %slot);
            return false;
        }
        if self.placement.contains_key(&item) {
            trace!(event = "place_duplicate", item = %it, slot = %slot);
            return false;
        }

        self.score = self.score_if(slot, item);
        self.occupants.entry(slot).or_default().insert(item);
        self.placement.insert(item, slot);
        self.track_pairs(slot, item);
        true
    }

    fn track_pairs(&mut self, slot: SlotKey, item: ItemId) {
        let problem = self.problem;
        for partner in problem.items().partners(item) {
            let resolved = match self.pending.get_mut(&partner) {
                Some(p) => {
                    let removed = p.partners.remove(&item);
                    if p.partners.is_empty() {
                        self.pending.remove(&partner);
                    }
                    removed
                }
                None => false,
            };
            if !resolved {
                self.pending
                    .entry(item)
                    .or_insert_with(|| PendingPair {
                        slot,
                        partners: BTreeSet::new(),
                    })
                    .partners
                    .insert(partner);
            }
        }
    }

    /// Whether `partner` is placed and still waiting for `item`.
    ///
    /// Returns the slot `partner` was placed at.
    fn pending_for(&self, partner: ItemId, item: ItemId) -> Option<SlotKey> {
        self.pending
            .get(&partner)
            .filter(|p| p.partners.contains(&item))
            .map(|p| p.slot)
    }

    // ------------- Accessors -------------

    /// The problem this schedule belongs to.
    #[inline]
    pub fn problem(&self) -> &'a Problem {
        self.problem
    }

    /// Running penalty score. Lower is better.
    #[inline]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Items placed at `slot`.
    pub fn occupants(&self, slot: &SlotKey) -> impl Iterator<Item = ItemId> + '_ {
        self.occupants.get(slot).into_iter().flatten().copied()
    }

    /// Number of items placed at `slot`.
    #[inline]
    pub fn occupancy(&self, slot: &SlotKey) -> usize {
        self.occupants.get(slot).map_or(0, BTreeSet::len)
    }

    /// Every occupied slot with its items, in slot order.
    pub fn assignments(&self) -> &BTreeMap<SlotKey, BTreeSet<ItemId>> {
        &self.occupants
    }

    /// Slot of a placed item.
    #[inline]
    pub fn slot_of(&self, item: ItemId) -> Option<SlotKey> {
        self.placement.get(&item).copied()
    }

    #[inline]
    pub fn is_placed(&self, item: ItemId) -> bool {
        self.placement.contains_key(&item)
    }

    /// Number of placed items.
    #[inline]
    pub fn placed_count(&self) -> usize {
        self.placement.len()
    }

    /// Whether every item of the catalogue is placed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.placement.len() == self.problem.items().len()
    }

    /// All placements, ordered by slot then catalogue order.
    pub fn placements(&self) -> Vec<Placement> {
        self.occupants
            .iter()
            .flat_map(|(slot, ids)| {
                ids.iter().map(move |id| Placement {
                    item: self.problem.items().item(*id).key.clone(),
                    slot: *slot,
                })
            })
            .collect()
    }

    fn item(&self, id: ItemId) -> &'a Item {
        self.problem.items().item(id)
    }
}

impl fmt::Display for Schedule<'_> {
    /// One line per catalogue slot: the slot, then its occupants.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in self.problem.slots().slots() {
            write!(f, "{:<15}", slot.key.to_string())?;
            for id in self.occupants(&slot.key) {
                write!(f, "\t{}", self.item(id))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
