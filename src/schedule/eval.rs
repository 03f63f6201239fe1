//! Soft-constraint evaluation and candidate ranking.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::models::{ItemId, SlotKey};

use super::Schedule;

/// A legal slot for an item, with the score the schedule would have after
/// placing it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Candidate {
    pub slot: SlotKey,
    pub score: i64,
}

impl<'a> Schedule<'a> {
    /// Score the schedule would have after placing `item` at `slot`.
    ///
    /// Pure: the schedule is not modified. Legality is not checked.
    ///
    /// Starting from the current score:
    /// - **min-fill**: the slot's weighted minimum penalty is subtracted
    ///   when this placement lifts it from below to at least its minimum;
    /// - **preference**: every preference of `item` for some *other* slot is
    ///   added, scaled by the preference weight;
    /// - **pair**: each placed partner still expecting `item` adds the pair
    ///   penalty if it sits in a different slot;
    /// - **section**: each same-course, same-kind occupant of `slot` adds
    ///   the section penalty.
    pub fn score_if(&self, slot: SlotKey, item: ItemId) -> i64 {
        let problem = self.problem;
        let penalties = problem.penalties();
        let items = problem.items();
        let it = self.item(item);
        let mut score = self.score;

        let min = problem.slots().get(&slot).map_or(0, |s| s.min) as usize;
        let occupancy = self.occupancy(&slot);
        if occupancy < min && occupancy + 1 >= min {
            score -= penalties.unfilled_min(slot.kind.is_lecture());
        }

        score += penalties.ignored_preference(items.preference_elsewhere(item, &slot));

        for partner in items.partners(item) {
            if let Some(at) = self.pending_for(partner, item) {
                if at != slot {
                    score += penalties.split_pair();
                }
            }
        }

        let collisions = self
            .occupants(&slot)
            .filter(|&other| {
                let other = self.item(other);
                other.kind() == it.kind() && other.same_course(it)
            })
            .count() as i64;
        score += collisions * penalties.section_collision();

        score
    }

    /// Every legal slot for `item` with its projected score, best first.
    ///
    /// Only slots of the item's own type are considered. Candidates with
    /// equal scores come out in random order.
    pub fn rank<R: Rng>(&self, item: ItemId, rng: &mut R) -> Vec<Candidate> {
        let lecture = self.item(item).is_lecture();
        let mut candidates: Vec<Candidate> = self
            .problem
            .slots()
            .slots_for(lecture)
            .filter(|s| self.is_legal(s.key, item))
            .map(|s| Candidate {
                slot: s.key,
                score: self.score_if(s.key, item),
            })
            .collect();
        candidates.shuffle(rng);
        candidates.sort_by_key(|c| c.score);
        candidates
    }
}
