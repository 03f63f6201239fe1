//! Schedule quality breakdown.
//!
//! Recomputes every soft-constraint penalty of a schedule from scratch,
//! independently of the incremental bookkeeping in
//! [`Schedule`](crate::schedule::Schedule). The two must agree:
//! `ScoreBreakdown::calculate(&s).total() == s.score()`.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Min unmet | Slots with a minimum that holds fewer items than it |
//! | Preference | Preference values the placed items did not get |
//! | Split pairs | Pairs whose members are both placed, in different slots |
//! | Section collisions | Same-course, same-kind item pairs sharing a slot |

use std::collections::HashMap;

use serde::Serialize;

use crate::models::ItemKind;
use crate::schedule::Schedule;

/// Penalty components of a schedule.
///
/// Counts are raw; the `*_penalty` fields are weighted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    /// Slots below their minimum.
    pub unfilled_slots: usize,
    /// Weighted penalty for unfilled slots.
    pub min_penalty: i64,
    /// Weighted penalty for ignored preferences.
    pub preference_penalty: i64,
    /// Pairs placed apart.
    pub split_pairs: usize,
    /// Weighted penalty for split pairs.
    pub pair_penalty: i64,
    /// Same-course, same-kind item pairs sharing a slot.
    pub section_collisions: usize,
    /// Weighted penalty for section collisions.
    pub section_penalty: i64,
}

impl ScoreBreakdown {
    /// Computes the breakdown of a (partial or complete) schedule.
    pub fn calculate(schedule: &Schedule<'_>) -> Self {
        let problem = schedule.problem();
        let penalties = problem.penalties();
        let items = problem.items();
        let mut kpi = Self::default();

        for slot in problem.slots().slots() {
            if schedule.occupancy(&slot.key) < slot.min as usize {
                kpi.unfilled_slots += 1;
                kpi.min_penalty += penalties.unfilled_min(slot.key.kind.is_lecture());
            }
        }

        for (slot, ids) in schedule.assignments() {
            for &id in ids {
                kpi.preference_penalty +=
                    penalties.ignored_preference(items.preference_elsewhere(id, slot));
            }

            let mut groups: HashMap<(&str, u16, ItemKind), usize> = HashMap::new();
            for &id in ids {
                let key = &items.item(id).key;
                *groups
                    .entry((key.course.as_str(), key.number, key.kind))
                    .or_default() += 1;
            }
            for n in groups.into_values() {
                kpi.section_collisions += n * n.saturating_sub(1) / 2;
            }
        }
        kpi.section_penalty = kpi.section_collisions as i64 * penalties.section_collision();

        for (a, b) in items.pairs().edges() {
            if let (Some(sa), Some(sb)) = (schedule.slot_of(a), schedule.slot_of(b)) {
                if sa != sb {
                    kpi.split_pairs += 1;
                }
            }
        }
        kpi.pair_penalty = kpi.split_pairs as i64 * penalties.split_pair();

        kpi
    }

    /// Sum of all weighted penalties.
    pub fn total(&self) -> i64 {
        self.min_penalty + self.preference_penalty + self.pair_penalty + self.section_penalty
    }
}
