//! Set-based crossover.
//!
//! A child starts from the seeded schedule (partial assignment only). Every
//! other item, in random order, tries the slot one parent gave it, then the
//! slot the other parent gave it; the parent asked first is drawn per item,
//! biased toward the parent with the lower score. Items neither slot fits
//! are left for an [`OrTree`] that completes the child.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::cp::{OrTree, SearchLimits, SearchState};
use crate::error::Result;
use crate::models::{ItemId, Problem};
use crate::schedule::Schedule;

/// Score used for both parents when either score is not positive.
pub const PARENT_SCORE_FLOOR: i64 = 10;

/// Which parent an item is inherited from first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    A,
    B,
}

/// Draws the parent to ask first.
///
/// The lower-scored parent is chosen with probability
/// `higher / (a + b)`. When either score is zero or negative both are
/// replaced by [`PARENT_SCORE_FLOOR`], giving a fair coin.
pub fn choose_first<R: Rng>(a_score: i64, b_score: i64, rng: &mut R) -> Parent {
    let (a, b) = if a_score <= 0 || b_score <= 0 {
        (PARENT_SCORE_FLOOR, PARENT_SCORE_FLOOR)
    } else {
        (a_score, b_score)
    };
    let draw = rng.random_range(0..a + b);
    if a > b {
        if draw < a {
            Parent::B
        } else {
            Parent::A
        }
    } else if draw < b {
        Parent::A
    } else {
        Parent::B
    }
}

/// Result of one crossover.
#[derive(Debug, Clone)]
pub struct Offspring<'a> {
    tree: OrTree<'a>,
    inherited: Vec<ItemId>,
    completed: Vec<ItemId>,
}

impl<'a> Offspring<'a> {
    /// State of the completing search.
    #[inline]
    pub fn state(&self) -> SearchState {
        self.tree.state()
    }

    /// Whether the child is a complete legal schedule.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.tree.is_valid()
    }

    /// The child schedule, when valid.
    pub fn schedule(&self) -> Option<&Schedule<'a>> {
        self.tree.result()
    }

    /// Consumes the offspring, returning the child when valid.
    pub fn into_schedule(self) -> Option<Schedule<'a>> {
        self.tree.into_result()
    }

    /// Items placed at a parent's slot.
    pub fn inherited(&self) -> &[ItemId] {
        &self.inherited
    }

    /// Items left to the completing search.
    pub fn completed(&self) -> &[ItemId] {
        &self.completed
    }

    /// Node expansions spent completing the child.
    pub fn expansions(&self) -> u64 {
        self.tree.expansions()
    }
}

/// Crossover operator bound to one problem.
#[derive(Debug, Clone)]
pub struct Crossover<'a> {
    seed: Schedule<'a>,
    free: Vec<ItemId>,
    limits: SearchLimits,
}

impl<'a> Crossover<'a> {
    /// Creates the operator, building the seed schedule once.
    ///
    /// # Errors
    /// Fails when the problem's partial assignment is unusable.
    pub fn new(problem: &'a Problem) -> Result<Self> {
        let (seed, free) = Schedule::seeded(problem)?;
        Ok(Self {
            seed,
            free,
            limits: SearchLimits::default(),
        })
    }

    /// Limits for the completing search.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Breeds a child from two complete parents.
    pub fn breed<R: Rng>(
        &self,
        a: &Schedule<'_>,
        b: &Schedule<'_>,
        rng: &mut R,
    ) -> Offspring<'a> {
        let mut child = self.seed.clone();
        let mut order = self.free.clone();
        order.shuffle(rng);

        let mut inherited = Vec::with_capacity(order.len());
        let mut completed = Vec::new();
        for item in order {
            let (first, second) = match choose_first(a.score(), b.score(), rng) {
                Parent::A => (a, b),
                Parent::B => (b, a),
            };
            let slot = [first.slot_of(item), second.slot_of(item)]
                .into_iter()
                .flatten()
                .find(|slot| child.is_legal(*slot, item));
            match slot {
                Some(slot) => {
                    child.place(slot, item);
                    inherited.push(item);
                }
                None => completed.push(item),
            }
        }

        debug!(
            event = "crossover",
            parent_a = a.score(),
            parent_b = b.score(),
            inherited = inherited.len(),
            completed = completed.len(),
        );

        let mut tree =
            OrTree::from_partial(child, completed.clone()).with_limits(self.limits.clone());
        tree.solve(rng);
        Offspring {
            tree,
            inherited,
            completed,
        }
    }
}
