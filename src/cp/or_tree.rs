//! Or-tree backtracking search.
//!
//! Each node owns a schedule snapshot and the items it has yet to place.
//! Expanding a node picks one unplaced item at random, ranks its legal
//! slots, and creates one child per candidate, lazily, best score first.
//! The search is depth-first: the first child that completes wins. A node
//! whose item has no legal slot, or whose children all fail, is refuted.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! Ch. 6.3 (Backtracking Search for CSPs)

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use super::SearchLimits;
use crate::error::Result;
use crate::models::{ItemId, Problem};
use crate::schedule::Schedule;

/// Outcome of a search (or of one node).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    /// Not yet solved, or stopped by a limit.
    Unknown,
    /// A complete legal schedule was found.
    Yes,
    /// No complete legal schedule extends this node.
    No,
}

/// Depth-first search for a complete legal schedule.
///
/// # Example
/// ```
/// use u_timetable::cp::{OrTree, SearchState};
/// use u_timetable::models::*;
/// use rand::SeedableRng;
///
/// let mut slots = SlotCatalogue::new();
/// slots.upsert(Slot::new(SlotKind::MwfLecture, SlotTime::hm(8, 0)).with_max(2));
/// let mut items = ItemCatalogue::new();
/// items.add(Item::lecture("CPSC", 231, 1));
/// let problem = Problem::new(slots, items, Penalties::default());
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let mut tree = OrTree::new(&problem).unwrap();
/// assert_eq!(tree.solve(&mut rng), SearchState::Yes);
/// assert_eq!(tree.result().unwrap().placed_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct OrTree<'a> {
    root: Schedule<'a>,
    unassigned: Vec<ItemId>,
    state: SearchState,
    last: Option<Schedule<'a>>,
    limits: SearchLimits,
    expansions: u64,
}

impl<'a> OrTree<'a> {
    /// Creates a search over `problem`, seeded with its partial assignment.
    ///
    /// # Errors
    /// Fails when the partial assignment itself is unusable; see
    /// [`Schedule::seeded`].
    pub fn new(problem: &'a Problem) -> Result<Self> {
        let (root, unassigned) = Schedule::seeded(problem)?;
        Ok(Self::from_partial(root, unassigned))
    }

    /// Creates a search that completes `schedule` by placing `unassigned`.
    ///
    /// With nothing left to place the tree is already solved.
    pub fn from_partial(schedule: Schedule<'a>, unassigned: Vec<ItemId>) -> Self {
        let done = unassigned.is_empty();
        Self {
            last: done.then(|| schedule.clone()),
            root: schedule,
            unassigned,
            state: if done {
                SearchState::Yes
            } else {
                SearchState::Unknown
            },
            limits: SearchLimits::default(),
            expansions: 0,
        }
    }

    /// Sets cooperative limits.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Runs the search and returns the final state.
    ///
    /// A tree already resolved to `Yes` or `No` returns that state without
    /// searching again. A tree stopped by a limit may be solved again;
    /// the expansion count carries over.
    pub fn solve<R: Rng>(&mut self, rng: &mut R) -> SearchState {
        if self.state != SearchState::Unknown {
            return self.state;
        }
        info!(
            event = "or_tree_start",
            placed = self.root.placed_count(),
            unassigned = self.unassigned.len(),
            score = self.root.score(),
        );

        let started = Instant::now();
        let (state, last) =
            self.solve_node(self.root.clone(), self.unassigned.clone(), started, rng);
        self.state = state;
        self.last = Some(last);

        info!(
            event = "or_tree_end",
            state = ?self.state,
            expansions = self.expansions,
            score = self.last.as_ref().map(Schedule::score),
        );
        self.state
    }

    fn solve_node<R: Rng>(
        &mut self,
        schedule: Schedule<'a>,
        mut unassigned: Vec<ItemId>,
        started: Instant,
        rng: &mut R,
    ) -> (SearchState, Schedule<'a>) {
        if unassigned.is_empty() {
            return (SearchState::Yes, schedule);
        }
        if self.limits.exceeded(started, self.expansions) {
            return (SearchState::Unknown, schedule);
        }
        self.expansions += 1;

        let item = unassigned.swap_remove(rng.random_range(0..unassigned.len()));
        let candidates = schedule.rank(item, rng);
        if candidates.is_empty() {
            trace!(
                event = "dead_end",
                item = %schedule.problem().items().item(item),
                depth = schedule.placed_count(),
            );
            return (SearchState::No, schedule);
        }

        let mut last = None;
        for candidate in candidates {
            let mut child = schedule.clone();
            child.place(candidate.slot, item);
            match self.solve_node(child, unassigned.clone(), started, rng) {
                (SearchState::No, result) => last = Some(result),
                outcome => return outcome,
            }
        }
        (SearchState::No, last.unwrap_or(schedule))
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Whether a complete legal schedule was found.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.state == SearchState::Yes
    }

    /// The complete schedule, when the search succeeded.
    pub fn result(&self) -> Option<&Schedule<'a>> {
        if self.is_valid() {
            self.last.as_ref()
        } else {
            None
        }
    }

    /// The last schedule the search reached, whatever the outcome.
    pub fn last_attempt(&self) -> Option<&Schedule<'a>> {
        self.last.as_ref()
    }

    /// Consumes the tree, returning the complete schedule on success.
    pub fn into_result(self) -> Option<Schedule<'a>> {
        if self.is_valid() {
            self.last
        } else {
            None
        }
    }

    /// Score of the schedule the search starts from.
    #[inline]
    pub fn root_score(&self) -> i64 {
        self.root.score()
    }

    /// Node expansions performed so far.
    #[inline]
    pub fn expansions(&self) -> u64 {
        self.expansions
    }
}
