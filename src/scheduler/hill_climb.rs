//! Hill-climbing driver.
//!
//! Builds two independent complete schedules with the backtracking search,
//! then runs a fixed number of crossover generations. The first valid child
//! becomes the incumbent; later children replace it only when strictly
//! better. Once an incumbent exists, each generation breeds it with the
//! better of the two initial parents. The run stops early when the
//! incumbent reaches score 0.

use rand::Rng;
use tracing::{debug, info, warn};

use super::ScoreBreakdown;
use crate::config::SolverConfig;
use crate::cp::{OrTree, SearchLimits, SearchState};
use crate::error::{Result, TimetableError};
use crate::ga::Crossover;
use crate::models::Problem;
use crate::schedule::Schedule;

/// Outcome of a driver run.
#[derive(Debug, Clone)]
pub struct Solution<'a> {
    /// Best schedule found.
    pub schedule: Schedule<'a>,
    /// Score of the better initial parent.
    pub initial_score: i64,
    /// Generations actually run.
    pub generations: usize,
    /// Whether `schedule` came from crossover (rather than an initial parent).
    pub from_crossover: bool,
}

impl Solution<'_> {
    /// Score of the best schedule.
    #[inline]
    pub fn score(&self) -> i64 {
        self.schedule.score()
    }

    /// Penalty components of the best schedule.
    pub fn breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown::calculate(&self.schedule)
    }
}

/// Solves a problem: two backtracking searches, then crossover generations.
///
/// # Example
/// ```
/// use u_timetable::config::SolverConfig;
/// use u_timetable::models::*;
/// use u_timetable::scheduler::HillClimber;
///
/// let mut slots = SlotCatalogue::new();
/// slots.upsert(Slot::new(SlotKind::MwfLecture, SlotTime::hm(8, 0)).with_max(2));
/// slots.upsert(Slot::new(SlotKind::MwLab, SlotTime::hm(10, 0)).with_max(2));
/// let mut items = ItemCatalogue::new();
/// items.add(Item::lecture("CPSC", 231, 1));
/// items.add(Item::lab_of("CPSC", 231, 1, 1));
/// let problem = Problem::new(slots, items, Penalties::default());
///
/// let config = SolverConfig::new().with_random_seed(7);
/// let solution = HillClimber::new(&problem, config).solve().unwrap();
/// assert!(solution.schedule.is_complete());
/// assert_eq!(solution.score(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct HillClimber<'a> {
    problem: &'a Problem,
    config: SolverConfig,
}

impl<'a> HillClimber<'a> {
    /// Creates a driver for `problem`.
    ///
    /// Scoring uses `problem.penalties()`. Pass the problem through
    /// [`SolverConfig::apply`] first to score with the configured penalties.
    pub fn new(problem: &'a Problem, config: SolverConfig) -> Self {
        Self { problem, config }
    }

    /// Runs with the configured random source.
    ///
    /// # Errors
    /// - [`TimetableError::UnknownSlot`] / [`TimetableError::IllegalPartialAssignment`]
    ///   when the partial assignment is unusable.
    /// - [`TimetableError::Infeasible`] when no complete schedule is found.
    pub fn solve(&self) -> Result<Solution<'a>> {
        let mut rng = self.config.rng();
        self.solve_with_rng(&mut rng)
    }

    /// Runs with a caller-supplied random source.
    pub fn solve_with_rng<R: Rng>(&self, rng: &mut R) -> Result<Solution<'a>> {
        let limits = SearchLimits::from_config(&self.config.search);
        if !self.config.is_applied_to(self.problem) {
            warn!(
                event = "config_penalties_ignored",
                reason = "problem scores with its own penalties; use SolverConfig::apply",
            );
        }
        info!(
            event = "solve_start",
            items = self.problem.items().len(),
            slots = self.problem.slots().len(),
            generations = self.config.generations,
        );

        let first = self.initial(&limits, rng)?;
        let second = self.initial(&limits, rng)?;
        let better = if first.score() <= second.score() {
            &first
        } else {
            &second
        };
        let initial_score = better.score();
        debug!(event = "parents_ready", a = first.score(), b = second.score());

        let crossover = Crossover::new(self.problem)?.with_limits(limits);
        let mut best: Option<Schedule<'a>> = None;
        let mut generations = 0;
        for generation in 0..self.config.generations {
            generations = generation + 1;
            let (a, b) = match &best {
                Some(child) => (better, child),
                None => (&first, &second),
            };
            let offspring = crossover.breed(a, b, rng);
            let Some(child) = offspring.into_schedule() else {
                debug!(event = "child_rejected", generation);
                continue;
            };
            let improves = match &best {
                Some(incumbent) => child.score() < incumbent.score(),
                None => true,
            };
            if improves {
                info!(event = "new_best", generation, score = child.score());
                best = Some(child);
            }
            if best.as_ref().is_some_and(|incumbent| incumbent.score() <= 0) {
                break;
            }
        }

        let from_crossover = best.is_some();
        let schedule = match best {
            Some(child) => child,
            None => better.clone(),
        };
        info!(
            event = "solve_end",
            score = schedule.score(),
            initial_score,
            generations,
            from_crossover,
        );
        Ok(Solution {
            schedule,
            initial_score,
            generations,
            from_crossover,
        })
    }

    fn initial<R: Rng>(&self, limits: &SearchLimits, rng: &mut R) -> Result<Schedule<'a>> {
        let mut tree = OrTree::new(self.problem)?.with_limits(limits.clone());
        match tree.solve(rng) {
            SearchState::Yes => tree
                .into_result()
                .ok_or_else(|| TimetableError::Infeasible("search lost its result".into())),
            SearchState::No => Err(TimetableError::Infeasible(
                "no complete schedule satisfies the hard constraints".into(),
            )),
            SearchState::Unknown => Err(TimetableError::Infeasible(format!(
                "search stopped by limits after {} expansions",
                tree.expansions()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::models::{
        Item, ItemCatalogue, ItemKey, Penalties, Slot, SlotCatalogue, SlotKey, SlotKind, SlotTime,
    };
    use crate::test_utils::department_problem;

    #[test]
    fn test_solves_department() {
        let problem = department_problem();
        let config = SolverConfig::new().with_random_seed(3).with_generations(10);
        let solution = HillClimber::new(&problem, config).solve().unwrap();

        assert!(solution.schedule.is_complete());
        assert!(solution.generations >= 1 && solution.generations <= 10);
        assert_eq!(solution.breakdown().total(), solution.score());
        if !solution.from_crossover {
            assert_eq!(solution.score(), solution.initial_score);
        }
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let problem = department_problem();
        let run = || {
            let config = SolverConfig::new().with_random_seed(17);
            let s = HillClimber::new(&problem, config).solve().unwrap();
            (s.score(), s.schedule.placements())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_infeasible() {
        let mut slots = SlotCatalogue::new();
        slots.upsert(Slot::new(SlotKind::MwfLecture, SlotTime::hm(8, 0)).with_max(1));
        let mut items = ItemCatalogue::new();
        items.add(Item::lecture("CPSC", 231, 1));
        items.add(Item::lecture("CPSC", 233, 1));
        let problem = Problem::new(slots, items, Penalties::default());

        let err = HillClimber::new(&problem, SolverConfig::new().with_random_seed(1))
            .solve()
            .unwrap_err();
        assert!(matches!(err, TimetableError::Infeasible(_)));
    }

    #[test]
    fn test_limit_hit_is_infeasible() {
        let problem = department_problem();
        let config = SolverConfig::new()
            .with_random_seed(1)
            .with_search(SearchConfig {
                max_expansions: Some(1),
                time_limit_secs: None,
            });
        let err = HillClimber::new(&problem, config).solve().unwrap_err();
        assert!(err.to_string().contains("limits"));
    }

    #[test]
    fn test_bad_partial_surfaces() {
        let problem = department_problem().with_partial(
            &ItemKey::lecture("CPSC", 231, 1),
            SlotKey::at(SlotKind::MwfLecture, 7, 0),
        );
        let err = HillClimber::new(&problem, SolverConfig::new().with_random_seed(1))
            .solve()
            .unwrap_err();
        assert!(matches!(err, TimetableError::UnknownSlot(_)));
    }

    #[test]
    fn test_config_penalties_reach_score() {
        // One lecture cannot fill a slot with minimum 2, so the minimum
        // penalty is unavoidable.
        let mut slots = SlotCatalogue::new();
        slots.upsert(Slot::new(SlotKind::MwfLecture, SlotTime::hm(8, 0)).with_max(3).with_min(2));
        let mut items = ItemCatalogue::new();
        items.add(Item::lecture("CPSC", 231, 1));
        let problem = Problem::new(slots, items, Penalties::default());

        let config = SolverConfig::from_toml_str(
            "random_seed = 4\ngenerations = 3\n[penalties]\ncourse_min = 1000\nnot_paired = 1000",
        )
        .unwrap();

        let plain = HillClimber::new(&problem, config.clone()).solve().unwrap();
        assert_eq!(plain.score(), 0);

        let configured = config.apply(problem.clone());
        let solution = HillClimber::new(&configured, config.clone()).solve().unwrap();
        assert_eq!(Some(*solution.schedule.problem().penalties()), config.penalties);
        assert_eq!(solution.score(), 1000);
        assert_eq!(solution.breakdown().min_penalty, 1000);
    }

    #[test]
    fn test_zero_score_stops_early() {
        // No penalties at all: every schedule scores 0.
        let problem = department_problem()
            .with_penalties(Penalties::default().with_preference_weight(0));
        let config = SolverConfig::new().with_random_seed(2).with_generations(20);
        let solution = HillClimber::new(&problem, config).solve().unwrap();
        assert_eq!(solution.score(), 0);
        assert_eq!(solution.initial_score, 0);
        assert!(solution.from_crossover);
        assert!(solution.generations < 20);
    }
}
