//! Solver configuration.
//!
//! Penalties, weights, the random seed and search limits can be loaded from
//! a TOML file so runs are tunable without code changes. Penalties reach a
//! [`Problem`] through [`SolverConfig::apply`].
//!
//! ```
//! use u_timetable::config::SolverConfig;
//! use u_timetable::models::{ItemCatalogue, Penalties, Problem, SlotCatalogue};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!     generations = 5
//!
//!     [penalties]
//!     course_min = 10
//!     not_paired = 3
//!
//!     [penalties.weights]
//!     pair = 2
//!
//!     [search]
//!     max_expansions = 100000
//! "#).unwrap();
//!
//! assert_eq!(config.search.max_expansions, Some(100_000));
//!
//! let problem = Problem::new(SlotCatalogue::new(), ItemCatalogue::new(), Penalties::default());
//! let problem = config.apply(problem);
//! assert_eq!(problem.penalties().split_pair(), 6);
//! ```

use std::path::Path;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Penalties, Problem};

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default number of crossover generations.
pub const DEFAULT_GENERATIONS: usize = 20;

/// Main solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Soft-constraint penalties and weights. `None` keeps the problem's own.
    #[serde(default)]
    pub penalties: Option<Penalties>,

    /// Random seed for reproducible results. `None` seeds from the OS.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Number of crossover generations the driver runs.
    #[serde(default = "default_generations")]
    pub generations: usize,

    /// Limits for every backtracking search.
    #[serde(default)]
    pub search: SearchConfig,
}

fn default_generations() -> usize {
    DEFAULT_GENERATIONS
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            penalties: None,
            random_seed: None,
            generations: DEFAULT_GENERATIONS,
            search: SearchConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects negative penalties and weights.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(p) = &self.penalties else {
            return Ok(());
        };
        let w = &p.weights;
        let values = [
            ("course_min", p.course_min),
            ("lab_min", p.lab_min),
            ("not_paired", p.not_paired),
            ("section", p.section),
            ("weights.min_filled", w.min_filled),
            ("weights.preference", w.preference),
            ("weights.pair", w.pair),
            ("weights.section_diff", w.section_diff),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| *v < 0) {
            return Err(ConfigError::Invalid(format!(
                "penalty {name} must be non-negative, got {value}"
            )));
        }
        Ok(())
    }

    /// Sets the penalties.
    pub fn with_penalties(mut self, penalties: Penalties) -> Self {
        self.penalties = Some(penalties);
        self
    }

    /// Installs the configured penalties on `problem`.
    ///
    /// A configuration without a `[penalties]` table returns the problem
    /// unchanged.
    pub fn apply(&self, problem: Problem) -> Problem {
        match self.penalties {
            Some(penalties) => problem.with_penalties(penalties),
            None => problem,
        }
    }

    /// Whether `problem` already scores with the configured penalties.
    pub fn is_applied_to(&self, problem: &Problem) -> bool {
        match &self.penalties {
            Some(penalties) => penalties == problem.penalties(),
            None => true,
        }
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the search limits.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Creates the random source for a run: seeded when a seed is set,
    /// from OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Limits applied to each backtracking search.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Maximum node expansions per search.
    #[serde(default)]
    pub max_expansions: Option<u64>,

    /// Wall-clock limit per search, in seconds.
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
}

impl SearchConfig {
    /// Time limit as a [`Duration`].
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemCatalogue, SlotCatalogue};

    #[test]
    fn test_defaults() {
        let config = SolverConfig::from_toml_str("").unwrap();
        assert_eq!(config.generations, DEFAULT_GENERATIONS);
        assert_eq!(config.random_seed, None);
        assert_eq!(config.penalties, None);
        assert!(config.search.time_limit().is_none());
    }

    #[test]
    fn test_full_toml() {
        let config = SolverConfig::from_toml_str(
            r#"
            random_seed = 42
            generations = 3

            [penalties]
            course_min = 5
            lab_min = 4
            not_paired = 3
            section = 2

            [penalties.weights]
            min_filled = 2
            section_diff = 7

            [search]
            max_expansions = 500
            time_limit_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.random_seed, Some(42));
        assert_eq!(config.generations, 3);
        let penalties = config.penalties.unwrap();
        assert_eq!(penalties.unfilled_min(true), 10);
        assert_eq!(penalties.unfilled_min(false), 8);
        assert_eq!(penalties.section_collision(), 14);
        assert_eq!(penalties.weights.preference, 1);
        assert_eq!(config.search.max_expansions, Some(500));
        assert_eq!(config.search.time_limit(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_negative_penalty_rejected() {
        let err = SolverConfig::from_toml_str("[penalties]\nnot_paired = -1").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("not_paired"));
    }

    #[test]
    fn test_bad_toml() {
        let err = SolverConfig::from_toml_str("generations = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SolverConfig::load("/nonexistent/timetable.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = SolverConfig::new()
            .with_random_seed(11)
            .with_generations(4)
            .with_penalties(Penalties::new(1, 2, 3, 4).with_pair_weight(5))
            .with_search(SearchConfig {
                max_expansions: Some(1000),
                time_limit_secs: Some(30),
            });
        let text = toml::to_string(&config).unwrap();
        let back = SolverConfig::from_toml_str(&text).unwrap();

        assert_eq!(back.random_seed, Some(11));
        assert_eq!(back.generations, 4);
        assert_eq!(back.penalties, config.penalties);
        assert_eq!(back.search.max_expansions, Some(1000));
        assert_eq!(back.search.time_limit_secs, Some(30));
    }

    #[test]
    fn test_apply_installs_penalties() {
        let problem = Problem::new(SlotCatalogue::new(), ItemCatalogue::new(), Penalties::default());
        let config = SolverConfig::from_toml_str("[penalties]\ncourse_min = 1000\nnot_paired = 1000")
            .unwrap();
        assert!(!config.is_applied_to(&problem));

        let problem = config.apply(problem);
        assert!(config.is_applied_to(&problem));
        assert_eq!(problem.penalties().unfilled_min(true), 1000);
        assert_eq!(problem.penalties().split_pair(), 1000);
    }

    #[test]
    fn test_apply_without_penalties_keeps_problem() {
        let own = Penalties::new(1, 2, 3, 4);
        let problem = Problem::new(SlotCatalogue::new(), ItemCatalogue::new(), own);
        let config = SolverConfig::from_toml_str("generations = 2").unwrap();
        assert!(config.is_applied_to(&problem));
        assert_eq!(*config.apply(problem).penalties(), own);
    }

    #[test]
    fn test_seeded_rng_reproducible() {
        use rand::Rng;
        let config = SolverConfig::new().with_random_seed(9);
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
