//! Cooperative search limits.
//!
//! Checked between node expansions. A search that hits a limit stops
//! cleanly and reports [`SearchState::Unknown`](super::SearchState::Unknown).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::SearchConfig;

/// Limits for one backtracking search. All unset by default.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// Maximum node expansions.
    pub max_expansions: Option<u64>,
    /// Wall-clock limit.
    pub time_limit: Option<Duration>,
    /// External stop request.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    /// No limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits taken from a solver configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            max_expansions: config.max_expansions,
            time_limit: config.time_limit(),
            cancel: None,
        }
    }

    pub fn with_max_expansions(mut self, max: u64) -> Self {
        self.max_expansions = Some(max);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Stops the search once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Whether a search started at `started` with `expansions` done must stop.
    pub(crate) fn exceeded(&self, started: Instant, expansions: u64) -> bool {
        if self.max_expansions.is_some_and(|max| expansions >= max) {
            return true;
        }
        if self.time_limit.is_some_and(|limit| started.elapsed() >= limit) {
            return true;
        }
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_never_exceeded() {
        assert!(!SearchLimits::new().exceeded(Instant::now(), u64::MAX));
    }

    #[test]
    fn test_expansion_and_time_limits() {
        let limits = SearchLimits::new().with_max_expansions(3);
        assert!(!limits.exceeded(Instant::now(), 2));
        assert!(limits.exceeded(Instant::now(), 3));

        let limits = SearchLimits::new().with_time_limit(Duration::ZERO);
        assert!(limits.exceeded(Instant::now(), 0));
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let limits = SearchLimits::new().with_cancel_flag(flag.clone());
        assert!(!limits.exceeded(Instant::now(), 0));
        flag.store(true, Ordering::Relaxed);
        assert!(limits.exceeded(Instant::now(), 0));
    }

    #[test]
    fn test_from_config() {
        let config = SearchConfig {
            max_expansions: Some(10),
            time_limit_secs: Some(2),
        };
        let limits = SearchLimits::from_config(&config);
        assert_eq!(limits.max_expansions, Some(10));
        assert_eq!(limits.time_limit, Some(Duration::from_secs(2)));
    }
}
