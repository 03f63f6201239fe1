//! Soft-constraint penalties and weights.
//!
//! Four fixed penalties describe what each kind of soft violation costs;
//! four weights scale them when they are folded into a schedule's score.
//! The preference penalty is not fixed: it is the item's own declared
//! preference value, scaled by the preference weight.

use serde::{Deserialize, Serialize};

/// Fixed penalty values plus their weights.
///
/// Deserializable so it can be read from a solver configuration file;
/// every field defaults to zero penalty and unit weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Penalties {
    /// Penalty for a lecture slot below its minimum.
    pub course_min: i64,
    /// Penalty for a lab slot below its minimum.
    pub lab_min: i64,
    /// Penalty for a pair that ended up in different slots.
    pub not_paired: i64,
    /// Penalty for two sections of one course sharing a slot.
    pub section: i64,
    /// Scalar weights applied to the penalties above.
    pub weights: Weights,
}

/// Scalar multipliers for each penalty family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Weight for unmet minimums.
    pub min_filled: i64,
    /// Weight for ignored preferences.
    pub preference: i64,
    /// Weight for unmet pairs.
    pub pair: i64,
    /// Weight for section collisions.
    pub section_diff: i64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            min_filled: 1,
            preference: 1,
            pair: 1,
            section_diff: 1,
        }
    }
}

impl Default for Penalties {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl Penalties {
    /// Creates penalties with unit weights.
    pub fn new(course_min: i64, lab_min: i64, not_paired: i64, section: i64) -> Self {
        Self {
            course_min,
            lab_min,
            not_paired,
            section,
            weights: Weights::default(),
        }
    }

    /// Replaces all weights.
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the unmet-minimum weight.
    pub fn with_min_filled_weight(mut self, weight: i64) -> Self {
        self.weights.min_filled = weight;
        self
    }

    /// Sets the preference weight.
    pub fn with_preference_weight(mut self, weight: i64) -> Self {
        self.weights.preference = weight;
        self
    }

    /// Sets the pair weight.
    pub fn with_pair_weight(mut self, weight: i64) -> Self {
        self.weights.pair = weight;
        self
    }

    /// Sets the section-collision weight.
    pub fn with_section_weight(mut self, weight: i64) -> Self {
        self.weights.section_diff = weight;
        self
    }

    /// Weighted cost of one unfilled lecture (`true`) or lab (`false`) slot.
    #[inline]
    pub fn unfilled_min(&self, lecture: bool) -> i64 {
        let base = if lecture { self.course_min } else { self.lab_min };
        base * self.weights.min_filled
    }

    /// Weighted cost of ignored preference value `value`.
    #[inline]
    pub fn ignored_preference(&self, value: i64) -> i64 {
        value * self.weights.preference
    }

    /// Weighted cost of one split pair.
    #[inline]
    pub fn split_pair(&self) -> i64 {
        self.not_paired * self.weights.pair
    }

    /// Weighted cost of one section collision.
    #[inline]
    pub fn section_collision(&self) -> i64 {
        self.section * self.weights.section_diff
    }
}
