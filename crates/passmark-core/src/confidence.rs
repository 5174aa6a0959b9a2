//! Reliability estimate for a pass/fail decision.
//!
//! Two factors multiply into the final percentage:
//!
//! - sample: `min(1, total_questions / saturation)`, so confidence grows
//!   linearly until the session reaches `saturation` questions.
//! - consistency: `1 - min(1, stddev / spread)`, where `stddev` is the
//!   population standard deviation of per-tier accuracy over the tiers the
//!   candidate actually attempted. With fewer than two attempted tiers
//!   there is nothing to compare and the factor is 1.

use std::collections::BTreeMap;

use crate::analysis::SubScore;
use crate::model::DifficultyTier;

/// Questions needed before sample size stops limiting confidence.
pub const DEFAULT_CONFIDENCE_SATURATION: usize = 50;
/// Tier-accuracy standard deviation (in percentage points) that zeroes confidence.
pub const DEFAULT_CONSISTENCY_SPREAD_PCT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceEstimator {
    pub saturation: usize,
    pub spread_pct: f64,
}

impl Default for ConfidenceEstimator {
    fn default() -> Self {
        Self {
            saturation: DEFAULT_CONFIDENCE_SATURATION,
            spread_pct: DEFAULT_CONSISTENCY_SPREAD_PCT,
        }
    }
}

impl ConfidenceEstimator {
    pub fn new(saturation: usize, spread_pct: f64) -> Self {
        Self {
            saturation,
            spread_pct,
        }
    }

    pub fn sample_factor(&self, total_questions: usize) -> f64 {
        if self.saturation == 0 {
            return if total_questions > 0 { 1.0 } else { 0.0 };
        }
        (total_questions as f64 / self.saturation as f64).min(1.0)
    }

    pub fn consistency_factor(&self, by_difficulty: &BTreeMap<DifficultyTier, SubScore>) -> f64 {
        let accuracies: Vec<f64> = by_difficulty
            .values()
            .filter(|s| s.total > 0)
            .map(|s| s.percentage)
            .collect();
        if accuracies.len() < 2 || self.spread_pct <= 0.0 {
            return 1.0;
        }
        1.0 - (population_std_dev(&accuracies) / self.spread_pct).min(1.0)
    }

    /// Confidence in `[0, 100]`.
    pub fn estimate(
        &self,
        total_questions: usize,
        by_difficulty: &BTreeMap<DifficultyTier, SubScore>,
    ) -> u8 {
        let confidence = 100.0
            * self.sample_factor(total_questions)
            * self.consistency_factor(by_difficulty);
        confidence.round().clamp(0.0, 100.0) as u8
    }
}

fn population_std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(correct: usize, total: usize) -> SubScore {
        SubScore {
            correct,
            total,
            percentage: if total == 0 {
                0.0
            } else {
                100.0 * correct as f64 / total as f64
            },
            avg_time_seconds: 0.0,
        }
    }

    #[test]
    fn sample_factor_saturates_at_50() {
        let est = ConfidenceEstimator::default();
        assert_eq!(est.sample_factor(0), 0.0);
        assert_eq!(est.sample_factor(10), 0.2);
        assert_eq!(est.sample_factor(50), 1.0);
        assert_eq!(est.sample_factor(180), 1.0);
    }

    #[test]
    fn single_tier_has_full_consistency() {
        let mut tiers = BTreeMap::new();
        tiers.insert(DifficultyTier::Advanced, sub(3, 10));
        let est = ConfidenceEstimator::default();
        assert_eq!(est.consistency_factor(&tiers), 1.0);
        assert_eq!(est.estimate(50, &tiers), 100);
        assert_eq!(est.estimate(25, &tiers), 50);
    }

    #[test]
    fn empty_tiers_are_ignored() {
        let mut tiers = BTreeMap::new();
        tiers.insert(DifficultyTier::Foundation, sub(8, 10));
        tiers.insert(DifficultyTier::Expert, sub(0, 0));
        assert_eq!(ConfidenceEstimator::default().consistency_factor(&tiers), 1.0);
    }

    #[test]
    fn spread_between_tiers_lowers_confidence() {
        // 100% and 0%: population stddev 50 -> factor 0
        let mut tiers = BTreeMap::new();
        tiers.insert(DifficultyTier::Foundation, sub(10, 10));
        tiers.insert(DifficultyTier::Expert, sub(0, 10));
        let est = ConfidenceEstimator::default();
        assert_eq!(est.estimate(100, &tiers), 0);

        // 80% and 60%: stddev 10 -> factor 0.8
        let mut tiers = BTreeMap::new();
        tiers.insert(DifficultyTier::Foundation, sub(8, 10));
        tiers.insert(DifficultyTier::Advanced, sub(6, 10));
        assert_eq!(est.estimate(50, &tiers), 80);
        assert_eq!(est.estimate(20, &tiers), 32);
    }

    #[test]
    fn no_questions_no_confidence() {
        assert_eq!(ConfidenceEstimator::default().estimate(0, &BTreeMap::new()), 0);
    }
}
