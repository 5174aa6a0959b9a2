//! Angoff difficulty weighting.
//!
//! Turns each item's Angoff score into the credit it carries:
//!
//! w = 1 + k * (1 - angoff / 100)
//!
//! The easiest items (angoff 100) weigh exactly 1 and the hardest
//! (angoff 0) weigh `1 + k`. With `k = 0` every item weighs the same and the
//! weighted score reduces to plain percent-correct.

use serde::{Deserialize, Serialize};

use crate::model::{clamp_angoff, QuestionOutcome};

/// Default amplification constant.
pub const DEFAULT_ANGOFF_K: f64 = 1.0;

/// Maps Angoff scores to positive item weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngoffWeightModel {
    /// Amplification constant; extra weight given to the hardest item.
    pub k: f64,
}

impl Default for AngoffWeightModel {
    fn default() -> Self {
        Self {
            k: DEFAULT_ANGOFF_K,
        }
    }
}

impl AngoffWeightModel {
    /// Build a model, treating negative or non-finite `k` as 0.
    pub fn new(k: f64) -> Self {
        let k = if k.is_finite() { k.max(0.0) } else { 0.0 };
        Self { k }
    }

    /// Uniform weighting (every item weighs 1).
    pub fn uniform() -> Self {
        Self { k: 0.0 }
    }

    /// Weight for a raw Angoff score. The score is clamped to `[0, 100]` first.
    pub fn weight_for(&self, angoff_score: f64) -> f64 {
        let angoff = clamp_angoff(angoff_score);
        1.0 + self.k * (1.0 - angoff / 100.0)
    }

    /// Weight carried by one outcome.
    pub fn weight(&self, outcome: &QuestionOutcome) -> f64 {
        self.weight_for(outcome.angoff_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_k_weights() {
        let model = AngoffWeightModel::default();
        assert!(approx(model.weight_for(90.0), 1.1));
        assert!(approx(model.weight_for(20.0), 1.8));
        assert!(approx(model.weight_for(100.0), 1.0));
        assert!(approx(model.weight_for(0.0), 2.0));
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let model = AngoffWeightModel::new(2.0);
        assert!(approx(model.weight_for(-40.0), 3.0));
        assert!(approx(model.weight_for(400.0), 1.0));
        assert!(approx(model.weight_for(f64::NAN), 2.0));
    }

    #[test]
    fn harder_items_never_weigh_less() {
        let model = AngoffWeightModel::new(1.5);
        let mut previous = f64::INFINITY;
        for angoff in (0..=100).step_by(5) {
            let w = model.weight_for(angoff as f64);
            assert!(w > 0.0);
            assert!(w <= previous, "weight rose at angoff {angoff}");
            previous = w;
        }
    }

    #[test]
    fn uniform_and_negative_k() {
        assert!(approx(AngoffWeightModel::uniform().weight_for(3.0), 1.0));
        assert_eq!(AngoffWeightModel::new(-1.0).k, 0.0);
        assert_eq!(AngoffWeightModel::new(f64::INFINITY).k, 0.0);
    }
}
