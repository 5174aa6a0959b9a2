//! Raw, weighted and scaled scores, and the pass/fail decision.
//!
//! The scaled score uses a two-segment linear map onto 100–500 with the
//! 60% weighted mark pinned to the pass score of 300:
//!
//! ```text
//! weighted <= 60:  scaled = 100 + (weighted / 60) * 200
//! weighted  > 60:  scaled = 300 + ((weighted - 60) / 40) * 200
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::QuestionOutcome;
use crate::weights::AngoffWeightModel;

/// Lowest reportable scaled score.
pub const MIN_SCALED_SCORE: u16 = 100;
/// Highest reportable scaled score.
pub const MAX_SCALED_SCORE: u16 = 500;
/// Scaled score at or above which a candidate passes.
pub const PASS_SCALED_SCORE: u16 = 300;
/// Weighted percentage that maps onto [`PASS_SCALED_SCORE`].
pub const PASS_MARK_PCT: f64 = 60.0;

/// Unweighted percent-correct. An empty session scores 0.
pub fn raw_score_pct(outcomes: &[QuestionOutcome]) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    let correct = outcomes.iter().filter(|o| o.correct).count();
    100.0 * correct as f64 / outcomes.len() as f64
}

/// Angoff-weighted percent-correct. An empty session scores 0.
///
/// Equals [`raw_score_pct`] when every item carries the same weight.
pub fn weighted_pct(outcomes: &[QuestionOutcome], model: &AngoffWeightModel) -> f64 {
    let (earned, possible) = outcomes.iter().fold((0.0f64, 0.0f64), |(earned, possible), o| {
        let w = model.weight(o);
        (if o.correct { earned + w } else { earned }, possible + w)
    });
    if possible <= 0.0 {
        return 0.0;
    }
    (100.0 * earned / possible).clamp(0.0, 100.0)
}

/// Round a percentage to the one-decimal precision used in reports.
pub fn round_pct(pct: f64) -> f64 {
    (pct * 10.0).round() / 10.0
}

/// Map a weighted percentage onto the 100–500 scale.
pub fn scaled_score(weighted_pct: f64) -> u16 {
    if !weighted_pct.is_finite() {
        return MIN_SCALED_SCORE;
    }
    let pct = weighted_pct.clamp(0.0, 100.0);
    let scaled = if pct <= PASS_MARK_PCT {
        100.0 + (pct / PASS_MARK_PCT) * 200.0
    } else {
        300.0 + ((pct - PASS_MARK_PCT) / (100.0 - PASS_MARK_PCT)) * 200.0
    };
    (scaled.round() as u16).clamp(MIN_SCALED_SCORE, MAX_SCALED_SCORE)
}

/// Outcome of the pass/fail decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassStatus {
    Pass,
    Fail,
}

impl PassStatus {
    /// `Pass` iff `scaled_score >= 300`.
    pub fn from_scaled(scaled_score: u16) -> Self {
        if scaled_score >= PASS_SCALED_SCORE {
            PassStatus::Pass
        } else {
            PassStatus::Fail
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, PassStatus::Pass)
    }
}

impl fmt::Display for PassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassStatus::Pass => write!(f, "PASS"),
            PassStatus::Fail => write!(f, "FAIL"),
        }
    }
}
