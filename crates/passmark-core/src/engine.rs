//! Scoring entry point.
//!
//! Runs the full pipeline over one finished session: raw and weighted
//! percentages, scaled score, pass/fail, the diagnostic breakdown and the
//! confidence estimate. Everything here is pure; the same outcomes always
//! produce the same report.

use crate::analysis::{PerformanceAnalyzer, PerformanceBreakdown};
use crate::config::ScoringConfig;
use crate::confidence::ConfidenceEstimator;
use crate::model::QuestionOutcome;
use crate::report::ScoreReport;
use crate::scoring::{self, PassStatus};
use crate::weights::AngoffWeightModel;

/// Score a session with the default policy.
pub fn score(outcomes: &[QuestionOutcome]) -> ScoreReport {
    ScoringEngine::default().score(outcomes)
}

/// The scoring pipeline, parameterized by a [`ScoringConfig`].
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: AngoffWeightModel,
    analyzer: PerformanceAnalyzer,
    confidence: ConfidenceEstimator,
}

impl ScoringEngine {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            weights: config.weight_model(),
            analyzer: config.analyzer(),
            confidence: config.confidence_estimator(),
        }
    }

    /// Produce the score report for a finished session.
    ///
    /// An empty session is a non-attempt and yields [`ScoreReport::empty`].
    pub fn score(&self, outcomes: &[QuestionOutcome]) -> ScoreReport {
        if outcomes.is_empty() {
            tracing::debug!("empty session; returning degenerate report");
            return ScoreReport::empty();
        }

        let raw_score_pct = scoring::round_pct(scoring::raw_score_pct(outcomes));
        // The scaled score is derived from the reported (rounded) weighted
        // percentage so the two always agree.
        let weighted_pct = scoring::round_pct(scoring::weighted_pct(outcomes, &self.weights));
        let scaled_score = scoring::scaled_score(weighted_pct);
        let pass_status = PassStatus::from_scaled(scaled_score);

        let PerformanceBreakdown {
            by_difficulty,
            by_topic,
            recommendations,
            weak_topics,
        } = self.analyzer.analyze(outcomes);
        let confidence_pct = self.confidence.estimate(outcomes.len(), &by_difficulty);

        let total_time_seconds = outcomes
            .iter()
            .map(|o| u64::from(o.time_spent_seconds))
            .sum();

        tracing::debug!(
            questions = outcomes.len(),
            raw_score_pct,
            weighted_pct,
            scaled_score,
            confidence_pct,
            "scored session: {pass_status}"
        );

        ScoreReport {
            raw_score_pct,
            weighted_pct,
            scaled_score,
            pass_status,
            confidence_pct,
            total_questions: outcomes.len(),
            total_time_seconds,
            by_difficulty,
            by_topic,
            recommendations,
            weak_topics,
        }
    }
}
