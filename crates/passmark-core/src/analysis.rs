//! Diagnostic breakdown of a session by difficulty tier and topic.
//!
//! Produces sub-scores per tier and per topic, plus remediation guidance
//! for every tier that falls below the recommendation target. Output is
//! deterministic: ties are broken by tier order (or topic name), never by
//! map iteration order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{DifficultyTier, QuestionOutcome};

/// Default percentage below which a tier earns a recommendation.
pub const DEFAULT_RECOMMENDATION_TARGET_PCT: f64 = 70.0;

/// Correct/total counts for one group of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub correct: usize,
    pub total: usize,
    /// `100 * correct / total`; 0 when `total` is 0.
    pub percentage: f64,
    /// Mean time spent per question in this group.
    #[serde(default)]
    pub avg_time_seconds: f64,
}

impl SubScore {
    fn from_counts(correct: usize, total: usize, time_seconds: u64) -> Self {
        let (percentage, avg_time_seconds) = if total == 0 {
            (0.0, 0.0)
        } else {
            (
                100.0 * correct as f64 / total as f64,
                time_seconds as f64 / total as f64,
            )
        };
        Self {
            correct,
            total,
            percentage,
            avg_time_seconds,
        }
    }
}

/// Everything the analyzer derives from one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceBreakdown {
    /// Sub-scores for every tier that appears in the session.
    pub by_difficulty: BTreeMap<DifficultyTier, SubScore>,
    /// Sub-scores for every topic that appears in the session.
    pub by_topic: BTreeMap<String, SubScore>,
    /// Guidance for under-target tiers, worst first.
    pub recommendations: Vec<String>,
    /// Topics below target, worst first.
    pub weak_topics: Vec<String>,
}

#[derive(Default)]
struct Tally {
    correct: usize,
    total: usize,
    time_seconds: u64,
}

impl Tally {
    fn push(&mut self, outcome: &QuestionOutcome) {
        self.total += 1;
        if outcome.correct {
            self.correct += 1;
        }
        self.time_seconds += u64::from(outcome.time_spent_seconds);
    }

    fn finish(&self) -> SubScore {
        SubScore::from_counts(self.correct, self.total, self.time_seconds)
    }
}

/// Groups outcomes and emits recommendations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceAnalyzer {
    /// Tiers strictly below this percentage get a recommendation.
    pub target_pct: f64,
}

impl Default for PerformanceAnalyzer {
    fn default() -> Self {
        Self {
            target_pct: DEFAULT_RECOMMENDATION_TARGET_PCT,
        }
    }
}

impl PerformanceAnalyzer {
    pub fn new(target_pct: f64) -> Self {
        Self { target_pct }
    }

    pub fn analyze(&self, outcomes: &[QuestionOutcome]) -> PerformanceBreakdown {
        let mut tiers: BTreeMap<DifficultyTier, Tally> = BTreeMap::new();
        let mut topics: BTreeMap<String, Tally> = BTreeMap::new();

        for outcome in outcomes {
            tiers.entry(outcome.difficulty_tier).or_default().push(outcome);
            if let Some(topic) = outcome.topic.as_deref().map(str::trim) {
                if !topic.is_empty() {
                    topics.entry(topic.to_string()).or_default().push(outcome);
                }
            }
        }

        let by_difficulty: BTreeMap<DifficultyTier, SubScore> = tiers
            .iter()
            .map(|(tier, tally)| (*tier, tally.finish()))
            .collect();
        let by_topic: BTreeMap<String, SubScore> = topics
            .iter()
            .map(|(topic, tally)| (topic.clone(), tally.finish()))
            .collect();

        let recommendations = self
            .below_target(&by_difficulty)
            .into_iter()
            .map(|(tier, score)| recommendation_for(*tier, score, self.target_pct))
            .collect();
        let weak_topics = self
            .below_target(&by_topic)
            .into_iter()
            .map(|(topic, _)| topic.clone())
            .collect();

        PerformanceBreakdown {
            by_difficulty,
            by_topic,
            recommendations,
            weak_topics,
        }
    }

    /// Groups under the target, worst percentage first. Empty groups are skipped.
    fn below_target<'a, K: Ord>(
        &self,
        groups: &'a BTreeMap<K, SubScore>,
    ) -> Vec<(&'a K, &'a SubScore)> {
        let mut weak: Vec<(&K, &SubScore)> = groups
            .iter()
            .filter(|(_, s)| s.total > 0 && s.percentage < self.target_pct)
            .collect();
        weak.sort_by(|(ka, a), (kb, b)| {
            a.percentage
                .partial_cmp(&b.percentage)
                .unwrap_or(Ordering::Equal)
                .then_with(|| ka.cmp(kb))
        });
        weak
    }
}

fn recommendation_for(tier: DifficultyTier, score: &SubScore, target_pct: f64) -> String {
    let advice = match tier {
        DifficultyTier::Foundation => {
            "Rebuild the core concepts with focused review before moving on to harder material."
        }
        DifficultyTier::Intermediate => {
            "Practice applying concepts to standard scenarios until the reasoning is automatic."
        }
        DifficultyTier::Advanced => {
            "Work through multi-step Advanced questions and review the explanation for every miss."
        }
        DifficultyTier::Expert => {
            "Study complex case analyses and edge cases; revisit Expert items in timed sets."
        }
    };
    format!(
        "{tier}: {:.1}% correct ({}/{}) is below the {:.0}% target. {advice}",
        score.percentage, score.correct, score.total, target_pct
    )
}
