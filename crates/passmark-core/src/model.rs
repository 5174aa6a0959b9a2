//! Core data model types for passmark.
//!
//! These are the per-question outcome records submitted by the session
//! runner, plus the closed set of difficulty tiers they are graded against.
//! All defaulting and clamping of raw input happens here, once, at the
//! boundary; the scoring modules assume normalized values.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TierParseError;

/// Angoff score assumed when the question bank supplies none (neutral difficulty).
pub const DEFAULT_ANGOFF_SCORE: f64 = 50.0;

/// Fixed, ordered difficulty labels attached to every question.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Foundation,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl DifficultyTier {
    /// All tiers, easiest first.
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Foundation,
        DifficultyTier::Intermediate,
        DifficultyTier::Advanced,
        DifficultyTier::Expert,
    ];

    /// Lenient conversion used at the input boundary.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Anything unrecognized becomes [`DifficultyTier::Intermediate`] and is
    /// reported as a data-quality warning.
    pub fn normalize(raw: &str) -> Self {
        match raw.parse() {
            Ok(tier) => tier,
            Err(e) => {
                tracing::warn!("{e}; treating as intermediate");
                DifficultyTier::Intermediate
            }
        }
    }

    /// Lowercase identifier used in files and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Foundation => "foundation",
            DifficultyTier::Intermediate => "intermediate",
            DifficultyTier::Advanced => "advanced",
            DifficultyTier::Expert => "expert",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyTier::Foundation => write!(f, "Foundation"),
            DifficultyTier::Intermediate => write!(f, "Intermediate"),
            DifficultyTier::Advanced => write!(f, "Advanced"),
            DifficultyTier::Expert => write!(f, "Expert"),
        }
    }
}

impl FromStr for DifficultyTier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "foundation" => Ok(DifficultyTier::Foundation),
            "intermediate" => Ok(DifficultyTier::Intermediate),
            "advanced" => Ok(DifficultyTier::Advanced),
            "expert" => Ok(DifficultyTier::Expert),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for DifficultyTier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(DifficultyTier::normalize(&raw))
    }
}

/// Normalize a raw Angoff score from the question bank.
///
/// Missing and non-finite values become [`DEFAULT_ANGOFF_SCORE`]; everything
/// else is clamped to `[0, 100]`. Out-of-range and non-finite inputs are
/// logged as data-quality warnings.
pub fn normalize_angoff(raw: Option<f64>) -> f64 {
    match raw {
        None => DEFAULT_ANGOFF_SCORE,
        Some(v) if !v.is_finite() => {
            tracing::warn!("angoff_score {v} is not a number; using {DEFAULT_ANGOFF_SCORE}");
            DEFAULT_ANGOFF_SCORE
        }
        Some(v) if !(0.0..=100.0).contains(&v) => {
            let clamped = v.clamp(0.0, 100.0);
            tracing::warn!("angoff_score {v} outside [0, 100]; clamped to {clamped}");
            clamped
        }
        Some(v) => v,
    }
}

/// Silent variant of [`normalize_angoff`] for values already inside the engine.
pub(crate) fn clamp_angoff(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        DEFAULT_ANGOFF_SCORE
    }
}

fn deserialize_angoff<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(normalize_angoff(raw))
}

fn default_angoff() -> f64 {
    DEFAULT_ANGOFF_SCORE
}

/// The result of a single answered question, as reported by the session runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// Identifier, unique within a session.
    pub question_id: String,
    /// Whether the candidate answered correctly.
    pub correct: bool,
    /// Time spent on the question.
    #[serde(default)]
    pub time_spent_seconds: u32,
    /// Difficulty tier from the question bank.
    #[serde(default)]
    pub difficulty_tier: DifficultyTier,
    /// Expected percentage of minimally-competent candidates answering
    /// correctly. Always within `[0, 100]` once deserialized.
    #[serde(default = "default_angoff", deserialize_with = "deserialize_angoff")]
    pub angoff_score: f64,
    /// Optional subject area, used for topic breakdowns.
    #[serde(default)]
    pub topic: Option<String>,
    /// Kept for audit/explanation display only.
    #[serde(default)]
    pub user_answer: String,
    /// Kept for audit/explanation display only.
    #[serde(default)]
    pub correct_answer: String,
}

impl QuestionOutcome {
    pub fn new(question_id: impl Into<String>, correct: bool, tier: DifficultyTier) -> Self {
        Self {
            question_id: question_id.into(),
            correct,
            time_spent_seconds: 0,
            difficulty_tier: tier,
            angoff_score: DEFAULT_ANGOFF_SCORE,
            topic: None,
            user_answer: String::new(),
            correct_answer: String::new(),
        }
    }

    /// Set the Angoff score, normalizing it the same way file input is.
    pub fn with_angoff(mut self, angoff_score: f64) -> Self {
        self.angoff_score = normalize_angoff(Some(angoff_score));
        self
    }

    pub fn with_time(mut self, seconds: u32) -> Self {
        self.time_spent_seconds = seconds;
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_answers(
        mut self,
        user_answer: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        self.user_answer = user_answer.into();
        self.correct_answer = correct_answer.into();
        self
    }
}
