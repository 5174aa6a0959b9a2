//! Error types for the passmark input boundary.
//!
//! Scoring itself never fails; these errors only surface while turning
//! external records into [`QuestionOutcome`](crate::model::QuestionOutcome)s.

use thiserror::Error;

/// A difficulty label that is not one of the four known tiers.
///
/// Returned by strict parsing (`str::parse::<DifficultyTier>()`). The lenient
/// [`DifficultyTier::normalize`](crate::model::DifficultyTier::normalize)
/// maps the same input to Intermediate instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty tier: {0}")]
pub struct TierParseError(pub String);

/// Fatal problems with a submitted session record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// An outcome was submitted without a usable question identifier.
    #[error("outcome #{index} has an empty question_id")]
    EmptyQuestionId { index: usize },

    /// The session header carries no identifier.
    #[error("session id must not be empty")]
    EmptySessionId,
}
