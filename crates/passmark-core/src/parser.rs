//! TOML session file parser.
//!
//! Loads finished practice sessions (one header plus a list of outcomes)
//! from files and directories, normalizes every outcome at the boundary,
//! and reports data-quality warnings.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::SessionError;
use crate::model::{normalize_angoff, DifficultyTier, QuestionOutcome};
use crate::report::SessionSummary;

/// A parsed session ready for scoring.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub candidate: Option<String>,
    pub outcomes: Vec<QuestionOutcome>,
    /// Problems found while normalizing the raw records.
    pub warnings: Vec<ValidationWarning>,
}

impl Session {
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id.clone(),
            candidate: self.candidate.clone(),
            question_count: self.outcomes.len(),
        }
    }
}

/// Intermediate TOML structure for parsing session files.
#[derive(Debug, Deserialize)]
struct TomlSessionFile {
    session: TomlSessionHeader,
    #[serde(default)]
    outcomes: Vec<TomlOutcome>,
}

#[derive(Debug, Deserialize)]
struct TomlSessionHeader {
    id: String,
    #[serde(default)]
    candidate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlOutcome {
    question_id: String,
    correct: bool,
    #[serde(default)]
    time_spent_seconds: u32,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    angoff_score: Option<f64>,
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    user_answer: String,
    #[serde(default)]
    correct_answer: String,
}

/// A warning from session validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn for_question(question_id: &str, message: String) -> Self {
        Self {
            question_id: Some(question_id.to_string()),
            message,
        }
    }
}

/// Parse a single TOML file into a `Session`.
pub fn parse_session(path: &Path) -> Result<Session> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session file: {}", path.display()))?;

    parse_session_str(&content, path)
}

/// Parse a TOML string into a `Session` (useful for testing).
pub fn parse_session_str(content: &str, source_path: &Path) -> Result<Session> {
    let parsed: TomlSessionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    if parsed.session.id.trim().is_empty() {
        return Err(SessionError::EmptySessionId)
            .with_context(|| format!("invalid session: {}", source_path.display()));
    }

    let mut warnings = Vec::new();
    let outcomes = parsed
        .outcomes
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let question_id = raw.question_id.trim().to_string();
            if question_id.is_empty() {
                return Err(SessionError::EmptyQuestionId { index })
                    .with_context(|| format!("invalid session: {}", source_path.display()));
            }

            let difficulty_tier = match raw.difficulty.as_deref() {
                None => {
                    warnings.push(ValidationWarning::for_question(
                        &question_id,
                        "no difficulty given; treated as intermediate".into(),
                    ));
                    DifficultyTier::Intermediate
                }
                Some(label) => {
                    if label.parse::<DifficultyTier>().is_err() {
                        warnings.push(ValidationWarning::for_question(
                            &question_id,
                            format!("unrecognized difficulty '{label}'; treated as intermediate"),
                        ));
                    }
                    DifficultyTier::normalize(label)
                }
            };

            match raw.angoff_score {
                Some(v) if !v.is_finite() || !(0.0..=100.0).contains(&v) => {
                    warnings.push(ValidationWarning::for_question(
                        &question_id,
                        format!("angoff_score {v} outside [0, 100]"),
                    ));
                }
                _ => {}
            }

            Ok(QuestionOutcome {
                question_id,
                correct: raw.correct,
                time_spent_seconds: raw.time_spent_seconds,
                difficulty_tier,
                angoff_score: normalize_angoff(raw.angoff_score),
                topic: raw.topic.filter(|t| !t.trim().is_empty()),
                user_answer: raw.user_answer,
                correct_answer: raw.correct_answer,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut session = Session {
        id: parsed.session.id,
        candidate: parsed.session.candidate,
        outcomes,
        warnings,
    };
    let structural = validate_session(&session);
    session.warnings.extend(structural);
    Ok(session)
}

/// Recursively load all `.toml` session files from a directory.
pub fn load_session_directory(dir: &Path) -> Result<Vec<Session>> {
    let mut sessions = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            sessions.extend(load_session_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_session(&path) {
                Ok(session) => sessions.push(session),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sessions)
}

/// Validate a session for structural issues.
pub fn validate_session(session: &Session) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if session.outcomes.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "session has no outcomes; it will score as a non-attempt".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = HashSet::new();
    for outcome in &session.outcomes {
        if !seen_ids.insert(outcome.question_id.as_str()) {
            warnings.push(ValidationWarning::for_question(
                &outcome.question_id,
                format!("duplicate question ID: {}", outcome.question_id),
            ));
        }
    }

    warnings
}
