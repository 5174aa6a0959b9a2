//! Missed-item ledger for spaced-repetition review.
//!
//! Tracks every question a candidate has answered incorrectly, how many
//! times they have missed it, and whether their latest attempt was correct.
//! Entries are never deleted: answering correctly in a later session only
//! flips `last_attempt_correct`, which removes the item from review queues
//! while keeping its history.
//!
//! # Concurrency
//!
//! A ledger belongs to one candidate and all mutations take `&mut self`.
//! When several sessions for the same candidate may finish concurrently
//! (for example two processes sharing one ledger file), callers must
//! serialize the load/mutate/save cycle per candidate themselves.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::QuestionOutcome;

/// One row of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongQuestionEntry {
    pub question_id: String,
    /// Answer given on the most recent miss.
    pub user_answer: String,
    pub correct_answer: String,
    /// Time of the most recent update.
    pub timestamp: DateTime<Utc>,
    /// Number of incorrect attempts; always at least 1.
    pub attempts: u32,
    pub last_attempt_correct: bool,
}

impl WrongQuestionEntry {
    /// Still part of the active review queue.
    pub fn is_active(&self) -> bool {
        !self.last_attempt_correct
    }
}

/// Counts over a ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Every entry ever recorded.
    pub total: usize,
    /// Entries still awaiting a correct answer.
    pub active: usize,
    /// Entries answered correctly since the last miss.
    pub resolved: usize,
    /// Active entries missed more than once.
    pub chronic: usize,
}

/// Per-candidate store of incorrectly answered questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissedItemLedger {
    /// Candidate this ledger belongs to.
    #[serde(default)]
    pub candidate_id: String,
    #[serde(default)]
    entries: HashMap<String, WrongQuestionEntry>,
}

impl MissedItemLedger {
    pub fn new(candidate_id: impl Into<String>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            entries: HashMap::new(),
        }
    }

    /// Record an incorrect answer now.
    pub fn add_wrong(&mut self, question_id: &str, user_answer: &str, correct_answer: &str) {
        self.add_wrong_at(question_id, user_answer, correct_answer, Utc::now());
    }

    /// Record an incorrect answer at an explicit time.
    ///
    /// Creates the entry on the first miss. Later misses bump `attempts`,
    /// replace the stored answer and timestamp, and put the entry back into
    /// the active queue.
    pub fn add_wrong_at(
        &mut self,
        question_id: &str,
        user_answer: &str,
        correct_answer: &str,
        timestamp: DateTime<Utc>,
    ) {
        match self.entries.get_mut(question_id) {
            Some(entry) => {
                entry.attempts = entry.attempts.saturating_add(1);
                entry.user_answer = user_answer.to_string();
                entry.timestamp = timestamp;
                entry.last_attempt_correct = false;
                if !correct_answer.is_empty() {
                    entry.correct_answer = correct_answer.to_string();
                }
                tracing::debug!(
                    candidate = %self.candidate_id,
                    question_id,
                    attempts = entry.attempts,
                    "missed again"
                );
            }
            None => {
                self.entries.insert(
                    question_id.to_string(),
                    WrongQuestionEntry {
                        question_id: question_id.to_string(),
                        user_answer: user_answer.to_string(),
                        correct_answer: correct_answer.to_string(),
                        timestamp,
                        attempts: 1,
                        last_attempt_correct: false,
                    },
                );
                tracing::debug!(candidate = %self.candidate_id, question_id, "first miss");
            }
        }
    }

    /// Record a correct answer now.
    pub fn mark_correct(&mut self, question_id: &str) {
        self.mark_correct_at(question_id, Utc::now());
    }

    /// Record a correct answer at an explicit time. No-op for unknown questions.
    pub fn mark_correct_at(&mut self, question_id: &str, timestamp: DateTime<Utc>) {
        if let Some(entry) = self.entries.get_mut(question_id) {
            entry.last_attempt_correct = true;
            entry.timestamp = timestamp;
            tracing::debug!(candidate = %self.candidate_id, question_id, "resolved");
        }
    }

    /// Feed a finished session into the ledger: misses are added, correct
    /// answers resolve existing entries.
    pub fn record_session(&mut self, outcomes: &[QuestionOutcome]) {
        self.record_session_at(outcomes, Utc::now());
    }

    pub fn record_session_at(&mut self, outcomes: &[QuestionOutcome], timestamp: DateTime<Utc>) {
        for outcome in outcomes {
            if outcome.correct {
                self.mark_correct_at(&outcome.question_id, timestamp);
            } else {
                self.add_wrong_at(
                    &outcome.question_id,
                    &outcome.user_answer,
                    &outcome.correct_answer,
                    timestamp,
                );
            }
        }
    }

    /// Active entries, most recently missed first.
    pub fn get_wrong_questions(&self) -> Vec<&WrongQuestionEntry> {
        self.active_sorted(|_| true)
    }

    /// Active entries missed at least `min_attempts` times, most recent first.
    pub fn get_by_min_attempts(&self, min_attempts: u32) -> Vec<&WrongQuestionEntry> {
        self.active_sorted(|e| e.attempts >= min_attempts)
    }

    /// Look up one entry, active or resolved.
    pub fn get(&self, question_id: &str) -> Option<&WrongQuestionEntry> {
        self.entries.get(question_id)
    }

    /// Every entry including resolved ones, ordered by question id.
    pub fn entries(&self) -> Vec<&WrongQuestionEntry> {
        let mut all: Vec<_> = self.entries.values().collect();
        all.sort_by(|a, b| a.question_id.cmp(&b.question_id));
        all
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> LedgerStats {
        self.entries
            .values()
            .fold(LedgerStats::default(), |mut stats, entry| {
                stats.total += 1;
                if entry.is_active() {
                    stats.active += 1;
                    if entry.attempts > 1 {
                        stats.chronic += 1;
                    }
                } else {
                    stats.resolved += 1;
                }
                stats
            })
    }

    fn active_sorted<F>(&self, keep: F) -> Vec<&WrongQuestionEntry>
    where
        F: Fn(&WrongQuestionEntry) -> bool,
    {
        let mut active: Vec<_> = self
            .entries
            .values()
            .filter(|e| e.is_active() && keep(e))
            .collect();
        active.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.question_id.cmp(&b.question_id))
        });
        active
    }

    /// Save the ledger as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize ledger")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write ledger to {}", path.display()))?;
        Ok(())
    }

    /// Load a ledger from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ledger from {}", path.display()))?;
        let ledger: MissedItemLedger =
            serde_json::from_str(&content).context("failed to parse ledger JSON")?;
        Ok(ledger)
    }

    /// Load a ledger if the file exists, otherwise start an empty one.
    pub fn load_or_new(path: &Path, candidate_id: &str) -> Result<Self> {
        if path.exists() {
            Self::load_json(path)
        } else {
            Ok(Self::new(candidate_id))
        }
    }
}
