//! Score report types with JSON persistence and markdown rendering.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::SubScore;
use crate::model::DifficultyTier;
use crate::scoring::{PassStatus, MIN_SCALED_SCORE};

/// The scoring engine's verdict on one session. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Unweighted percent-correct, one decimal.
    pub raw_score_pct: f64,
    /// Angoff-weighted percent-correct, one decimal.
    pub weighted_pct: f64,
    /// Scaled score in `[100, 500]`.
    pub scaled_score: u16,
    pub pass_status: PassStatus,
    /// Reliability of `pass_status`, `[0, 100]`.
    pub confidence_pct: u8,
    /// Number of outcomes scored.
    #[serde(default)]
    pub total_questions: usize,
    /// Sum of time spent across all outcomes.
    #[serde(default)]
    pub total_time_seconds: u64,
    pub by_difficulty: BTreeMap<DifficultyTier, SubScore>,
    #[serde(default)]
    pub by_topic: BTreeMap<String, SubScore>,
    /// Remediation guidance, worst tier first. Empty when every tier is on target.
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub weak_topics: Vec<String>,
}

impl ScoreReport {
    /// The degenerate report for a session with no answered questions.
    pub fn empty() -> Self {
        Self {
            raw_score_pct: 0.0,
            weighted_pct: 0.0,
            scaled_score: MIN_SCALED_SCORE,
            pass_status: PassStatus::Fail,
            confidence_pct: 0,
            total_questions: 0,
            total_time_seconds: 0,
            by_difficulty: BTreeMap::new(),
            by_topic: BTreeMap::new(),
            recommendations: Vec::new(),
            weak_topics: Vec::new(),
        }
    }

    /// True when no questions were scored.
    pub fn is_degenerate(&self) -> bool {
        self.total_questions == 0
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Result:** {} with a scaled score of {} (confidence {}%)\n\n",
            self.pass_status, self.scaled_score, self.confidence_pct
        ));
        md.push_str(&format!(
            "Raw score {:.1}%, weighted score {:.1}% across {} questions\n\n",
            self.raw_score_pct, self.weighted_pct, self.total_questions
        ));

        if !self.by_difficulty.is_empty() {
            md.push_str("### By difficulty\n\n");
            md.push_str("| Tier | Correct | Total | Accuracy | Avg time |\n");
            md.push_str("|------|---------|-------|----------|----------|\n");
            for (tier, s) in &self.by_difficulty {
                md.push_str(&format!(
                    "| {} | {} | {} | {:.1}% | {:.0}s |\n",
                    tier, s.correct, s.total, s.percentage, s.avg_time_seconds
                ));
            }
            md.push('\n');
        }

        if !self.by_topic.is_empty() {
            md.push_str("### By topic\n\n");
            md.push_str("| Topic | Correct | Total | Accuracy |\n");
            md.push_str("|-------|---------|-------|----------|\n");
            for (topic, s) in &self.by_topic {
                md.push_str(&format!(
                    "| {} | {} | {} | {:.1}% |\n",
                    topic, s.correct, s.total, s.percentage
                ));
            }
            md.push('\n');
        }

        if !self.recommendations.is_empty() {
            md.push_str("### Recommendations\n\n");
            for r in &self.recommendations {
                md.push_str(&format!("- {r}\n"));
            }
        }

        md
    }
}

/// Identifying details of the scored session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    #[serde(default)]
    pub candidate: Option<String>,
    pub question_count: usize,
}

/// A score report stamped with identity and time, as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub session: SessionSummary,
    pub score: ScoreReport,
}

impl SessionReport {
    pub fn new(session: SessionSummary, score: ScoreReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            session,
            score,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ScoreReport {
        let mut by_difficulty = BTreeMap::new();
        by_difficulty.insert(
            DifficultyTier::Foundation,
            SubScore {
                correct: 4,
                total: 5,
                percentage: 80.0,
                avg_time_seconds: 42.0,
            },
        );
        by_difficulty.insert(
            DifficultyTier::Expert,
            SubScore {
                correct: 1,
                total: 5,
                percentage: 20.0,
                avg_time_seconds: 95.0,
            },
        );
        ScoreReport {
            raw_score_pct: 50.0,
            weighted_pct: 54.5,
            scaled_score: 282,
            pass_status: PassStatus::Fail,
            confidence_pct: 8,
            total_questions: 10,
            total_time_seconds: 685,
            by_difficulty,
            by_topic: BTreeMap::new(),
            recommendations: vec!["Expert: 20.0% correct (1/5) is below the 70% target.".into()],
            weak_topics: vec![],
        }
    }

    #[test]
    fn empty_report_is_degenerate_fail() {
        let report = ScoreReport::empty();
        assert!(report.is_degenerate());
        assert_eq!(report.scaled_score, 100);
        assert_eq!(report.pass_status, PassStatus::Fail);
        assert!(report.by_difficulty.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn json_uses_lowercase_tiers() {
        let json = serde_json::to_string(&sample_report()).unwrap();
        assert!(json.contains("\"foundation\""));
        assert!(json.contains("\"pass_status\":\"fail\""));
    }

    #[test]
    fn json_roundtrip() {
        let report = SessionReport::new(
            SessionSummary {
                id: "s1".into(),
                candidate: Some("cand-1".into()),
                question_count: 10,
            },
            sample_report(),
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = SessionReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.session.id, "s1");
        assert_eq!(loaded.score, report.score);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = SessionReport::load_json(Path::new("/no/such/report.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read report"));
    }

    #[test]
    fn markdown_output() {
        let md = sample_report().to_markdown();
        assert!(md.contains("FAIL"));
        assert!(md.contains("| Expert | 1 | 5 | 20.0% | 95s |"));
        assert!(md.contains("### Recommendations"));
        assert!(!md.contains("By topic"));
    }
}
