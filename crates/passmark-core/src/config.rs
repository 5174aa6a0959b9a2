//! Scoring policy configuration.
//!
//! The pass mark (60% weighted, scaled 300) and the 100–500 scale are fixed;
//! everything else a scoring policy may tune lives here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::{PerformanceAnalyzer, DEFAULT_RECOMMENDATION_TARGET_PCT};
use crate::confidence::{
    ConfidenceEstimator, DEFAULT_CONFIDENCE_SATURATION, DEFAULT_CONSISTENCY_SPREAD_PCT,
};
use crate::weights::{AngoffWeightModel, DEFAULT_ANGOFF_K};

/// Tunable constants of the scoring pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Angoff amplification constant `k`. 0 disables difficulty weighting.
    #[serde(default = "default_angoff_k")]
    pub angoff_k: f64,
    /// Tiers below this percentage receive a recommendation.
    #[serde(default = "default_target_pct")]
    pub recommendation_target_pct: f64,
    /// Session length at which sample size stops limiting confidence.
    #[serde(default = "default_saturation")]
    pub confidence_saturation: usize,
    /// Tier-accuracy spread (percentage points) that drives confidence to 0.
    #[serde(default = "default_spread")]
    pub consistency_spread_pct: f64,
}

fn default_angoff_k() -> f64 {
    DEFAULT_ANGOFF_K
}
fn default_target_pct() -> f64 {
    DEFAULT_RECOMMENDATION_TARGET_PCT
}
fn default_saturation() -> usize {
    DEFAULT_CONFIDENCE_SATURATION
}
fn default_spread() -> f64 {
    DEFAULT_CONSISTENCY_SPREAD_PCT
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            angoff_k: default_angoff_k(),
            recommendation_target_pct: default_target_pct(),
            confidence_saturation: default_saturation(),
            consistency_spread_pct: default_spread(),
        }
    }
}

impl ScoringConfig {
    /// Reject values that would make the pipeline meaningless.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.angoff_k.is_finite() && self.angoff_k >= 0.0,
            "angoff_k must be a non-negative number, got {}",
            self.angoff_k
        );
        anyhow::ensure!(
            (0.0..=100.0).contains(&self.recommendation_target_pct),
            "recommendation_target_pct must be between 0 and 100, got {}",
            self.recommendation_target_pct
        );
        anyhow::ensure!(
            self.confidence_saturation >= 1,
            "confidence_saturation must be at least 1"
        );
        anyhow::ensure!(
            self.consistency_spread_pct.is_finite() && self.consistency_spread_pct > 0.0,
            "consistency_spread_pct must be positive, got {}",
            self.consistency_spread_pct
        );
        Ok(())
    }

    pub fn weight_model(&self) -> AngoffWeightModel {
        AngoffWeightModel::new(self.angoff_k)
    }

    pub fn analyzer(&self) -> PerformanceAnalyzer {
        PerformanceAnalyzer::new(self.recommendation_target_pct)
    }

    pub fn confidence_estimator(&self) -> ConfidenceEstimator {
        ConfidenceEstimator::new(self.confidence_saturation, self.consistency_spread_pct)
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order when no path is given:
/// 1. `passmark.toml` in the current directory
/// 2. `~/.config/passmark/config.toml`
///
/// Environment variable overrides: `PASSMARK_ANGOFF_K`, `PASSMARK_TARGET_PCT`.
pub fn load_config_from(path: Option<&Path>) -> Result<ScoringConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("passmark.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => ScoringConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Parse a TOML string into a config without validating it.
pub fn parse_config_str(content: &str) -> Result<ScoringConfig> {
    Ok(toml::from_str::<ScoringConfig>(content)?)
}

fn apply_env_overrides(config: &mut ScoringConfig) -> Result<()> {
    if let Ok(k) = std::env::var("PASSMARK_ANGOFF_K") {
        config.angoff_k = k
            .trim()
            .parse()
            .with_context(|| format!("invalid PASSMARK_ANGOFF_K: '{k}'"))?;
    }
    if let Ok(target) = std::env::var("PASSMARK_TARGET_PCT") {
        config.recommendation_target_pct = target
            .trim()
            .parse()
            .with_context(|| format!("invalid PASSMARK_TARGET_PCT: '{target}'"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("passmark"))
}
