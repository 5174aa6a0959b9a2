//! passmark-core — Angoff-weighted scoring engine and missed-item ledger.
//!
//! This crate defines the outcome data model, the scoring pipeline
//! (weights, raw/scaled scores, pass/fail, confidence, diagnostics) and
//! the per-candidate ledger of missed questions used for review queues.

pub mod analysis;
pub mod confidence;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod weights;

pub use engine::{score, ScoringEngine};
pub use ledger::MissedItemLedger;
pub use model::{DifficultyTier, QuestionOutcome};
pub use report::ScoreReport;
