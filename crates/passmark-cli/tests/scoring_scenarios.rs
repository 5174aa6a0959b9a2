//! Library-level scoring scenarios.
//!
//! Exercises the full pipeline (parse → score → ledger) against the
//! session fixtures in `sessions/` and checks the properties every
//! report must satisfy.

use std::path::Path;

use chrono::{TimeZone, Utc};
use passmark_core::ledger::MissedItemLedger;
use passmark_core::model::{DifficultyTier, QuestionOutcome};
use passmark_core::parser::parse_session;
use passmark_core::scoring::{scaled_score, PassStatus};
use passmark_core::score;

fn fixture(name: &str) -> Vec<QuestionOutcome> {
    let path = Path::new("../../sessions").join(name);
    parse_session(&path).unwrap().outcomes
}

/// Deterministic mixed session: tiers, angoff scores and correctness vary.
fn mixed_session(n: usize, seed: usize) -> Vec<QuestionOutcome> {
    (0..n)
        .map(|i| {
            let x = (i * 7919 + seed * 104_729) % 1000;
            QuestionOutcome::new(
                format!("q{i}"),
                x % 3 == 0,
                DifficultyTier::ALL[x % 4],
            )
            .with_angoff((x % 101) as f64)
        })
        .collect()
}

#[test]
fn scenario_a_easy_right_hard_wrong_fails() {
    let report = score(&fixture("scenario-a.toml"));
    assert_eq!(report.raw_score_pct, 50.0);
    assert_eq!(report.weighted_pct, 37.9);
    assert_eq!(report.scaled_score, 226);
    assert_eq!(report.pass_status, PassStatus::Fail);
}

#[test]
fn scenario_b_hard_right_easy_wrong_passes() {
    let report = score(&fixture("scenario-b.toml"));
    assert_eq!(report.raw_score_pct, 50.0);
    assert_eq!(report.weighted_pct, 62.1);
    assert_eq!(report.scaled_score, 311);
    assert_eq!(report.pass_status, PassStatus::Pass);
}

#[test]
fn scenario_c_recommends_only_the_weak_tier() {
    let report = score(&fixture("scenario-c.toml"));
    assert_eq!(report.total_questions, 50);
    assert_eq!(report.raw_score_pct, 66.0);

    assert_eq!(report.by_difficulty[&DifficultyTier::Foundation].percentage, 100.0);
    assert_eq!(report.by_difficulty[&DifficultyTier::Intermediate].percentage, 100.0);
    assert_eq!(report.by_difficulty[&DifficultyTier::Advanced].correct, 0);

    assert_eq!(report.recommendations.len(), 1);
    assert!(report.recommendations[0].starts_with("Advanced"));
    assert!(report
        .recommendations
        .iter()
        .all(|r| !r.contains("Foundation") && !r.contains("Intermediate")));
    assert_eq!(report.weak_topics, vec!["case-studies".to_string()]);

    // Wildly uneven tiers make the verdict unreliable even at full sample size.
    assert!(report.confidence_pct < 10, "got {}", report.confidence_pct);
}

#[test]
fn empty_session_is_a_non_attempt() {
    let report = score(&[]);
    assert_eq!(report.raw_score_pct, 0.0);
    assert_eq!(report.weighted_pct, 0.0);
    assert_eq!(report.scaled_score, 100);
    assert_eq!(report.pass_status, PassStatus::Fail);
    assert_eq!(report.confidence_pct, 0);
    assert!(report.by_difficulty.is_empty());
    assert!(report.recommendations.is_empty());
}

#[test]
fn all_correct_and_all_wrong() {
    let mut outcomes = mixed_session(40, 3);
    for o in &mut outcomes {
        o.correct = true;
    }
    let report = score(&outcomes);
    assert_eq!(report.raw_score_pct, 100.0);
    assert_eq!(report.scaled_score, 500);

    for o in &mut outcomes {
        o.correct = false;
    }
    let report = score(&outcomes);
    assert_eq!(report.raw_score_pct, 0.0);
    assert_eq!(report.scaled_score, 100);
}

#[test]
fn flipping_a_miss_never_lowers_the_score() {
    for seed in 0..5 {
        let base = mixed_session(60, seed);
        let before = score(&base);
        for i in (0..base.len()).filter(|&i| !base[i].correct) {
            let mut flipped = base.clone();
            flipped[i].correct = true;
            let after = score(&flipped);
            assert!(after.weighted_pct >= before.weighted_pct, "seed {seed}, item {i}");
            assert!(after.scaled_score >= before.scaled_score, "seed {seed}, item {i}");
        }
    }
}

/// Confidence follows the tier-spread formula, so improving the strongest
/// tier widens the spread and can lower it even as the score rises.
#[test]
fn confidence_can_drop_when_the_strongest_tier_improves() {
    let session = |foundation_correct: usize| -> Vec<QuestionOutcome> {
        let foundation = (0..25).map(|i| {
            QuestionOutcome::new(
                format!("f{i}"),
                i < foundation_correct,
                DifficultyTier::Foundation,
            )
        });
        let advanced = (0..25)
            .map(|i| QuestionOutcome::new(format!("a{i}"), i < 12, DifficultyTier::Advanced));
        foundation.chain(advanced).collect()
    };

    let before = score(&session(22));
    let after = score(&session(23));

    // Tier accuracies 88/48 (spread 20) versus 92/48 (spread 22).
    assert_eq!(before.confidence_pct, 60);
    assert_eq!(after.confidence_pct, 56);
    assert!(after.weighted_pct >= before.weighted_pct);
    assert!(after.scaled_score >= before.scaled_score);
}

#[test]
fn pass_iff_scaled_at_least_300() {
    for seed in 0..20 {
        let report = score(&mixed_session(25 + seed, seed));
        assert_eq!(report.pass_status.is_pass(), report.scaled_score >= 300);
    }
    assert_eq!(scaled_score(60.0), 300);
    assert_eq!(PassStatus::from_scaled(scaled_score(60.0)), PassStatus::Pass);
}

#[test]
fn weighted_pct_exactly_60_passes() {
    // Uniform angoff: weighted equals raw, 3 of 5 correct = 60%.
    let outcomes: Vec<_> = (0..5)
        .map(|i| QuestionOutcome::new(format!("q{i}"), i < 3, DifficultyTier::Intermediate))
        .collect();
    let report = score(&outcomes);
    assert_eq!(report.weighted_pct, 60.0);
    assert_eq!(report.scaled_score, 300);
    assert_eq!(report.pass_status, PassStatus::Pass);
}

#[test]
fn harder_skew_scores_at_least_as_high() {
    let item = |id: &str, correct: bool, tier: DifficultyTier, angoff: f64| {
        QuestionOutcome::new(id, correct, tier).with_angoff(angoff)
    };
    let hard_skewed = vec![
        item("f1", false, DifficultyTier::Foundation, 90.0),
        item("f2", false, DifficultyTier::Foundation, 85.0),
        item("a1", true, DifficultyTier::Advanced, 30.0),
        item("e1", true, DifficultyTier::Expert, 10.0),
    ];
    let easy_skewed = vec![
        item("f1", true, DifficultyTier::Foundation, 90.0),
        item("f2", true, DifficultyTier::Foundation, 85.0),
        item("a1", false, DifficultyTier::Advanced, 30.0),
        item("e1", false, DifficultyTier::Expert, 10.0),
    ];
    let hard = score(&hard_skewed);
    let easy = score(&easy_skewed);
    assert_eq!(hard.raw_score_pct, easy.raw_score_pct);
    assert!(hard.weighted_pct >= easy.weighted_pct);
    assert!(hard.scaled_score >= easy.scaled_score);
}

#[test]
fn ledger_tracks_sessions_and_keeps_history() {
    let t1 = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2026, 10, 2, 9, 0, 0).unwrap();

    let mut ledger = MissedItemLedger::new("cand-a");
    ledger.record_session_at(&fixture("scenario-a.toml"), t1);
    let due: Vec<_> = ledger
        .get_wrong_questions()
        .iter()
        .map(|e| e.question_id.clone())
        .collect();
    assert_eq!(due, vec!["adv-01"]);

    // Next session: the hard item is answered correctly, the easy one missed.
    ledger.record_session_at(&fixture("scenario-b.toml"), t2);
    let due: Vec<_> = ledger
        .get_wrong_questions()
        .iter()
        .map(|e| e.question_id.clone())
        .collect();
    assert_eq!(due, vec!["found-01"]);

    let resolved = ledger.get("adv-01").unwrap();
    assert!(resolved.last_attempt_correct);
    assert_eq!(resolved.attempts, 1);
    assert_eq!(resolved.timestamp, t2);
}
