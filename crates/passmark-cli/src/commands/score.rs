//! The `passmark score` command.

use std::path::PathBuf;

use anyhow::Result;

use passmark_core::config::load_config_from;
use passmark_core::ledger::MissedItemLedger;
use passmark_core::parser;
use passmark_core::report::{ScoreReport, SessionReport};
use passmark_core::ScoringEngine;
use passmark_report::html::write_html_report;

pub fn execute(
    session_path: PathBuf,
    ledger_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: String,
    output: PathBuf,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let session = parser::parse_session(&session_path)?;

    for w in &session.warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("[{id}] "))
            .unwrap_or_default();
        eprintln!("WARNING: {prefix}{}", w.message);
    }

    let engine = ScoringEngine::new(&config);
    let score = engine.score(&session.outcomes);
    tracing::info!(
        session = %session.id,
        scaled_score = score.scaled_score,
        "session scored: {}",
        score.pass_status
    );
    let report = SessionReport::new(session.summary(), score);

    let formats: Vec<&str> = if format == "all" {
        vec!["text", "json", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
    let stem = file_stem(&report.session.id);

    for fmt in &formats {
        match *fmt {
            "text" => print_summary(&report),
            "markdown" | "md" => println!("{}", report.score.to_markdown()),
            "json" => {
                let path = output.join(format!("{stem}-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("{stem}-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    if let Some(ledger_path) = ledger_path {
        let candidate = session.candidate.as_deref().unwrap_or("anonymous");
        let mut ledger = MissedItemLedger::load_or_new(&ledger_path, candidate)?;
        if !ledger.candidate_id.is_empty() && ledger.candidate_id != candidate {
            anyhow::bail!(
                "ledger {} belongs to candidate '{}', not '{}'",
                ledger_path.display(),
                ledger.candidate_id,
                candidate
            );
        }
        ledger.record_session(&session.outcomes);
        ledger.save_json(&ledger_path)?;

        let stats = ledger.stats();
        println!(
            "Ledger: {} question(s) to review ({} chronic, {} resolved)",
            stats.active, stats.chronic, stats.resolved
        );
    }

    Ok(())
}

/// File-name-safe version of a session id.
fn file_stem(session_id: &str) -> String {
    let cleaned: String = session_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("score-{cleaned}")
}

fn print_summary(report: &SessionReport) {
    use comfy_table::{Cell, Table};

    let score: &ScoreReport = &report.score;

    if score.is_degenerate() {
        println!(
            "Session {}: no questions answered, scored as a non-attempt ({} {})",
            report.session.id, score.pass_status, score.scaled_score
        );
        return;
    }

    println!(
        "Session {}: {} — scaled score {} (confidence {}%)",
        report.session.id, score.pass_status, score.scaled_score, score.confidence_pct
    );
    println!(
        "Raw {:.1}% | Weighted {:.1}% | {} questions",
        score.raw_score_pct, score.weighted_pct, score.total_questions
    );

    let mut table = Table::new();
    table.set_header(vec!["Tier", "Correct", "Total", "Accuracy", "Avg Time"]);
    for (tier, s) in &score.by_difficulty {
        table.add_row(vec![
            Cell::new(tier),
            Cell::new(s.correct),
            Cell::new(s.total),
            Cell::new(format!("{:.1}%", s.percentage)),
            Cell::new(format!("{:.0}s", s.avg_time_seconds)),
        ]);
    }
    println!("\n{table}");

    if !score.recommendations.is_empty() {
        println!("\nRecommendations:");
        for r in &score.recommendations {
            println!("  - {r}");
        }
    }
    if !score.weak_topics.is_empty() {
        println!("\nTopics to revisit: {}", score.weak_topics.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_is_path_safe() {
        assert_eq!(file_stem("mock exam/1"), "score-mock_exam_1");
        assert_eq!(file_stem("2026-10-19_am"), "score-2026-10-19_am");
    }
}
