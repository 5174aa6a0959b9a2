//! The `passmark validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use passmark_core::config::load_config_from;
use passmark_core::parser::{self, Session};
use passmark_core::weights::AngoffWeightModel;
use passmark_core::DifficultyTier;

pub fn execute(session_path: PathBuf) -> Result<()> {
    let weights = load_config_from(None)?.weight_model();
    let sessions = if session_path.is_dir() {
        parser::load_session_directory(&session_path)?
    } else {
        vec![parser::parse_session(&session_path)?]
    };

    let mut total_warnings = 0;

    for session in &sessions {
        println!(
            "Session: {} ({} outcomes)",
            session.id,
            session.outcomes.len()
        );

        if !session.outcomes.is_empty() {
            println!("{}", tier_composition(session, &weights));
        }

        for w in &session.warnings {
            match &w.question_id {
                Some(id) => println!("  [{id}] WARNING: {}", w.message),
                None => println!("  WARNING: {}", w.message),
            }
        }
        total_warnings += session.warnings.len();
    }

    if total_warnings == 0 {
        println!("All sessions valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

/// How the session's items and scoring weight spread across the tiers.
fn tier_composition(session: &Session, weights: &AngoffWeightModel) -> Table {
    let total_weight: f64 = session.outcomes.iter().map(|o| weights.weight(o)).sum();

    let mut table = Table::new();
    table.set_header(vec!["Tier", "Items", "Mean Angoff", "Weight Share"]);
    for tier in DifficultyTier::ALL {
        let items: Vec<_> = session
            .outcomes
            .iter()
            .filter(|o| o.difficulty_tier == tier)
            .collect();
        if items.is_empty() {
            continue;
        }
        let mean_angoff = items.iter().map(|o| o.angoff_score).sum::<f64>() / items.len() as f64;
        let tier_weight: f64 = items.iter().map(|o| weights.weight(o)).sum();
        table.add_row(vec![
            Cell::new(tier),
            Cell::new(items.len()),
            Cell::new(format!("{mean_angoff:.1}")),
            Cell::new(format!("{:.1}%", 100.0 * tier_weight / total_weight)),
        ]);
    }
    table
}
