//! The `passmark review` command.

use std::path::PathBuf;

use anyhow::Result;

use passmark_core::ledger::MissedItemLedger;

pub fn execute(ledger_path: PathBuf, min_attempts: Option<u32>) -> Result<()> {
    use comfy_table::{Cell, Table};

    let ledger = MissedItemLedger::load_json(&ledger_path)?;

    let due = match min_attempts {
        Some(n) => ledger.get_by_min_attempts(n),
        None => ledger.get_wrong_questions(),
    };

    if due.is_empty() {
        println!("Nothing to review for {}.", display_candidate(&ledger));
        return Ok(());
    }

    println!(
        "{} question(s) to review for {}:",
        due.len(),
        display_candidate(&ledger)
    );

    let mut table = Table::new();
    table.set_header(vec![
        "Question",
        "Misses",
        "Last Answer",
        "Correct Answer",
        "Last Missed",
    ]);
    for entry in &due {
        table.add_row(vec![
            Cell::new(&entry.question_id),
            Cell::new(entry.attempts),
            Cell::new(&entry.user_answer),
            Cell::new(&entry.correct_answer),
            Cell::new(entry.timestamp.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");

    Ok(())
}

fn display_candidate(ledger: &MissedItemLedger) -> &str {
    if ledger.candidate_id.is_empty() {
        "this candidate"
    } else {
        &ledger.candidate_id
    }
}
