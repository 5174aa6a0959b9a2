//! The `passmark init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create passmark.toml
    if std::path::Path::new("passmark.toml").exists() {
        println!("passmark.toml already exists, skipping.");
    } else {
        std::fs::write("passmark.toml", SAMPLE_CONFIG)?;
        println!("Created passmark.toml");
    }

    // Create example session
    std::fs::create_dir_all("sessions")?;
    let example_path = std::path::Path::new("sessions/example.toml");
    if example_path.exists() {
        println!("sessions/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_SESSION)?;
        println!("Created sessions/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust the scoring policy in passmark.toml if needed");
    println!("  2. Run: passmark validate --session sessions/example.toml");
    println!("  3. Run: passmark score --session sessions/example.toml --ledger ledger.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# passmark scoring policy

# Extra weight given to the hardest items (Angoff score 0). 0 = unweighted.
angoff_k = 1.0

# Difficulty tiers below this accuracy receive a study recommendation.
recommendation_target_pct = 70.0

# Questions needed before sample size stops limiting confidence.
confidence_saturation = 50

# Spread of tier accuracies (percentage points) that drives confidence to zero.
consistency_spread_pct = 50.0
"#;

const EXAMPLE_SESSION: &str = r#"[session]
id = "example"
candidate = "candidate-1"

[[outcomes]]
question_id = "pharm-001"
correct = true
time_spent_seconds = 42
difficulty = "foundation"
angoff_score = 90
topic = "pharmacology"
user_answer = "B"
correct_answer = "B"

[[outcomes]]
question_id = "pharm-014"
correct = false
time_spent_seconds = 118
difficulty = "advanced"
angoff_score = 20
topic = "pharmacology"
user_answer = "A"
correct_answer = "D"

[[outcomes]]
question_id = "cardio-007"
correct = true
time_spent_seconds = 65
difficulty = "intermediate"
angoff_score = 60
topic = "cardiology"
user_answer = "C"
correct_answer = "C"
"#;
