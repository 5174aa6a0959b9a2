//! passmark CLI — score practice sessions and manage review queues.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "passmark",
    version,
    about = "Angoff-weighted exam scoring and missed-question review"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a finished session
    Score {
        /// Path to a .toml session file
        #[arg(long)]
        session: PathBuf,

        /// Candidate ledger (JSON) to record missed questions into
        #[arg(long)]
        ledger: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format: text, json, markdown, html, all
        #[arg(long, default_value = "text")]
        format: String,

        /// Output directory for json/html reports
        #[arg(long, default_value = "./passmark-results")]
        output: PathBuf,
    },

    /// Validate session TOML files
    Validate {
        /// Path to session file or directory
        #[arg(long)]
        session: PathBuf,
    },

    /// List questions due for review from a candidate ledger
    Review {
        /// Candidate ledger (JSON)
        #[arg(long)]
        ledger: PathBuf,

        /// Only show questions missed at least this many times
        #[arg(long)]
        min_attempts: Option<u32>,
    },

    /// Create starter config and example session
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("passmark=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            session,
            ledger,
            config,
            format,
            output,
        } => commands::score::execute(session, ledger, config, format, output),
        Commands::Validate { session } => commands::validate::execute(session),
        Commands::Review {
            ledger,
            min_attempts,
        } => commands::review::execute(ledger, min_attempts),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
