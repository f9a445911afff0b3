use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use expense_notes::cli::{handle_command, Commands};
use expense_notes::config::{ExpensePaths, Settings};
use expense_notes::storage::open_file_store;

/// Environment variable controlling diagnostic log output
const LOG_ENV: &str = "EXPENSE_NOTES_LOG";

#[derive(Parser)]
#[command(
    name = "expense-notes",
    version,
    about = "Track personal expenses from the command line",
    long_about = "expense-notes records what you spend, keeps track of what is still \
                  unpaid, and imports expense lists from JSON sources without \
                  creating duplicates."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let store = open_file_store(&paths, &settings)?;
    if !paths.settings_file().exists() {
        settings.save(&paths)?;
    }
    let first_launch = store
        .open()
        .with_context(|| format!("Failed to open expenses in {}", paths.data_dir().display()))?;

    if first_launch && settings.seed_on_first_run {
        let seeded = store.seed()?;
        if seeded > 0 {
            tracing::info!(seeded, "first launch, sample expenses added");
        }
    }

    match cli.command {
        Some(cmd) => handle_command(&store, &paths, &settings, cmd)?,
        None => {
            println!("expense-notes - personal expense tracker");
            println!();
            println!("Run 'expense-notes --help' for usage information.");
            println!("Run 'expense-notes list' to see your expenses.");
        }
    }

    Ok(())
}
