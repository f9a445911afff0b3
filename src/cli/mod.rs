//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the expense store.

pub mod expense;
pub mod import;
pub mod maintenance;

use clap::Subcommand;

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;
use crate::storage::{ExpenseStore, KeyValueStore};

pub use expense::{EditArgs, ListArgs};
pub use import::handle_import_command;

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List expenses, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one expense
    Show {
        /// Expense ID (e.g. 3 or #3)
        id: String,
    },

    /// Record an expense you've already paid
    Add {
        /// What the money was spent on
        title: String,
        /// Amount (e.g. "25000", "25.000" or "25.000đ")
        amount: String,
        /// Category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Edit title, amount or category
    Edit(EditArgs),

    /// Flip an expense between paid and unpaid
    Toggle {
        /// Expense ID
        id: String,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
    },

    /// Import expenses from a JSON file ("-" for stdin)
    Import {
        /// Path to a JSON payload
        file: String,
    },

    /// Totals, optionally over a filtered set
    Summary(ListArgs),

    /// Add sample expenses to an empty store
    Seed,

    /// Delete every expense and the first-run marker
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

/// Dispatch a parsed command against an open store
pub fn handle_command<S: KeyValueStore>(
    store: &ExpenseStore<S>,
    paths: &ExpensePaths,
    settings: &Settings,
    cmd: Commands,
) -> ExpenseResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        Commands::List(args) => expense::handle_list(store, &args, symbol),
        Commands::Show { id } => expense::handle_show(store, &id, symbol),
        Commands::Add {
            title,
            amount,
            category,
        } => expense::handle_add(store, &title, &amount, category.as_deref(), symbol),
        Commands::Edit(args) => expense::handle_edit(store, &args),
        Commands::Toggle { id } => expense::handle_toggle(store, &id),
        Commands::Delete { id } => expense::handle_delete(store, &id),
        Commands::Import { file } => handle_import_command(store, &file),
        Commands::Summary(args) => expense::handle_summary(store, &args, symbol),
        Commands::Seed => maintenance::handle_seed(store),
        Commands::Reset { force } => maintenance::handle_reset(store, force),
        Commands::History { limit } => maintenance::handle_history(paths, limit),
        Commands::Config => {
            maintenance::handle_config(paths, settings);
            Ok(())
        }
    }
}
