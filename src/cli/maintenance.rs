//! Store maintenance commands: seed, reset, history, config

use crate::audit::AuditLogger;
use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;
use crate::storage::{ExpenseStore, KeyValueStore};

pub fn handle_seed<S: KeyValueStore>(store: &ExpenseStore<S>) -> ExpenseResult<()> {
    match store.seed()? {
        0 => println!("Store already has expenses; sample data not added."),
        n => println!("Added {} sample expense(s).", n),
    }
    Ok(())
}

pub fn handle_reset<S: KeyValueStore>(store: &ExpenseStore<S>, force: bool) -> ExpenseResult<()> {
    if !force {
        println!("About to delete all {} expense(s).", store.count()?);
        println!();
        println!("Use --force to confirm reset");
        return Ok(());
    }

    store.reset()?;
    println!("All expenses removed. Sample data will be added on next start.");
    Ok(())
}

pub fn handle_history(paths: &ExpensePaths, limit: usize) -> ExpenseResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No history recorded.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}

pub fn handle_config(paths: &ExpensePaths, settings: &Settings) {
    println!("expense-notes Configuration");
    println!("===========================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Data directory:  {}", paths.data_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!("Audit log:       {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:   {}", settings.currency_symbol);
    println!("  Seed on first run: {}", settings.seed_on_first_run);
    println!("  Audit enabled:     {}", settings.audit_enabled);
}
