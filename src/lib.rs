//! expense-notes - personal expense tracking with a durable local record store
//!
//! The heart of the crate is [`storage::ExpenseStore`]: an in-memory cache of
//! every expense record, persisted as one JSON array through a pluggable
//! key-value substrate, with sequential ids, paid-status toggling, first-run
//! sample data and deduplicating bulk import.
//!
//! # Architecture
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Expense records, ids, amounts, import items
//! - `storage`: Key-value substrates and the expense store
//! - `services`: Import payload parsing, filtering and summaries
//! - `audit`: Append-only log of every mutation
//! - `display` / `cli`: Terminal front end
//!
//! # Example
//!
//! ```rust
//! use expense_notes::models::Amount;
//! use expense_notes::storage::{ExpenseStore, MemoryStore};
//!
//! let store = ExpenseStore::new(MemoryStore::new());
//! store.open()?;
//! store.seed()?;
//! let id = store.insert("Bánh mì", Amount::new(20000.0), Some("Ăn uống"))?;
//! assert_eq!(store.count()?, 4);
//! assert!(store.get(id)?.unwrap().is_paid());
//! # Ok::<(), expense_notes::ExpenseError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
