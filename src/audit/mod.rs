//! Audit logging for the expense store
//!
//! Records every mutation (create, update, toggle, delete, import, seed,
//! reset) with before/after values in an append-only JSONL log.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_notes::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(&expense))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
