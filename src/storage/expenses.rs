//! Expense store
//!
//! Sole owner of the canonical expense collection. The whole collection is
//! cached in memory and persisted as one JSON array under a fixed key of the
//! backing `KeyValueStore`; a second key records that the store has been
//! initialized on this device at least once.
//!
//! Lifecycle: `Uninitialized --open()--> Open --reset()--> Uninitialized`.
//! Every read and write other than `open()` and `reset()` requires `Open`.
//!
//! Mutations are staged on a copy of the collection, persisted, and only then
//! swapped into the cache, so the cache always equals the last successfully
//! persisted collection. A single mutex covers the whole
//! read-modify-persist section.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::expense::{now_millis, validate_fields};
use crate::models::{Amount, Expense, ExpenseId, ImportItem, PaidStatus};
use crate::services::import_source::{items_from_value, parse_import_payload};

use super::kv::KeyValueStore;
use super::seed::sample_expenses;

/// Key holding the serialized collection
pub const EXPENSES_KEY: &str = "expenses";

/// Key holding the "initialized at least once" marker
pub const INITIALIZED_KEY: &str = "initialized";

const INITIALIZED_VALUE: &str = "true";

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

enum StoreState {
    Uninitialized,
    Open(Vec<Expense>),
}

impl StoreState {
    fn records(&self) -> ExpenseResult<&Vec<Expense>> {
        match self {
            Self::Open(records) => Ok(records),
            Self::Uninitialized => Err(ExpenseError::NotInitialized),
        }
    }

    fn records_mut(&mut self) -> ExpenseResult<&mut Vec<Expense>> {
        match self {
            Self::Open(records) => Ok(records),
            Self::Uninitialized => Err(ExpenseError::NotInitialized),
        }
    }
}

/// Outcome of a bulk import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Ids of the records created, in input order
    pub imported_ids: Vec<ExpenseId>,
    /// Items skipped because a record with the same title already exists
    pub duplicates: usize,
    /// Items skipped because of an empty title or non-positive price
    pub invalid: usize,
}

impl ImportReport {
    pub fn imported(&self) -> usize {
        self.imported_ids.len()
    }

    fn summary(&self) -> String {
        format!(
            "{} imported, {} duplicate, {} invalid",
            self.imported(),
            self.duplicates,
            self.invalid
        )
    }
}

/// Durable, deduplicating expense store over a key-value substrate
pub struct ExpenseStore<S: KeyValueStore> {
    backend: S,
    state: Mutex<StoreState>,
    audit: Option<AuditLogger>,
    clock: Clock,
}

impl<S: KeyValueStore> ExpenseStore<S> {
    /// Create an uninitialized store over `backend`
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            state: Mutex::new(StoreState::Uninitialized),
            audit: None,
            clock: Box::new(now_millis),
        }
    }

    /// Record every mutation in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Replace the source of `created_at` timestamps
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn lock(&self) -> ExpenseResult<MutexGuard<'_, StoreState>> {
        self.state.lock().map_err(|e| {
            ExpenseError::StorageUnavailable(format!("Failed to acquire store lock: {}", e))
        })
    }

    /// Load the persisted collection and start serving
    ///
    /// Idempotent: once open, later calls return `Ok(false)` without touching
    /// storage. Returns `true` only when this call wrote the device-wide
    /// initialized marker for the first time.
    pub fn open(&self) -> ExpenseResult<bool> {
        let mut state = self.lock()?;
        if let StoreState::Open(_) = *state {
            return Ok(false);
        }

        let records = self.load_records()?;

        let first_launch = self.backend.get(INITIALIZED_KEY)?.is_none();
        if first_launch {
            self.backend.set(INITIALIZED_KEY, INITIALIZED_VALUE)?;
        }

        info!(records = records.len(), first_launch, "expense store opened");
        *state = StoreState::Open(records);
        Ok(first_launch)
    }

    fn load_records(&self) -> ExpenseResult<Vec<Expense>> {
        let Some(blob) = self.backend.get(EXPENSES_KEY)? else {
            return Ok(Vec::new());
        };

        let records: Vec<Expense> = serde_json::from_str(&blob).map_err(|e| {
            ExpenseError::StorageUnavailable(format!("Corrupt expense collection: {}", e))
        })?;

        let mut seen = HashSet::with_capacity(records.len());
        if let Some(dup) = records.iter().find(|e| !seen.insert(e.id)) {
            return Err(ExpenseError::StorageUnavailable(format!(
                "Corrupt expense collection: duplicate id {}",
                dup.id
            )));
        }

        Ok(records)
    }

    /// Whether `open()` has succeeded since construction or the last reset
    pub fn is_open(&self) -> bool {
        self.lock()
            .map(|state| matches!(*state, StoreState::Open(_)))
            .unwrap_or(false)
    }

    /// Insert the sample records if, and only if, the collection is empty
    ///
    /// Returns the number of records inserted.
    pub fn seed(&self) -> ExpenseResult<usize> {
        let mut state = self.lock()?;
        let records = state.records_mut()?;
        if !records.is_empty() {
            debug!(records = records.len(), "seed skipped, store not empty");
            return Ok(0);
        }

        let staged = sample_expenses(ExpenseId::FIRST, (self.clock)());
        let inserted = staged.len();
        self.commit(records, staged)?;

        info!(inserted, "seeded sample expenses");
        self.audit(&[AuditEntry::batch(
            Operation::Seed,
            format!("{} sample records", inserted),
        )]);
        Ok(inserted)
    }

    /// Snapshot of every record in store order
    pub fn list(&self) -> ExpenseResult<Vec<Expense>> {
        let state = self.lock()?;
        let records = state.records()?;
        debug!(records = records.len(), "listing expenses");
        Ok(records.clone())
    }

    /// Look up a single record
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let state = self.lock()?;
        Ok(state.records()?.iter().find(|e| e.id == id).cloned())
    }

    /// Number of records
    pub fn count(&self) -> ExpenseResult<usize> {
        let state = self.lock()?;
        Ok(state.records()?.len())
    }

    /// Record a manually entered expense, which starts out paid
    ///
    /// Surrounding whitespace is stripped from the title before it is stored.
    pub fn insert(
        &self,
        title: &str,
        amount: Amount,
        category: Option<&str>,
    ) -> ExpenseResult<ExpenseId> {
        let title = title.trim();
        validate_fields(title, amount).map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let mut state = self.lock()?;
        let records = state.records_mut()?;

        let id =
            ExpenseId::next_after(records.iter().map(|e| e.id)).ok_or_else(id_exhausted)?;
        let expense = Expense::manual(
            id,
            title,
            amount,
            category.map(str::to_string),
            (self.clock)(),
        );
        let entry = AuditEntry::create(&expense);

        let mut staged = records.clone();
        staged.push(expense);
        self.commit(records, staged)?;

        info!(%id, "inserted expense");
        self.audit(&[entry]);
        Ok(id)
    }

    /// Replace title, amount and category of an existing record
    ///
    /// Returns `false` (and writes nothing) when `id` is unknown.
    pub fn update(
        &self,
        id: ExpenseId,
        title: &str,
        amount: Amount,
        category: Option<&str>,
    ) -> ExpenseResult<bool> {
        let title = title.trim();
        validate_fields(title, amount).map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let mut state = self.lock()?;
        let records = state.records_mut()?;

        let Some(index) = records.iter().position(|e| e.id == id) else {
            debug!(%id, "update ignored, no such expense");
            return Ok(false);
        };

        let mut staged = records.clone();
        staged[index].apply_edit(title, amount, category.map(str::to_string));
        let entry = AuditEntry::update(&records[index], &staged[index]);
        self.commit(records, staged)?;

        info!(%id, "updated expense");
        self.audit(&[entry]);
        Ok(true)
    }

    /// Flip the paid flag of a record
    ///
    /// Returns the new status, or `None` (and writes nothing) when `id` is
    /// unknown.
    pub fn toggle_paid(&self, id: ExpenseId) -> ExpenseResult<Option<PaidStatus>> {
        let mut state = self.lock()?;
        let records = state.records_mut()?;

        let Some(index) = records.iter().position(|e| e.id == id) else {
            debug!(%id, "toggle ignored, no such expense");
            return Ok(None);
        };

        let mut staged = records.clone();
        staged[index].paid = staged[index].paid.toggled();
        let paid = staged[index].paid;
        let entry = AuditEntry::toggle(&records[index], &staged[index]);
        self.commit(records, staged)?;

        info!(%id, %paid, "toggled paid status");
        self.audit(&[entry]);
        Ok(Some(paid))
    }

    /// Remove a record
    ///
    /// Returns `false` (and writes nothing) when `id` is unknown.
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<bool> {
        let mut state = self.lock()?;
        let records = state.records_mut()?;

        let Some(index) = records.iter().position(|e| e.id == id) else {
            debug!(%id, "delete ignored, no such expense");
            return Ok(false);
        };

        let mut staged = records.clone();
        let removed = staged.remove(index);
        self.commit(records, staged)?;

        info!(%id, "deleted expense");
        self.audit(&[AuditEntry::delete(&removed)]);
        Ok(true)
    }

    /// Bulk-insert items, skipping titles already present
    ///
    /// A title counts as present when it matches an existing record, or an
    /// item accepted earlier in the same batch, exactly and case-sensitively
    /// after surrounding whitespace is stripped.
    /// Imported records start unpaid. The batch is persisted with one write.
    pub fn import_items<I>(&self, items: I) -> ExpenseResult<ImportReport>
    where
        I: IntoIterator<Item = ImportItem>,
    {
        let mut state = self.lock()?;
        let records = state.records_mut()?;

        let mut report = ImportReport::default();
        let mut titles: HashSet<String> = records.iter().map(|e| e.title.clone()).collect();
        let mut next_id = ExpenseId::next_after(records.iter().map(|e| e.id));
        let now = (self.clock)();
        let mut staged = records.clone();

        for item in items {
            let title = item.title.trim();
            if validate_fields(title, item.price).is_err() {
                report.invalid += 1;
                continue;
            }
            if !titles.insert(title.to_string()) {
                report.duplicates += 1;
                continue;
            }

            let id = next_id.ok_or_else(id_exhausted)?;
            staged.push(Expense::imported(
                id,
                title,
                item.price,
                item.category,
                now,
            ));
            report.imported_ids.push(id);
            next_id = id.next();
        }

        if report.imported() > 0 {
            self.commit(records, staged)?;
        }

        info!(
            imported = report.imported(),
            duplicates = report.duplicates,
            invalid = report.invalid,
            "import finished"
        );
        self.audit(&[AuditEntry::batch(Operation::Import, report.summary())]);
        Ok(report)
    }

    /// Parse a raw import payload and import it
    ///
    /// Returns the number of records actually inserted. An unrecognized
    /// payload fails with `MalformedImportSource` before anything is written.
    pub fn import_from_source(&self, raw: &str) -> ExpenseResult<usize> {
        let items = parse_import_payload(raw)?;
        Ok(self.import_items(items)?.imported())
    }

    /// Same as `import_from_source` for an already-decoded payload
    pub fn import_from_value(&self, payload: Value) -> ExpenseResult<usize> {
        let items = items_from_value(payload)?;
        Ok(self.import_items(items)?.imported())
    }

    /// Wipe the persisted collection and marker and return to uninitialized
    pub fn reset(&self) -> ExpenseResult<()> {
        let mut state = self.lock()?;
        self.backend.remove_all(&[EXPENSES_KEY, INITIALIZED_KEY])?;
        *state = StoreState::Uninitialized;

        info!("expense store reset");
        self.audit(&[AuditEntry::batch(Operation::Reset, "all records removed")]);
        Ok(())
    }

    /// Persist `staged`, then make it the cached collection
    fn commit(&self, records: &mut Vec<Expense>, staged: Vec<Expense>) -> ExpenseResult<()> {
        let blob = serde_json::to_string(&staged).map_err(|e| {
            ExpenseError::StorageUnavailable(format!("Failed to encode expense collection: {}", e))
        })?;

        if let Err(e) = self.backend.set(EXPENSES_KEY, &blob) {
            warn!(error = %e, "failed to persist expense collection");
            return Err(e);
        }

        *records = staged;
        Ok(())
    }

    fn audit(&self, entries: &[AuditEntry]) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log_batch(entries) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}

fn id_exhausted() -> ExpenseError {
    ExpenseError::StorageUnavailable("id space exhausted".into())
}
