//! Tracker engine
//!
//! Owns the category directory, the ignore registry, the partitioned
//! transaction store and the aggregate tables, and exposes the mutation and
//! query operations the CLI is built on.
//!
//! Every mutation follows the same order: change memory, recompute the
//! aggregates, then persist. A failed write is returned as an error but the
//! in-memory change is kept, so aggregates are never stale.

use std::path::Path;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::audit::{Action, AuditEntry, AuditLogger};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{IgnoreKey, Period, Transaction};
use crate::storage::{CategoryPersistence, IgnorePersistence, SessionData, Storage};

use super::aggregation::{Aggregates, PeriodBreakdown};
use super::category::{validate_category_name, CategoryDirectory};
use super::ignore::IgnoreRegistry;
use super::import::{ImportPipeline, ImportReport, LoadMode};
use super::transaction::{Partition, TransactionFilter, TransactionStore};

/// What a category rename touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenameOutcome {
    pub stores: usize,
    pub transactions: usize,
}

pub struct Tracker<'a> {
    categories_io: &'a dyn CategoryPersistence,
    ignore_io: &'a dyn IgnorePersistence,
    directory: CategoryDirectory,
    registry: IgnoreRegistry,
    store: TransactionStore,
    aggregates: Aggregates,
    audit: Option<AuditLogger>,
}

impl<'a> Tracker<'a> {
    /// Start with nothing loaded; the directory and registry come from persistence
    pub fn new(
        categories_io: &'a dyn CategoryPersistence,
        ignore_io: &'a dyn IgnorePersistence,
    ) -> TrackerResult<Self> {
        Ok(Self {
            directory: CategoryDirectory::load(categories_io)?,
            registry: IgnoreRegistry::load(ignore_io)?,
            store: TransactionStore::new(),
            aggregates: Aggregates::default(),
            categories_io,
            ignore_io,
            audit: None,
        })
    }

    /// Open the tracker on a data directory, restoring the last session
    pub fn from_storage(storage: &'a Storage) -> TrackerResult<Self> {
        let mut tracker = Self::new(&storage.categories, &storage.ignore)?
            .with_audit(AuditLogger::new(storage.paths().audit_log()));
        let session = storage.session.load()?;
        tracker.restore_session(session);
        Ok(tracker)
    }

    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Replace both partitions with a saved snapshot, re-filtered against the
    /// current registry
    pub fn restore_session(&mut self, data: SessionData) {
        self.store = TransactionStore::from_session(data);
        let moved = self.store.refilter(&self.registry);
        if moved > 0 {
            debug!(moved, "session re-filtered against ignore list");
        }
        self.recompute();
    }

    pub fn session_data(&self) -> SessionData {
        self.store.to_session()
    }

    /// Rebuild the aggregate tables from the active partition
    pub fn recompute(&mut self) {
        self.aggregates = Aggregates::compute(self.store.active());
    }

    /// Reload the ignore list from persistence and re-partition to match it
    pub fn refresh_ignore_list(&mut self) -> TrackerResult<usize> {
        self.registry.reload(self.ignore_io)?;
        let moved = self.store.refilter(&self.registry);
        self.recompute();
        Ok(moved)
    }

    /// Import statement files
    ///
    /// The ignore list is reloaded first so that edits made outside this
    /// process decide routing.
    pub fn import<P: AsRef<Path>>(
        &mut self,
        files: &[P],
        mode: LoadMode,
    ) -> TrackerResult<ImportReport> {
        self.registry.reload(self.ignore_io)?;

        let report = ImportPipeline::new(&mut self.directory, self.categories_io).run(
            files,
            mode,
            &mut self.store,
            &self.registry,
        );
        self.recompute();

        let names: Vec<String> = files
            .iter()
            .map(|f| f.as_ref().display().to_string())
            .collect();
        self.audit(
            AuditEntry::new(Action::Import, names.join(", "), report.total_loaded()).with_details(
                &json!({
                    "mode": format!("{:?}", mode),
                    "imported": report.imported,
                    "ignored": report.ignored,
                    "row_errors": report.row_errors.len(),
                    "file_errors": report.file_errors.len(),
                }),
            ),
        );
        Ok(report)
    }

    /// Correct the category of the active transaction at `index`
    ///
    /// With `apply_to_all_for_store`, every active transaction of that
    /// transaction's store is recategorized and the directory entry is
    /// updated and saved. Returns how many transactions changed; a stale
    /// index changes nothing.
    pub fn correct_category(
        &mut self,
        index: usize,
        category: &str,
        apply_to_all_for_store: bool,
    ) -> TrackerResult<usize> {
        let category = validate_category_name(category)?;

        let Some(store_name) = self.store.active().get(index).map(|t| t.store.clone()) else {
            debug!(index, "correction target not found");
            return Ok(0);
        };

        let changed = if apply_to_all_for_store {
            let changed = self.store.update_category_for_store(&store_name, &category);
            self.directory.set(&store_name, &category);
            changed
        } else {
            usize::from(self.store.update_category_at(index, &category).is_some())
        };
        self.recompute();

        info!(store = %store_name, category = %category, changed, "corrected category");
        self.audit(
            AuditEntry::new(Action::Correct, &store_name, changed).with_details(&json!({
                "index": index,
                "category": category,
                "apply_to_all_for_store": apply_to_all_for_store,
            })),
        );

        if apply_to_all_for_store {
            self.directory.save(self.categories_io)?;
        }
        Ok(changed)
    }

    /// Ignore every active transaction with this date ("YYYY-MM-DD") and store
    pub fn move_to_ignore(&mut self, date: &str, store: &str) -> TrackerResult<usize> {
        let key = IgnoreKey::new(date.trim(), store.trim());
        let moved = self.store.move_to_ignored(&key, &mut self.registry);
        if moved == 0 {
            return Ok(0);
        }
        self.recompute();

        info!(key = %key, moved, "ignored transactions");
        self.audit(AuditEntry::new(Action::Ignore, key.to_string(), moved));
        self.registry.save(self.ignore_io)?;
        Ok(moved)
    }

    /// Restore ignored transactions with this date and store to active
    ///
    /// The pair is dropped from the ignore list even when no loaded
    /// transaction matches it.
    pub fn move_to_active(&mut self, date: &str, store: &str) -> TrackerResult<usize> {
        let key = IgnoreKey::new(date.trim(), store.trim());
        let registered = self.registry.contains(&key);
        let moved = self.store.move_to_active(&key, &mut self.registry);
        if !registered && moved == 0 {
            return Ok(0);
        }
        self.recompute();

        info!(key = %key, moved, "restored transactions");
        self.audit(AuditEntry::new(Action::Unignore, key.to_string(), moved));
        self.registry.save(self.ignore_io)?;
        Ok(moved)
    }

    /// Rename a category everywhere (case-insensitive match on `old`)
    pub fn rename_category(&mut self, old: &str, new: &str) -> TrackerResult<RenameOutcome> {
        let new = validate_category_name(new)?;

        let outcome = RenameOutcome {
            stores: self.directory.rename(old, &new),
            transactions: self.store.rename_category(old, &new),
        };
        self.recompute();

        info!(from = old, to = %new, stores = outcome.stores, transactions = outcome.transactions, "renamed category");
        self.audit(
            AuditEntry::new(Action::Rename, old, outcome.transactions)
                .with_details(&json!({ "from": old, "to": new, "stores": outcome.stores })),
        );

        if outcome.stores > 0 {
            self.directory.save(self.categories_io)?;
        }
        Ok(outcome)
    }

    /// Map a store to a category and save the directory
    ///
    /// Loaded transactions of the store that are still unclassified pick up
    /// the new category. Returns how many did.
    pub fn assign_category(&mut self, store: &str, category: &str) -> TrackerResult<usize> {
        let store = store.trim();
        if store.is_empty() {
            return Err(TrackerError::Validation("Store name cannot be empty".into()));
        }
        let category = validate_category_name(category)?;

        let saved = self.directory.assign(store, &category, self.categories_io);
        let classified = self.store.classify_store(store, &category);
        self.recompute();

        self.audit(
            AuditEntry::new(Action::Assign, store, classified)
                .with_details(&json!({ "category": category })),
        );
        saved.map(|_| classified)
    }

    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }

    pub fn aggregates(&self) -> &Aggregates {
        &self.aggregates
    }

    pub fn breakdown(&self, period: &Period) -> PeriodBreakdown {
        self.aggregates.breakdown(period)
    }

    pub fn directory(&self) -> &CategoryDirectory {
        &self.directory
    }

    pub fn registry(&self) -> &IgnoreRegistry {
        &self.registry
    }

    pub fn transactions(&self) -> &TransactionStore {
        &self.store
    }

    pub fn active(&self, filter: &TransactionFilter) -> Vec<(usize, &Transaction)> {
        self.store.filtered(Partition::Active, filter)
    }

    pub fn ignored(&self, filter: &TransactionFilter) -> Vec<(usize, &Transaction)> {
        self.store.filtered(Partition::Ignored, filter)
    }

    pub fn available_periods(&self) -> Vec<String> {
        self.store.available_periods()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::models::Money;
    use crate::storage::CategoryMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const STATEMENT: &str = "Date,Description,Value\n\
        15 Jan 2024,\"SHOP A, Tesco\",-23.50\n\
        20 Jan 2024,\"SHOP B, Employer\",2000.00\n";

    struct FailingIgnoreList;

    impl IgnorePersistence for FailingIgnoreList {
        fn load_ignore_list(&self) -> TrackerResult<Vec<IgnoreKey>> {
            Ok(Vec::new())
        }

        fn save_ignore_list(&self, _entries: &[IgnoreKey]) -> TrackerResult<()> {
            Err(TrackerError::Storage("read-only".into()))
        }
    }

    struct MemoryCategories;

    impl CategoryPersistence for MemoryCategories {
        fn load_categories(&self) -> TrackerResult<CategoryMap> {
            Ok(CategoryMap::new())
        }

        fn save_categories(&self, _categories: &CategoryMap) -> TrackerResult<()> {
            Ok(())
        }
    }

    fn create_test_storage() -> (TempDir, Storage, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().join("data"));
        let storage = Storage::new(paths).unwrap();
        let statement = temp_dir.path().join("jan.csv");
        std::fs::write(&statement, STATEMENT).unwrap();
        (temp_dir, storage, statement)
    }

    fn assert_partitioned(tracker: &Tracker) {
        let store = tracker.transactions();
        for t in store.active() {
            assert!(!tracker.registry().is_ignored(t));
        }
        for t in store.ignored() {
            assert!(tracker.registry().is_ignored(t));
        }
    }

    fn assert_aggregates_fresh(tracker: &Tracker) {
        assert_eq!(
            tracker.aggregates(),
            &Aggregates::compute(tracker.transactions().active())
        );
    }

    #[test]
    fn test_import_and_ignore_scenario() {
        let (_temp, storage, statement) = create_test_storage();
        let mut tracker = Tracker::from_storage(&storage).unwrap();

        let report = tracker.import(&[&statement], LoadMode::Replace).unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(tracker.aggregates().spending_for_month("2024-01"), Money::from_pence(2350));
        assert_eq!(tracker.aggregates().income_for_month("2024-01"), Money::from_pence(200000));

        assert_eq!(tracker.move_to_ignore("2024-01-15", "Tesco").unwrap(), 1);
        assert_eq!(tracker.aggregates().spending_for_month("2024-01"), Money::zero());
        assert_eq!(tracker.transactions().ignored().len(), 1);
        assert!(tracker.transactions().active().iter().all(|t| t.store != "Tesco"));
        assert_partitioned(&tracker);

        // Persisted for the next run
        let reloaded = IgnoreRegistry::load(&storage.ignore).unwrap();
        assert!(reloaded.contains(&IgnoreKey::new("2024-01-15", "Tesco")));
    }

    #[test]
    fn test_ignore_toggle_round_trip() {
        let (_temp, storage, statement) = create_test_storage();
        let mut tracker = Tracker::from_storage(&storage).unwrap();
        tracker.import(&[&statement], LoadMode::Replace).unwrap();
        let original = tracker.transactions().active()[0].clone();

        tracker.move_to_ignore("2024-01-15", "Tesco").unwrap();
        assert_eq!(tracker.move_to_active("2024-01-15", "Tesco").unwrap(), 1);

        assert!(tracker.transactions().active().contains(&original));
        assert!(tracker.registry().is_empty());
        assert!(IgnoreRegistry::load(&storage.ignore).unwrap().is_empty());
        assert_aggregates_fresh(&tracker);
    }

    #[test]
    fn test_lookup_miss_is_noop() {
        let (_temp, storage, statement) = create_test_storage();
        let mut tracker = Tracker::from_storage(&storage).unwrap();
        tracker.import(&[&statement], LoadMode::Replace).unwrap();

        assert_eq!(tracker.move_to_ignore("2024-01-16", "Tesco").unwrap(), 0);
        assert_eq!(tracker.move_to_active("2024-01-15", "Tesco").unwrap(), 0);
        assert_eq!(tracker.correct_category(99, "Food", true).unwrap(), 0);
        assert!(tracker.registry().is_empty());
        assert_eq!(tracker.transactions().active().len(), 2);
    }

    #[test]
    fn test_correct_single_and_all() {
        let (_temp, storage, statement) = create_test_storage();
        let mut tracker = Tracker::from_storage(&storage).unwrap();
        tracker.import(&[&statement, &statement], LoadMode::Replace).unwrap();

        assert_eq!(tracker.correct_category(0, "Snacks", false).unwrap(), 1);
        assert_eq!(tracker.transactions().active()[0].category, "Snacks");
        assert_eq!(tracker.transactions().active()[2].category, "None");
        assert_eq!(tracker.directory().category_for("Tesco"), "None");

        assert_eq!(tracker.correct_category(2, "Groceries", true).unwrap(), 2);
        assert!(tracker
            .transactions()
            .active()
            .iter()
            .filter(|t| t.store == "Tesco")
            .all(|t| t.category == "Groceries"));
        let saved = CategoryDirectory::load(&storage.categories).unwrap();
        assert_eq!(saved.category_for("Tesco"), "Groceries");
        assert_eq!(
            tracker.aggregates().summary_spending["2024-01"]["Groceries"],
            Money::from_pence(4700)
        );
    }

    #[test]
    fn test_rename_propagates() {
        let (_temp, storage, statement) = create_test_storage();
        let mut tracker = Tracker::from_storage(&storage).unwrap();
        tracker.import(&[&statement], LoadMode::Replace).unwrap();
        tracker.assign_category("Tesco", "Groceries").unwrap();

        let outcome = tracker.rename_category("groceries", "Food").unwrap();
        assert_eq!(outcome, RenameOutcome { stores: 1, transactions: 1 });
        assert!(tracker
            .transactions()
            .active()
            .iter()
            .all(|t| !t.category.eq_ignore_ascii_case("groceries")));
        assert!(!tracker.directory().known_categories().contains(&"Groceries"));
        assert!(tracker.aggregates().summary_spending["2024-01"].contains_key("Food"));
        assert_aggregates_fresh(&tracker);
    }

    #[test]
    fn test_rename_to_empty_is_rejected() {
        let (_temp, storage, statement) = create_test_storage();
        let mut tracker = Tracker::from_storage(&storage).unwrap();
        tracker.import(&[&statement], LoadMode::Replace).unwrap();
        tracker.assign_category("Tesco", "Groceries").unwrap();

        assert!(tracker.rename_category("Groceries", "  ").unwrap_err().is_validation());
        assert_eq!(tracker.directory().category_for("Tesco"), "Groceries");
    }

    #[test]
    fn test_assign_classifies_loaded_transactions() {
        let (_temp, storage, statement) = create_test_storage();
        let mut tracker = Tracker::from_storage(&storage).unwrap();
        tracker.import(&[&statement], LoadMode::Replace).unwrap();

        assert_eq!(tracker.assign_category("Employer", "Salary").unwrap(), 1);
        assert_eq!(tracker.transactions().active()[1].category, "Salary");
        assert_eq!(
            tracker.breakdown(&Period::Total).income_by_category,
            vec![("Salary".to_string(), Money::from_pence(200000))]
        );
    }

    #[test]
    fn test_session_restore_refilters() {
        let (_temp, storage, statement) = create_test_storage();
        let session = {
            let mut tracker = Tracker::from_storage(&storage).unwrap();
            tracker.import(&[&statement], LoadMode::Replace).unwrap();
            tracker.session_data()
        };
        storage.session.save(&session).unwrap();

        // Ignore list edited between runs
        let mut external = IgnoreRegistry::new();
        external.add(IgnoreKey::new("2024-01-20", "Employer"));
        external.save(&storage.ignore).unwrap();

        let tracker = Tracker::from_storage(&storage).unwrap();
        assert_eq!(tracker.transactions().ignored()[0].store, "Employer");
        assert_eq!(tracker.aggregates().income_for_month("2024-01"), Money::zero());
        assert_partitioned(&tracker);
    }

    #[test]
    fn test_refresh_ignore_list() {
        let (_temp, storage, statement) = create_test_storage();
        let mut tracker = Tracker::from_storage(&storage).unwrap();
        tracker.import(&[&statement], LoadMode::Replace).unwrap();

        IgnoreRegistry::from_entries(vec![IgnoreKey::new("2024-01-15", "Tesco")])
            .save(&storage.ignore)
            .unwrap();
        assert_eq!(tracker.refresh_ignore_list().unwrap(), 1);
        assert_eq!(tracker.aggregates().spending_for_month("2024-01"), Money::zero());
        assert_partitioned(&tracker);
    }

    #[test]
    fn test_persistence_failure_keeps_memory_state() {
        let temp_dir = TempDir::new().unwrap();
        let statement = temp_dir.path().join("jan.csv");
        std::fs::write(&statement, STATEMENT).unwrap();

        let categories = MemoryCategories;
        let ignore = FailingIgnoreList;
        let mut tracker = Tracker::new(&categories, &ignore).unwrap();
        tracker.import(&[&statement], LoadMode::Replace).unwrap();

        let err = tracker.move_to_ignore("2024-01-15", "Tesco").unwrap_err();
        assert!(err.is_storage());
        assert_eq!(tracker.transactions().ignored().len(), 1);
        assert_eq!(tracker.aggregates().spending_for_month("2024-01"), Money::zero());
        assert_partitioned(&tracker);
    }

    #[test]
    fn test_mutations_are_audited() {
        let (_temp, storage, statement) = create_test_storage();
        let mut tracker = Tracker::from_storage(&storage).unwrap();
        tracker.import(&[&statement], LoadMode::Replace).unwrap();
        tracker.assign_category("Tesco", "Groceries").unwrap();
        tracker.move_to_ignore("2024-01-15", "Tesco").unwrap();

        let entries = AuditLogger::new(storage.paths().audit_log()).read_all().unwrap();
        let actions: Vec<Action> = entries.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![Action::Import, Action::Assign, Action::Ignore]);
    }
}
