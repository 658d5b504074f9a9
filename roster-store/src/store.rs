//! Canonical student collection with simulated latency.
//!
//! The set lives in a `tokio::sync::watch` channel as an `Arc<Vec<_>>`.
//! Every mutation goes through `Arc::make_mut`, so snapshots already handed
//! out are never touched, and subscribers are woken only when the set
//! actually changed.
//!
//! Operations never fail. Update and delete of an unknown id are no-ops that
//! report `false`.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use roster_core::{sample_students, IdGenerator, StudentDraft, StudentRecord, UuidIdGenerator};

/// Immutable view of the canonical set at one point in time.
pub type Snapshot = Arc<Vec<StudentRecord>>;

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Delay before the initial bulk load resolves (default: 800ms)
    pub load_delay: Duration,
    /// Delay before create / update / delete resolve (default: 600ms)
    pub mutation_delay: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            load_delay: Duration::from_millis(800),
            mutation_delay: Duration::from_millis(600),
        }
    }
}

impl StoreConfig {
    /// No latency. Operations still resolve asynchronously.
    pub fn for_testing() -> Self {
        Self {
            load_delay: Duration::ZERO,
            mutation_delay: Duration::ZERO,
        }
    }
}

/// Operation counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub created: u64,
    pub updated: u64,
    pub deleted: u64,
    /// Update or delete calls whose id matched nothing
    pub missed: u64,
}

#[derive(Default)]
struct AtomicStoreStats {
    created: AtomicU64,
    updated: AtomicU64,
    deleted: AtomicU64,
    missed: AtomicU64,
}

/// Decrements the in-flight counter when an operation finishes or is dropped.
struct PendingGuard<'a>(&'a AtomicUsize);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

pub struct CollectionStore {
    config: StoreConfig,
    ids: Arc<dyn IdGenerator>,
    records: watch::Sender<Snapshot>,
    loaded: AtomicBool,
    pending: AtomicUsize,
    stats: AtomicStoreStats,
}

impl CollectionStore {
    /// Empty, not-yet-loaded store with UUID ids.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_id_generator(config, Arc::new(UuidIdGenerator))
    }

    pub fn with_id_generator(config: StoreConfig, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            config,
            ids,
            records: watch::Sender::new(Arc::new(Vec::new())),
            loaded: AtomicBool::new(false),
            pending: AtomicUsize::new(0),
            stats: AtomicStoreStats::default(),
        }
    }

    /// Store that starts out loaded with the given records.
    pub fn with_records(config: StoreConfig, records: Vec<StudentRecord>) -> Self {
        let store = Self::new(config);
        store.records.send_replace(Arc::new(records));
        store.loaded.store(true, Ordering::Release);
        store
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Full canonical set in insertion order.
    pub fn list(&self) -> Snapshot {
        self.records.borrow().clone()
    }

    pub fn get(&self, id: &str) -> Option<StudentRecord> {
        self.records.borrow().iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Receiver that is notified whenever the canonical set changes.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.records.subscribe()
    }

    /// True until the initial load (or `with_records`) has populated the store.
    pub fn is_loading(&self) -> bool {
        !self.loaded.load(Ordering::Acquire)
    }

    pub fn pending_operations(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Whether a create, update or delete is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending_operations() > 0
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            created: self.stats.created.load(Ordering::Relaxed),
            updated: self.stats.updated.load(Ordering::Relaxed),
            deleted: self.stats.deleted.load(Ordering::Relaxed),
            missed: self.stats.missed.load(Ordering::Relaxed),
        }
    }

    /// Initial bulk load: replaces the set with the demo roster.
    ///
    /// Returns the number of records loaded.
    pub async fn load(&self) -> usize {
        simulate_latency(self.config.load_delay).await;

        let records = sample_students(self.ids.as_ref());
        let count = records.len();
        self.records.send_replace(Arc::new(records));
        self.loaded.store(true, Ordering::Release);

        log::info!("Loaded {count} students");
        count
    }

    /// Append a new record built from `draft` with a freshly generated id.
    ///
    /// The draft is not validated here.
    pub async fn create(&self, draft: StudentDraft) -> StudentRecord {
        let _pending = self.begin();
        simulate_latency(self.config.mutation_delay).await;

        let record = StudentRecord::new(self.ids.next_id(), draft);
        self.records
            .send_modify(|set| Arc::make_mut(set).push(record.clone()));
        self.stats.created.fetch_add(1, Ordering::Relaxed);

        log::debug!("Created student {} ({})", record.id, record.full_name());
        record
    }

    /// Replace every field but the id of the record with `id`.
    ///
    /// Returns `false` (and changes nothing) when no such record exists.
    pub async fn update(&self, id: &str, draft: StudentDraft) -> bool {
        let _pending = self.begin();
        simulate_latency(self.config.mutation_delay).await;

        let replaced = self.records.send_if_modified(|set| {
            match set.iter().position(|r| r.id == id) {
                Some(index) => {
                    Arc::make_mut(set)[index].data = draft;
                    true
                }
                None => false,
            }
        });

        if replaced {
            self.stats.updated.fetch_add(1, Ordering::Relaxed);
            log::debug!("Updated student {id}");
        } else {
            self.stats.missed.fetch_add(1, Ordering::Relaxed);
            log::debug!("Update ignored, no student with id {id}");
        }
        replaced
    }

    /// Remove the record with `id`. Returns `false` when it was not present.
    pub async fn delete(&self, id: &str) -> bool {
        let _pending = self.begin();
        simulate_latency(self.config.mutation_delay).await;

        let removed = self.records.send_if_modified(|set| {
            match set.iter().position(|r| r.id == id) {
                Some(index) => {
                    Arc::make_mut(set).remove(index);
                    true
                }
                None => false,
            }
        });

        if removed {
            self.stats.deleted.fetch_add(1, Ordering::Relaxed);
            log::debug!("Deleted student {id}");
        } else {
            self.stats.missed.fetch_add(1, Ordering::Relaxed);
            log::debug!("Delete ignored, no student with id {id}");
        }
        removed
    }

    fn begin(&self) -> PendingGuard<'_> {
        self.pending.fetch_add(1, Ordering::AcqRel);
        PendingGuard(&self.pending)
    }
}

async fn simulate_latency(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{Gender, SequentialIdGenerator, Status};

    fn draft(first: &str, last: &str) -> StudentDraft {
        StudentDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            grade: "B".to_string(),
            major: "History".to_string(),
            enrollment_date: "2024-02-01".to_string(),
            status: Status::Active,
            gender: Gender::Other,
            phone_number: "555-0000".to_string(),
            address: "1 Main St".to_string(),
        }
    }

    fn test_store() -> CollectionStore {
        CollectionStore::with_id_generator(
            StoreConfig::for_testing(),
            Arc::new(SequentialIdGenerator::default()),
        )
    }

    #[test]
    fn test_store_config_default() {
        let config = StoreConfig::default();
        assert_eq!(config.load_delay, Duration::from_millis(800));
        assert_eq!(config.mutation_delay, Duration::from_millis(600));
        assert!(StoreConfig::for_testing().mutation_delay.is_zero());
    }

    #[tokio::test]
    async fn test_new_store_is_empty_and_loading() {
        let store = test_store();
        assert!(store.is_empty());
        assert!(store.is_loading());
        assert!(!store.is_pending());
    }

    #[tokio::test]
    async fn test_load_seeds_five_records() {
        let store = test_store();
        assert_eq!(store.load().await, 5);
        assert!(!store.is_loading());
        assert_eq!(store.len(), 5);
        assert_eq!(store.list()[0].id, "stu-1");
    }

    #[tokio::test]
    async fn test_create_appends() {
        let store = test_store();
        store.load().await;

        let created = store.create(draft("Ada", "Lovelace")).await;
        assert_eq!(created.id, "stu-6");

        let list = store.list();
        assert_eq!(list.len(), 6);
        assert_eq!(list.last().unwrap(), &created);
        assert_eq!(store.stats().created, 1);
    }

    #[tokio::test]
    async fn test_update_keeps_id() {
        let store = test_store();
        let created = store.create(draft("Ada", "Lovelace")).await;

        assert!(store.update(&created.id, draft("Ada", "King")).await);
        let updated = store.get(&created.id).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.data.last_name, "King");
    }

    #[tokio::test]
    async fn test_unknown_ids_are_noops() {
        let store = test_store();
        store.load().await;
        let before = store.list();

        assert!(!store.update("missing", draft("X", "Y")).await);
        assert!(!store.delete("missing").await);

        assert_eq!(store.list(), before);
        assert_eq!(store.stats().missed, 2);
    }

    #[tokio::test]
    async fn test_snapshots_are_copy_on_write() {
        let store = test_store();
        store.load().await;
        let before = store.list();
        let first = before[0].id.clone();

        store.delete(&first).await;

        assert_eq!(before.len(), 5);
        assert_eq!(before[0].id, first);
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn test_subscribe_sees_changes_only() {
        let store = test_store();
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.delete("missing").await;
        assert!(!rx.has_changed().unwrap());

        store.create(draft("Ada", "Lovelace")).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutation_waits_for_latency() {
        let store = Arc::new(CollectionStore::new(StoreConfig::default()));

        let task = {
            let store = store.clone();
            tokio::spawn(async move { store.create(draft("Ada", "Lovelace")).await })
        };

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(store.is_pending());
        assert!(store.is_empty());

        let record = task.await.unwrap();
        assert!(!store.is_pending());
        assert_eq!(store.list()[0], record);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_waits_for_latency() {
        let store = Arc::new(CollectionStore::new(StoreConfig::default()));
        let task = {
            let store = store.clone();
            tokio::spawn(async move { store.load().await })
        };

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert!(store.is_loading());

        assert_eq!(task.await.unwrap(), 5);
        assert!(!store.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_operation_clears_pending() {
        let store = CollectionStore::new(StoreConfig::default());
        {
            let op = store.delete("anything");
            tokio::pin!(op);
            let _ = tokio::time::timeout(Duration::from_millis(10), &mut op).await;
            assert!(store.is_pending());
        }
        assert!(!store.is_pending());
    }
}
