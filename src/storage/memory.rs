//! In-memory record store
//!
//! Holds the whole dataset as an immutable snapshot behind an `ArcSwap`.
//! Each request loads the current snapshot once and evaluates the plan
//! against it; a reload publishes a new snapshot atomically, so in-flight
//! requests finish on the version they started with. Reloads are
//! serialized, and a snapshot never replaces one with a higher version.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::loader::CsvLoader;
use super::{RecordSource, ReloadSummary, SourceKind, SourceOutput, StoreError, StoreResult};
use crate::executor::{Aggregator, Paginator, PredicateFilter, ResultSorter, TagVocabulary};
use crate::model::SalesRecord;
use crate::observability::Event;
use crate::planner::QueryPlan;

/// Immutable view of the dataset
#[derive(Debug)]
pub struct Snapshot {
    records: Vec<SalesRecord>,
    tags: Vec<String>,
    version: u64,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    fn new(records: Vec<SalesRecord>, version: u64) -> Self {
        let tags = TagVocabulary::extract(&records);
        Self {
            records,
            tags,
            version,
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Tag vocabulary, computed once at load
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Monotonic version, starting at 1
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Evaluates `plan` against this snapshot.
    ///
    /// Filter, then stats over the full filtered set, then sort, then slice.
    pub fn evaluate(&self, plan: &QueryPlan) -> SourceOutput {
        let mut matched = PredicateFilter::apply(&self.records, &plan.filter);
        let stats = Aggregator::summarize(&matched);
        ResultSorter::sort(&mut matched, &plan.sort);

        let page = Paginator::resolve(matched.len() as u64, plan.page);
        let records = Paginator::slice(&matched, &page)
            .iter()
            .map(|r| (*r).clone())
            .collect();

        SourceOutput {
            records,
            stats,
            page,
            tags: self.tags.clone(),
        }
    }
}

/// Snapshot-backed record source, optionally tied to a CSV file
pub struct MemoryStore {
    snapshot: ArcSwap<Snapshot>,
    /// Last version handed out
    version: AtomicU64,
    origin: Option<PathBuf>,
    /// Held across parse and publish
    reload_lock: Mutex<()>,
}

impl MemoryStore {
    /// Store over records already in memory. Reload is unsupported.
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self::with_snapshot(Snapshot::new(records, 1), None)
    }

    /// Loads the CSV at `path`. Reload re-reads the same file.
    pub fn from_csv(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let records = CsvLoader::new(&path).load()?;
        let snapshot = Snapshot::new(records, 1);
        info!(
            event = %Event::SnapshotLoaded,
            path = %path.display(),
            records = snapshot.record_count(),
            tags = snapshot.tags().len(),
            "dataset loaded"
        );
        Ok(Self::with_snapshot(snapshot, Some(path)))
    }

    fn with_snapshot(snapshot: Snapshot, origin: Option<PathBuf>) -> Self {
        Self {
            version: AtomicU64::new(snapshot.version),
            snapshot: ArcSwap::from_pointee(snapshot),
            origin,
            reload_lock: Mutex::new(()),
        }
    }

    /// Current snapshot. Stays valid after a reload.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.load_full()
    }

    /// Publishes `records` under the next version and returns that snapshot.
    /// If a concurrent call already published a higher version, it stays live.
    pub fn replace(&self, records: Vec<SalesRecord>) -> Arc<Snapshot> {
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        let next = Arc::new(Snapshot::new(records, version));
        self.snapshot.rcu(|current| {
            if current.version > next.version {
                Arc::clone(current)
            } else {
                Arc::clone(&next)
            }
        });
        next
    }
}

#[async_trait]
impl RecordSource for MemoryStore {
    fn kind(&self) -> SourceKind {
        SourceKind::Csv
    }

    async fn record_count(&self) -> StoreResult<u64> {
        Ok(self.snapshot.load().record_count() as u64)
    }

    async fn execute(&self, plan: &QueryPlan) -> StoreResult<SourceOutput> {
        let snapshot = self.snapshot.load_full();
        let output = snapshot.evaluate(plan);
        debug!(
            event = %Event::SourceExecuted,
            source = "csv",
            version = snapshot.version(),
            matched = output.page.total,
            "plan evaluated in memory"
        );
        Ok(output)
    }

    async fn reload(&self) -> StoreResult<ReloadSummary> {
        let path = self
            .origin
            .as_ref()
            .ok_or(StoreError::ReloadUnsupported(SourceKind::Csv))?;

        let _guard = self.reload_lock.lock().await;

        // Parse outside the swap; a failed load leaves the old snapshot live
        let loader = CsvLoader::new(path);
        let records = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| StoreError::Io {
                path: path.display().to_string(),
                message: e.to_string(),
            })??;

        let snapshot = self.replace(records);
        info!(
            event = %Event::SnapshotReloaded,
            version = snapshot.version(),
            records = snapshot.record_count(),
            loaded_at = %snapshot.loaded_at,
            "dataset reloaded"
        );
        Ok(ReloadSummary {
            record_count: snapshot.record_count() as u64,
            tags: snapshot.tags().len() as u64,
            version: snapshot.version(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SalesField;
    use crate::planner::{PageRequest, QueryPlanner, QueryRequest, SortSpec};
    use chrono::NaiveDate;
    use std::io::Write;

    fn record(id: &str, day: u32, tags: &str) -> SalesRecord {
        SalesRecord {
            transaction_id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2023, 3, day).unwrap(),
            quantity: 1,
            tags: tags.to_string(),
            ..Default::default()
        }
    }

    fn dataset() -> Vec<SalesRecord> {
        vec![
            record("T1", 1, "new"),
            record("T2", 3, "loyal"),
            record("T3", 2, "new, promo"),
        ]
    }

    #[test]
    fn test_snapshot_computes_tags_once() {
        let store = MemoryStore::new(dataset());
        let snapshot = store.snapshot();
        assert_eq!(snapshot.version(), 1);
        assert_eq!(snapshot.tags(), &["loyal", "new", "promo"]);
    }

    #[test]
    fn test_evaluate_sorts_before_slicing() {
        let store = MemoryStore::new(dataset());
        let plan = QueryPlanner::plan(&QueryRequest::default()).unwrap();
        let output = store.snapshot().evaluate(&plan);
        let ids: Vec<_> = output.records.iter().map(|r| r.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["T2", "T3", "T1"]);
        assert_eq!(output.stats.total_units, 3);
        assert_eq!(output.page.total, 3);
    }

    #[test]
    fn test_stats_cover_all_pages() {
        let store = MemoryStore::new(dataset());
        let plan = QueryPlan {
            filter: Default::default(),
            sort: SortSpec::asc(SalesField::TransactionId),
            page: PageRequest::new(2, 2),
        };
        let output = store.snapshot().evaluate(&plan);
        assert_eq!(output.records.len(), 1);
        assert_eq!(output.records[0].transaction_id, "T3");
        assert_eq!(output.stats.total_units, 3);
    }

    #[test]
    fn test_replace_bumps_version_and_keeps_old_snapshot() {
        let store = MemoryStore::new(dataset());
        let before = store.snapshot();
        let after = store.replace(vec![record("T9", 9, "vip")]);

        assert_eq!(after.version(), 2);
        assert_eq!(before.record_count(), 3);
        assert_eq!(store.snapshot().record_count(), 1);
        assert_eq!(store.snapshot().tags(), &["vip"]);
    }

    #[test]
    fn test_concurrent_replace_hands_out_unique_versions() {
        let store = MemoryStore::new(dataset());
        let shared = &store;
        let mut versions: Vec<u64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| scope.spawn(move || shared.replace(vec![record("T9", 9 + i, "x")])))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap().version()).collect()
        });
        versions.sort_unstable();

        assert_eq!(versions, (2..=9).collect::<Vec<_>>());
        assert_eq!(store.snapshot().version(), 9);
    }

    #[tokio::test]
    async fn test_concurrent_reloads_publish_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Transaction ID,Date").unwrap();
        writeln!(file, "T1,2023-01-01").unwrap();
        file.flush().unwrap();

        let store = MemoryStore::from_csv(file.path()).unwrap();
        let (first, second) = tokio::join!(store.reload(), store.reload());

        let mut versions = vec![first.unwrap().version, second.unwrap().version];
        versions.sort_unstable();
        assert_eq!(versions, vec![2, 3]);
        assert_eq!(store.snapshot().version(), 3);
    }

    #[tokio::test]
    async fn test_reload_without_origin_is_unsupported() {
        let store = MemoryStore::new(dataset());
        let err = store.reload().await.unwrap_err();
        assert_eq!(err.code(), "RELOAD_UNSUPPORTED");
    }

    #[tokio::test]
    async fn test_reload_rereads_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Transaction ID,Date,Quantity,Tags").unwrap();
        writeln!(file, "T1,2023-01-01,2,a").unwrap();
        file.flush().unwrap();

        let store = MemoryStore::from_csv(file.path()).unwrap();
        assert_eq!(store.record_count().await.unwrap(), 1);

        writeln!(file, "T2,2023-01-02,3,b").unwrap();
        file.flush().unwrap();

        let summary = store.reload().await.unwrap();
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.tags, 2);
        assert_eq!(summary.version, 2);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Transaction ID,Date").unwrap();
        writeln!(file, "T1,2023-01-01").unwrap();
        file.flush().unwrap();

        let store = MemoryStore::from_csv(file.path()).unwrap();
        writeln!(file, "T2,not-a-date").unwrap();
        file.flush().unwrap();

        assert!(store.reload().await.is_err());
        assert_eq!(store.snapshot().version(), 1);
        assert_eq!(store.record_count().await.unwrap(), 1);
    }
}
