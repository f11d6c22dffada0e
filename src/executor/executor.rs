//! Sales query engine
//!
//! Request flow (strict order):
//! 1. Plan: validate and compile parameters; rejections touch no records
//! 2. Execute the plan on the record source (filter, stats, sort, page, tags)
//! 3. Assemble the response envelope
//!
//! Store failures are logged here, once, for every caller.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use super::errors::EngineResult;
use super::result::QueryResult;
use crate::observability::Event;
use crate::planner::{QueryPlan, QueryPlanner, QueryRequest};
use crate::storage::{RecordSource, ReloadSummary, StoreError};

/// Serves listing queries over one record source
#[derive(Clone)]
pub struct SalesQueryEngine {
    source: Arc<dyn RecordSource>,
}

impl SalesQueryEngine {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<dyn RecordSource> {
        &self.source
    }

    /// Plans and executes a raw request
    pub async fn query(&self, request: &QueryRequest) -> EngineResult<QueryResult> {
        let plan = QueryPlanner::plan(request).map_err(|err| {
            warn!(
                event = %Event::QueryRejected,
                code = %err.code(),
                parameter = err.parameter().unwrap_or(""),
                "query rejected"
            );
            err
        })?;
        self.execute(&plan).await
    }

    /// Executes an already validated plan
    pub async fn execute(&self, plan: &QueryPlan) -> EngineResult<QueryResult> {
        let started = Instant::now();
        let output = self
            .source
            .execute(plan)
            .await
            .map_err(|err| self.log_failure(err))?;

        info!(
            event = %Event::QueryServed,
            source = %self.source.kind(),
            total = output.page.total,
            page = output.page.page,
            limit = output.page.limit,
            returned = output.records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "query served"
        );
        Ok(QueryResult::from(output))
    }

    /// Reloads the source dataset. Sources without a reload path answer
    /// `ReloadUnsupported`, which is not logged as a failure.
    pub async fn reload(&self) -> EngineResult<ReloadSummary> {
        match self.source.reload().await {
            Ok(summary) => Ok(summary),
            Err(err @ StoreError::ReloadUnsupported(_)) => Err(err.into()),
            Err(err) => Err(self.log_failure(err).into()),
        }
    }

    fn log_failure(&self, err: StoreError) -> StoreError {
        error!(
            event = %Event::SourceFailed,
            source = %self.source.kind(),
            code = err.code(),
            error = %err,
            "record source failed"
        );
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::EngineError;
    use crate::model::SalesRecord;
    use crate::storage::{MemoryStore, SourceKind, SourceOutput, StoreResult};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::io::{self, Write};
    use std::sync::Mutex;
    use tracing::instrument::WithSubscriber;

    /// Collects formatted log lines
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
            let logs = self.clone();
            tracing_subscriber::fmt()
                .with_writer(move || logs.clone())
                .with_ansi(false)
                .with_max_level(tracing::Level::DEBUG)
                .finish()
        }

        fn count(&self, needle: &str) -> usize {
            String::from_utf8_lossy(&self.0.lock().unwrap()).matches(needle).count()
        }
    }

    /// Source whose queries always fail
    struct BrokenSource;

    #[async_trait]
    impl RecordSource for BrokenSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Postgres
        }

        async fn record_count(&self) -> StoreResult<u64> {
            Err(StoreError::Query("relation does not exist".into()))
        }

        async fn execute(&self, _plan: &QueryPlan) -> StoreResult<SourceOutput> {
            Err(StoreError::Query("relation does not exist".into()))
        }
    }

    fn engine() -> SalesQueryEngine {
        let records = (1..=8)
            .map(|i| SalesRecord {
                transaction_id: format!("T{}", i),
                date: NaiveDate::from_ymd_opt(2023, 1, i).unwrap(),
                age: 20 + i,
                quantity: 1,
                ..Default::default()
            })
            .collect();
        SalesQueryEngine::new(Arc::new(MemoryStore::new(records)))
    }

    #[tokio::test]
    async fn test_query_defaults() {
        let result = engine().query(&QueryRequest::default()).await.unwrap();
        assert_eq!(result.len(), 8);
        assert_eq!(result.data[0].transaction_id, "T8");
        assert_eq!(result.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_rejected_query_is_validation_error() {
        let request = QueryRequest {
            min_age: Some("50".into()),
            max_age: Some("20".into()),
            ..Default::default()
        };
        let err = engine().query(&request).await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert_eq!(err.code(), "INVALID_AGE_RANGE");
    }

    #[tokio::test]
    async fn test_store_failure_logged_once() {
        let logs = CapturedLogs::default();
        let engine = SalesQueryEngine::new(Arc::new(BrokenSource));

        let err = engine
            .query(&QueryRequest::default())
            .with_subscriber(logs.subscriber())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "STORE_QUERY_FAILED");
        assert_eq!(logs.count("SOURCE_FAILED"), 1);
    }

    #[tokio::test]
    async fn test_unsupported_reload_is_not_a_failure() {
        let logs = CapturedLogs::default();
        let engine = SalesQueryEngine::new(Arc::new(BrokenSource));

        let err = engine.reload().with_subscriber(logs.subscriber()).await.unwrap_err();

        assert_eq!(err.code(), "RELOAD_UNSUPPORTED");
        assert_eq!(logs.count("SOURCE_FAILED"), 0);
        assert_eq!(logs.count("ERROR"), 0);
    }

    #[tokio::test]
    async fn test_page_beyond_end_is_clamped() {
        let request = QueryRequest {
            page: Some("99".into()),
            limit: Some("10".into()),
            ..Default::default()
        };
        let result = engine().query(&request).await.unwrap();
        assert_eq!(result.pagination.page, 1);
        assert_eq!(result.len(), 8);
    }
}
