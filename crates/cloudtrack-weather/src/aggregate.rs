use crate::config::AggregatorConfig;
use crate::fetch::ReportSource;
use crate::query::Query;
use crate::report::WeatherReport;
use eyre::eyre;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Reports collected during one run, appended to by every unit.
///
/// Each append holds the lock for exactly one whole report.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    inner: Arc<Mutex<Vec<WeatherReport>>>,
}

impl ResultSet {
    pub async fn push(&self, report: WeatherReport) {
        self.inner.lock().await.push(report);
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Move the collected reports out, leaving the set empty.
    pub async fn take(&self) -> Vec<WeatherReport> {
        std::mem::take(&mut *self.inner.lock().await)
    }
}

/// Fans queries out to a [`ReportSource`] and gathers whatever succeeds.
pub struct Aggregator<S> {
    source: Arc<S>,
    config: AggregatorConfig,
}

impl<S: ReportSource> Aggregator<S> {
    pub fn new(source: S, config: AggregatorConfig) -> Self {
        Self {
            source: Arc::new(source),
            config,
        }
    }

    /// Fetch every query concurrently and return the reports that succeeded.
    ///
    /// Reports come back in completion order, not input order. Failed units
    /// are logged and contribute nothing. Returns once every unit has
    /// finished, or once the configured deadline passes, in which case
    /// units still running are aborted.
    pub async fn aggregate(&self, queries: Vec<Query>) -> Vec<WeatherReport> {
        let results = ResultSet::default();
        let permits = self.config.max_concurrency.clamp(1, Semaphore::MAX_PERMITS);
        let rate_limit = Arc::new(Semaphore::new(permits));
        let mut join_set = JoinSet::new();
        for query in queries {
            let source = self.source.clone();
            let results = results.clone();
            let rate_limit = rate_limit.clone();
            let request_timeout = self.config.request_timeout;
            join_set.spawn(async move {
                let _permit = rate_limit.acquire().await;
                match run_unit(source.as_ref(), &query, request_timeout).await {
                    Ok(report) => {
                        debug!("Got report for {}", query);
                        results.push(report).await;
                    }
                    Err(e) => {
                        warn!("Skipping {} due to error: {:?}", query, e);
                    }
                }
            });
        }

        let total_tasks = join_set.len();
        // A deadline too far out to represent is no deadline.
        let deadline = self
            .config
            .deadline
            .and_then(|x| Instant::now().checked_add(x));
        loop {
            let next = match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline, join_set.join_next()).await {
                        Ok(next) => next,
                        Err(_) => {
                            warn!(
                                "Deadline reached with {} lookups still running, aborting them",
                                join_set.len()
                            );
                            join_set.abort_all();
                            while join_set.join_next().await.is_some() {}
                            break;
                        }
                    }
                }
                None => join_set.join_next().await,
            };
            match next {
                None => break,
                Some(Err(e)) if e.is_panic() => warn!("Lookup task panicked: {:?}", e),
                Some(_) => {}
            }
        }

        let reports = results.take().await;
        info!("{} of {} lookups succeeded", reports.len(), total_tasks);
        reports
    }
}

async fn run_unit<S: ReportSource>(
    source: &S,
    query: &Query,
    request_timeout: Option<Duration>,
) -> eyre::Result<WeatherReport> {
    match request_timeout {
        Some(limit) => tokio::time::timeout(limit, source.fetch_report(query))
            .await
            .map_err(|_| eyre!("Timed out after {:?}", limit))?,
        None => source.fetch_report(query).await,
    }
}
