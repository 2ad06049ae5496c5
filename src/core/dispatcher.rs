use crate::core::{BatchReport, ConfigProvider, FetchOutcome, PageFetcher, PageReport};
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fans a page range out over a bounded set of concurrent requests.
pub struct FetchDispatcher<F: PageFetcher> {
    fetcher: Arc<F>,
    pages: RangeInclusive<u32>,
    workers: usize,
}

impl<F: PageFetcher + 'static> FetchDispatcher<F> {
    pub fn new<C: ConfigProvider>(fetcher: F, config: &C) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            pages: config.pages(),
            workers: config.workers(),
        }
    }

    /// Runs every page once. `on_report` is called as each page finishes,
    /// in completion order, from the calling task only.
    pub async fn run<R>(&self, mut on_report: R) -> BatchReport
    where
        R: FnMut(&PageReport),
    {
        let start = Instant::now();
        // never closed, so acquiring a permit only fails on a broken invariant
        let semaphore = Arc::new(Semaphore::new(
            self.workers.clamp(1, Semaphore::MAX_PERMITS),
        ));
        let mut tasks = JoinSet::new();
        let mut pages_by_task = HashMap::new();

        tracing::info!(
            "🚀 Dispatching pages {}..={} with up to {} in flight",
            self.pages.start(),
            self.pages.end(),
            self.workers
        );

        for page in self.pages.clone() {
            let fetcher = Arc::clone(&self.fetcher);
            let semaphore = Arc::clone(&semaphore);
            let handle = tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    tracing::error!("❌ Worker pool closed before page {} started", page);
                    return PageReport::new(
                        page,
                        FetchOutcome::TransportError {
                            message: "worker pool closed".to_string(),
                        },
                    );
                };
                PageReport::new(page, fetcher.fetch_page(page).await)
            });
            pages_by_task.insert(handle.id(), page);
        }

        let mut reports = Vec::with_capacity(pages_by_task.len());
        while let Some(joined) = tasks.join_next().await {
            let report = match joined {
                Ok(report) => report,
                Err(e) => {
                    let page = pages_by_task.get(&e.id()).copied().unwrap_or_default();
                    tracing::error!("❌ Fetch task for page {} did not complete: {}", page, e);
                    PageReport::new(
                        page,
                        FetchOutcome::TransportError {
                            message: format!("fetch task aborted: {}", e),
                        },
                    )
                }
            };
            match &report.outcome {
                FetchOutcome::Success => tracing::debug!("Page {} done", report.page),
                _ => tracing::warn!("⚠️ {}", report),
            }
            on_report(&report);
            reports.push(report);
        }

        let batch = BatchReport {
            reports,
            elapsed: start.elapsed(),
        };

        tracing::info!(
            "✅ Batch finished: {} succeeded, {} failed in {:?}",
            batch.success_count(),
            batch.failure_count(),
            batch.elapsed
        );

        batch
    }
}
