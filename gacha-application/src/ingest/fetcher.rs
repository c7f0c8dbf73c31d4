use std::sync::Arc;

use tracing::{debug, info, warn};

use gacha_domain::ports::{HistoryPage, ProgressSink, PullHistorySource};
use gacha_domain::{CategoryId, FetchPolicy, ImportCredentials, PullRecord};

use crate::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStop {
    /// The server returned an empty cursor.
    Drained,
    /// The configured page ceiling was hit while the server still had data.
    PageLimit,
    /// A page failed on every attempt; earlier pages are kept.
    RetriesExhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryHarvest {
    pub category: CategoryId,
    pub records: Vec<PullRecord>,
    pub pages: u32,
    pub stop: FetchStop,
}

/// Drains one category page by page. Requests are strictly sequential.
pub struct PaginatedFetcher {
    source: Arc<dyn PullHistorySource>,
    policy: FetchPolicy,
    metrics: Arc<Metrics>,
}

impl PaginatedFetcher {
    pub fn new(
        source: Arc<dyn PullHistorySource>,
        policy: FetchPolicy,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            source,
            policy,
            metrics,
        }
    }

    pub async fn fetch_category(
        &self,
        credentials: &ImportCredentials,
        category: &CategoryId,
        progress: &dyn ProgressSink,
    ) -> CategoryHarvest {
        if self.policy.page_limit.is_unlimited() {
            info!("fetching type_id {}: no page limit", category);
        } else {
            info!(
                "fetching type_id {}: at most {} pages",
                category,
                i64::from(self.policy.page_limit)
            );
        }

        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0u32;

        let stop = loop {
            let page_number = pages + 1;
            let Some(page) = self
                .fetch_page_with_retry(credentials, category, cursor.as_deref(), page_number, progress)
                .await
            else {
                break FetchStop::RetriesExhausted;
            };

            pages = page_number;
            self.metrics.record_page();
            progress.report(&format!("page {}: {} pulls", page_number, page.records.len()));
            debug!(
                "type_id {} page {}: {} records",
                category,
                page_number,
                page.records.len()
            );

            records.extend(page.records);
            cursor = page.next;

            if cursor.is_none() {
                break FetchStop::Drained;
            }
            if self.policy.page_limit.is_reached(pages) {
                info!("type_id {}: page limit reached after {} pages", category, pages);
                break FetchStop::PageLimit;
            }
        };

        info!(
            "type_id {}: {} pulls in {} pages ({:?})",
            category,
            records.len(),
            pages,
            stop
        );
        CategoryHarvest {
            category: category.clone(),
            records,
            pages,
            stop,
        }
    }

    async fn fetch_page_with_retry(
        &self,
        credentials: &ImportCredentials,
        category: &CategoryId,
        cursor: Option<&str>,
        page_number: u32,
        progress: &dyn ProgressSink,
    ) -> Option<HistoryPage> {
        let max_retries = self.policy.max_retries;
        for attempt in 0..=max_retries {
            match self.source.fetch_page(credentials, category, cursor).await {
                Ok(page) => return Some(page),
                Err(err) => {
                    warn!("type_id {} page {} failed: {}", category, page_number, err);
                    progress.report(&format!("page {}: {}", page_number, err));
                    if attempt < max_retries {
                        self.metrics.record_retry();
                        progress.report(&format!("retrying ({}/{})", attempt + 1, max_retries));
                    }
                }
            }
        }
        self.metrics.record_fetch_failure();
        None
    }
}
