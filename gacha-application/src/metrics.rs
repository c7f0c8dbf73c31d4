use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    imports_started: AtomicU64,
    imports_failed: AtomicU64,
    pages_fetched: AtomicU64,
    fetch_retries: AtomicU64,
    fetch_failures: AtomicU64,
    records_added: AtomicU64,
    duplicates_skipped: AtomicU64,
}

impl Metrics {
    pub fn record_import_started(&self) {
        self.imports_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_import_failed(&self) {
        self.imports_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_page(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retry(&self) {
        self.fetch_retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_merge(&self, added: usize, duplicates: usize) {
        self.records_added.fetch_add(added as u64, Ordering::Relaxed);
        self.duplicates_skipped
            .fetch_add(duplicates as u64, Ordering::Relaxed);
    }

    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched.load(Ordering::Relaxed)
    }

    pub fn fetch_retries(&self) -> u64 {
        self.fetch_retries.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let started = self.imports_started.load(Ordering::Relaxed);
        let failed = self.imports_failed.load(Ordering::Relaxed);
        let pages = self.pages_fetched.load(Ordering::Relaxed);
        let retries = self.fetch_retries.load(Ordering::Relaxed);
        let failures = self.fetch_failures.load(Ordering::Relaxed);
        let added = self.records_added.load(Ordering::Relaxed);
        let duplicates = self.duplicates_skipped.load(Ordering::Relaxed);

        format!(
            "# TYPE gacha_imports_started_total counter\n\
gacha_imports_started_total {}\n\
# TYPE gacha_imports_failed_total counter\n\
gacha_imports_failed_total {}\n\
# TYPE gacha_pages_fetched_total counter\n\
gacha_pages_fetched_total {}\n\
# TYPE gacha_fetch_retries_total counter\n\
gacha_fetch_retries_total {}\n\
# TYPE gacha_fetch_failures_total counter\n\
gacha_fetch_failures_total {}\n\
# TYPE gacha_records_added_total counter\n\
gacha_records_added_total {}\n\
# TYPE gacha_duplicates_skipped_total counter\n\
gacha_duplicates_skipped_total {}\n",
            started, failed, pages, retries, failures, added, duplicates
        )
    }
}
