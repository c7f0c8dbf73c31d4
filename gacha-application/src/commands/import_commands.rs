use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::anyhow;
use tracing::{error, info, warn};

use crate::commands::merge_commands;
use crate::ingest::{FetchStop, PaginatedFetcher};
use crate::{AppError, AppState};
use gacha_domain::ports::{ProgressSink, SilentProgress};
use gacha_domain::{
    compute_statistics, now_local, ImportCredentials, ImportOutcome, ImportRequestPayload,
    ImportSummary, ServerRegion,
};

/// Holds the single import slot until dropped.
#[derive(Debug)]
pub struct ImportGuard {
    flag: Arc<AtomicBool>,
}

impl ImportGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: flag.clone() })
    }
}

impl Drop for ImportGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// A validated import that owns the import slot.
#[derive(Debug)]
pub struct ImportTicket {
    credentials: ImportCredentials,
    _guard: ImportGuard,
}

impl ImportTicket {
    pub fn credentials(&self) -> &ImportCredentials {
        &self.credentials
    }
}

/// Claims the import slot and validates the request without touching the network.
/// On success the live status already shows the new import as running.
pub fn begin_import(state: &AppState, payload: ImportRequestPayload) -> Result<ImportTicket, AppError> {
    let guard = ImportGuard::acquire(&state.import_busy).ok_or(AppError::Busy)?;

    let token = payload.token.trim();
    let email = payload.email.trim();
    if token.is_empty() || email.is_empty() {
        return Err(AppError::BadRequest(
            "token and email are required".to_string(),
        ));
    }

    let server = match payload.server.as_deref().map(str::trim) {
        None | Some("") => state.config.default_server,
        Some(value) => ServerRegion::lookup(value).unwrap_or_else(|| {
            warn!("unknown server '{}', using {}", value, ServerRegion::default().code());
            ServerRegion::default()
        }),
    };

    {
        let mut status = state.lock_import_status();
        status.running = true;
        status.started_at = Some(now_local());
        status.finished_at = None;
        status.messages.clear();
        status.last_summary = None;
        status.last_error = None;
    }

    Ok(ImportTicket {
        credentials: ImportCredentials {
            token: token.to_string(),
            email: email.to_string(),
            server,
        },
        _guard: guard,
    })
}

/// Runs a claimed import to completion. Exactly one terminal status line is
/// reported; the import slot is released when the ticket drops.
pub async fn execute_import(
    state: &AppState,
    ticket: ImportTicket,
    progress: &dyn ProgressSink,
) -> ImportSummary {
    let recorder = StatusRecorder {
        state,
        inner: progress,
    };
    state.metrics.record_import_started();

    let summary = import_categories(state, ticket.credentials(), &recorder).await;
    recorder.report(&summary.status_line());

    {
        let mut status = state.lock_import_status();
        status.running = false;
        status.finished_at = Some(now_local());
        status.last_summary = Some(summary.clone());
    }
    drop(ticket);
    summary
}

/// Validates and runs an import in the caller's task.
pub async fn run_import(
    state: &AppState,
    payload: ImportRequestPayload,
    progress: &dyn ProgressSink,
) -> Result<ImportSummary, AppError> {
    let ticket = begin_import(state, payload)?;
    Ok(execute_import(state, ticket, progress).await)
}

/// Runs a claimed import on its own task. A panic inside the import is
/// recorded as a failed import and returned as an internal error.
pub async fn execute_import_supervised(
    state: &AppState,
    ticket: ImportTicket,
) -> Result<ImportSummary, AppError> {
    let task_state = state.clone();
    let task = tokio::spawn(async move {
        execute_import(&task_state, ticket, &SilentProgress).await
    });
    match task.await {
        Ok(summary) => Ok(summary),
        Err(err) => {
            let message = err.to_string();
            error!("import task aborted: {}", message);
            record_import_failure(state, &message);
            Err(AppError::Internal(anyhow!("import task aborted: {}", message)))
        }
    }
}

/// Marks the running import as failed outside the normal path, e.g. after a
/// panic in the import task.
pub fn record_import_failure(state: &AppState, message: &str) {
    state.metrics.record_import_failed();
    let mut status = state.lock_import_status();
    status.running = false;
    status.finished_at = Some(now_local());
    status.messages.push(format!("import failed: {}", message));
    status.last_error = Some(message.to_string());
}

async fn import_categories(
    state: &AppState,
    credentials: &ImportCredentials,
    progress: &dyn ProgressSink,
) -> ImportSummary {
    progress.report(&format!("import started for {}", credentials.email));
    progress.report(&format!("server: {}", credentials.server.display_name()));
    if state.config.page_limit.is_unlimited() {
        progress.report("page limit: unlimited");
    } else {
        progress.report(&format!(
            "page limit: {} pages",
            i64::from(state.config.page_limit)
        ));
    }

    let before = {
        let store = state.store_repo.load().await;
        compute_statistics(&store.records, now_local())
    };
    progress.report(&format!(
        "current store: {} pulls, {} multis",
        before.total_records, before.multi_count
    ));

    let fetcher = PaginatedFetcher::new(
        state.history_source.clone(),
        state.config.fetch_policy(),
        state.metrics.clone(),
    );

    let mut batch = Vec::new();
    let mut failed_categories = Vec::new();
    for category in &state.config.categories {
        progress.report(&format!("fetching type_id {}", category));
        let harvest = fetcher.fetch_category(credentials, category, progress).await;
        if harvest.stop == FetchStop::RetriesExhausted {
            failed_categories.push(category.clone());
        }
        if harvest.records.is_empty() {
            progress.report(&format!("type_id {}: no data", category));
        } else {
            progress.report(&format!(
                "type_id {}: {} pulls fetched",
                category,
                harvest.records.len()
            ));
            batch.extend(harvest.records);
        }
    }

    if batch.is_empty() {
        info!("import fetched nothing");
        return ImportSummary {
            server: credentials.server,
            fetched: 0,
            added: 0,
            duplicates: 0,
            persisted: true,
            failed_categories,
            outcome: ImportOutcome::NoNewData,
        };
    }

    let report = merge_commands::merge_new_records(state, &batch).await;
    progress.report(&format!(
        "fetched {} pulls, {} new, {} duplicates skipped",
        batch.len(),
        report.added,
        report.duplicates
    ));
    info!(
        "import merged {} of {} pulls (store now {})",
        report.added,
        batch.len(),
        report.total_records
    );

    ImportSummary {
        server: credentials.server,
        fetched: batch.len(),
        added: report.added,
        duplicates: report.duplicates,
        persisted: report.persisted,
        failed_categories,
        outcome: if report.added > 0 {
            ImportOutcome::Added(report.added)
        } else {
            ImportOutcome::NoNewData
        },
    }
}

/// Mirrors progress into the shared import status.
struct StatusRecorder<'a> {
    state: &'a AppState,
    inner: &'a dyn ProgressSink,
}

impl ProgressSink for StatusRecorder<'_> {
    fn report(&self, message: &str) {
        info!("{}", message);
        self.state
            .lock_import_status()
            .messages
            .push(message.to_string());
        self.inner.report(message);
    }
}
