use anyhow::{bail, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use gacha_application::commands::import_commands;
use gacha_application::queries::statistics_queries;
use gacha_application::AppState;
use gacha_domain::{format_day, ImportRequestPayload};
use gacha_interfaces_http::build_router;

use crate::context::AppContext;

const MAX_BODY_BYTES: usize = 64 * 1024;

fn build_router_with_layers(state: AppState) -> Router {
    build_router(state.clone())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            state.config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_standalone() -> Result<()> {
    let context = AppContext::new().await?;
    let state = context.state;

    let app = build_router_with_layers(state.clone());
    let addr: std::net::SocketAddr = state.config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Runs one import in the foreground; progress goes to the log.
pub async fn run_import_once(token: String, email: String, server: Option<String>) -> Result<()> {
    let context = AppContext::new().await?;
    let state = context.state;

    let payload = ImportRequestPayload {
        token,
        email,
        server,
    };
    let ticket = import_commands::begin_import(&state, payload)?;
    let summary = match import_commands::execute_import_supervised(&state, ticket).await {
        Ok(summary) => summary,
        Err(err) => {
            println!("import failed: {}", err);
            return Err(err.into());
        }
    };
    println!("{}", summary.status_line());
    if !summary.failed_categories.is_empty() {
        let failed = summary
            .failed_categories
            .iter()
            .map(|category| category.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!("incomplete categories: {}", failed);
    }
    if !summary.persisted {
        bail!("store {} could not be written", state.config.store_path);
    }
    Ok(())
}

pub async fn print_stats() -> Result<()> {
    let context = AppContext::new().await?;
    let state = context.state;

    let stats = statistics_queries::get_statistics(&state).await;
    println!("total pulls: {}", stats.total_records);
    println!("multis: {}", stats.multi_count);
    if let (Some(oldest), Some(newest)) = (stats.oldest, stats.newest) {
        println!("range: {} .. {}", format_day(oldest), format_day(newest));
    }
    println!("computed: {}", stats.last_update.format("%Y-%m-%d %H:%M:%S"));

    for share in statistics_queries::category_breakdown(&state).await {
        println!(
            "{:<24} {:>6} {:>6.1}%",
            share.localization_key, share.count, share.percent
        );
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("sigterm handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
