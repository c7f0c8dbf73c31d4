use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "gacha-tracker")]
#[command(about = "Gacha pull history tracker", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the local HTTP API (default)
    Serve,
    /// Fetch and merge pull history once
    Import {
        #[arg(long)]
        token: String,
        #[arg(long)]
        email: String,
        /// Server code or display name
        #[arg(long)]
        server: Option<String>,
    },
    /// Print statistics for the local store
    Stats,
}

fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());

    match std::env::var("GACHA_LOG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "gacha-tracker.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        _ => {
            registry.init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_tracing();

    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("GACHA_CONFIG", config);
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => gacha_bootstrap::run_standalone().await,
        Command::Import {
            token,
            email,
            server,
        } => gacha_bootstrap::run_import_once(token, email, server).await,
        Command::Stats => gacha_bootstrap::print_stats().await,
    }
}
