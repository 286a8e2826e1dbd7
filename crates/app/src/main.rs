use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use churn_core::client::http::HttpPredictionClient;
use churn_core::config::Settings;

mod app;
mod ui;
mod worker;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Parser)]
#[command(name = "churn_app")]
struct Args {
    /// Base URL of the prediction service. Defaults to PREDICT_BASE_URL,
    /// then the local development server.
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds. No timeout when omitted.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut settings = Settings::from_env()?;
    if args.base_url.is_some() {
        settings.predict_base_url = args.base_url;
    }
    if args.timeout_secs.is_some() {
        settings.predict_timeout_secs = args.timeout_secs;
    }
    if settings.predict_base_url.is_none() {
        settings.predict_base_url = Some(DEFAULT_BASE_URL.to_string());
    }

    let _sentry_guard = init_sentry(&settings);
    let _log_guard = init_logging()?;

    let client = Arc::new(HttpPredictionClient::from_settings(&settings)?);
    let runtime = tokio::runtime::Runtime::new()?;

    tracing::info!(
        base_url = settings.predict_base_url.as_deref().unwrap_or_default(),
        "starting churn prediction client"
    );

    let mut app = app::App::new(client, runtime.handle().clone());
    app.run()?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// The TUI owns the terminal, so interactive runs log to a file; piped
/// runs log to stdout.
fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let (writer, guard) = if std::io::stdout().is_terminal() {
        let log_file =
            std::env::var("CHURN_LOG_FILE").unwrap_or_else(|_| "churn_app.log".to_string());
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .with(sentry_tracing::layer())
        .init();

    Ok(guard)
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
