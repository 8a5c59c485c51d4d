mod api;
mod aqi;
mod cli;
mod config;
mod error;
mod models;
mod server;
mod service;

use clap::Parser;
use cli::{Cli, LogFormat};
use service::Resolver;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "global_air_dashboard=info,tower_http=info";
const LOG_FILE_NAME: &str = "global-air-dashboard.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may be set directly
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(&cli);

    let config = cli.to_config();
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    info!(
        "Environment check - API key present: {}, USE_SAMPLE_DATA: {}",
        config.upstream.api_key.is_some(),
        config.upstream.force_sample_data
    );

    let resolver = Resolver::new(&config);
    if resolver.upstream_enabled() {
        info!("Using OpenAQ at {}", config.upstream.base_url);
    } else {
        warn!("OpenAQ disabled, serving sample data only");
    }

    server::serve(&config, resolver).await.map_err(|e| {
        error!("Server error: {}", e);
        e.into()
    })
}

/// Installs the global subscriber: stdout in the chosen format plus an optional
/// daily-rotated file in `--log-dir`.
fn init_tracing(cli: &Cli) -> Option<WorkerGuard> {
    let stdout_layer = match cli.log_format {
        LogFormat::Pretty => fmt::layer().boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    };

    let (file_layer, guard) = match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        },
        None => (None, None),
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .with(filter)
        .init();

    guard
}
