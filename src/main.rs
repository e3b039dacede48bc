use anyhow::Context;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

use seat_monitor::{
    config::{AppConfig, Config, LogFormat, UiMode},
    headless, ui, SeatApiClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    init_tracing(&config.app)?;

    info!("Starting seat monitor ({:?} mode)", config.app.ui_mode);
    info!("Polling {} every {} ms", config.api.url, config.poller.interval_ms);

    let client = SeatApiClient::from_config(&config.api).context("Failed to build HTTP client")?;

    match config.app.ui_mode {
        UiMode::Tui => ui::run(&config, client).await,
        UiMode::Headless => headless::run(&config, client).await,
    }
}

// В режиме TUI экран занят сеткой, поэтому логи пишем в файл
fn init_tracing(app: &AppConfig) -> anyhow::Result<()> {
    let (writer, ansi) = match app.ui_mode {
        UiMode::Tui => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&app.log_file)
                .with_context(|| format!("Failed to open log file {}", app.log_file))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        UiMode::Headless => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&app.rust_log));

    match app.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_ansi(ansi).with_writer(writer))
            .init(),
    }

    Ok(())
}
