// Interactive fantasy helper entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, stdout is for output)
// 2. Load config
// 3. Open the stats cache
// 4. Load the season's players (cache first, then the proxy; retried on search)
// 5. Create channels, spawn the stdin reader and the printer
// 6. Run the command loop until quit

use std::sync::Arc;

use gridiron_draft::app;
use gridiron_draft::config;
use gridiron_draft::db;
use gridiron_draft::draft::session::{Session, SessionUpdate};
use gridiron_draft::protocol::UiUpdate;
use gridiron_draft::source::{CachedStatSource, HttpStatSource, PlayerSource};

use anyhow::Context;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("gridiron starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: season={}, stats from {}",
        config.upstream.season, config.source.stats_url
    );

    let db = db::Database::open(&config.cache.path).context("failed to open stats cache")?;
    info!("Stats cache opened at {}", config.cache.path);

    let http = HttpStatSource::from_config(&config).context("failed to create stats client")?;
    let source: Arc<dyn PlayerSource> = Arc::new(CachedStatSource::new(
        http,
        Arc::new(db),
        config.cache.key.clone(),
    ));
    // A failed load leaves the session empty; the next search retries.
    let players = match source.load_players().await {
        Ok(players) => players,
        Err(e) => {
            error!("Failed to load stats: {}", e);
            println!("{}", SessionUpdate::FetchFailed.status_message());
            Vec::new()
        }
    };

    let state = app::AppState::new(config, Session::new(players), source);

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, mut ui_rx) = mpsc::channel::<UiUpdate>(256);

    let printer = tokio::spawn(async move {
        while let Some(update) = ui_rx.recv().await {
            match update {
                UiUpdate::Status(line) => println!("{line}"),
                UiUpdate::Screen(block) => println!("{block}\n"),
            }
        }
    });

    let reader_ui_tx = ui_tx.clone();
    let reader = tokio::spawn(async move {
        let stdin = BufReader::new(tokio::io::stdin());
        if let Err(e) = app::read_commands(stdin, cmd_tx, reader_ui_tx).await {
            error!("Input reader error: {}", e);
        }
    });

    if let Err(e) = app::run(cmd_rx, ui_tx, state).await {
        error!("Application loop error: {}", e);
    }

    // The reader exits on quit or EOF; abort covers a loop error.
    reader.abort();
    let _ = printer.await;

    info!("gridiron shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (stdout carries the session output).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("gridiron.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gridiron_draft=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
