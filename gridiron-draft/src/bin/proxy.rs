// Stats proxy entry point: holds the API key and serves the front-end.

use std::sync::Arc;

use gridiron_draft::config;
use gridiron_draft::proxy::{self, SportsDataClient};

use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Proxying season {} from {}",
        config.upstream.season, config.upstream.base_url
    );

    let client = SportsDataClient::from_config(&config).context("failed to create upstream client")?;
    proxy::serve(&config, Arc::new(client)).await
}

/// The proxy has no terminal UI, so logs go to stderr.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gridiron_draft=info,gridiron_proxy=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
