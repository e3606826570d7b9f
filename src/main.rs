// Season scorecard entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, env-filtered)
// 2. Load config; apply an optional mode override from argv
// 3. Open the leaderboard cache
// 4. Run the cached pipeline (resolve → fetch → fold → derive)
// 5. Print the rendered report

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use scorecard::cache::{CacheStore, SystemClock, TtlPolicy};
use scorecard::config;
use scorecard::mlb::client::MlbClient;
use scorecard::pipeline::{CachedPipeline, Pipeline};
use scorecard::report;
use scorecard::stats::categories::Mode;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let mut config = config::load_config().context("failed to load configuration")?;

    // `scorecard [classic|modern|fun]` overrides the configured mode.
    if let Some(arg) = std::env::args().nth(1) {
        config.mode = arg
            .parse::<Mode>()
            .map_err(|e| anyhow::anyhow!(e))
            .context("invalid mode argument")?;
    }
    info!(
        mode = %config.mode,
        team = %config.team,
        "scorecard starting up"
    );

    let store = CacheStore::open(&config.cache_path)
        .with_context(|| format!("failed to open cache at {}", config.cache_path))?;
    info!("cache opened at {}", config.cache_path);

    let client = MlbClient::new(config.request_timeout);
    let pipeline = Pipeline::new(client, config.concurrency);
    let cached = CachedPipeline::new(
        pipeline,
        store,
        TtlPolicy::new(config.cache_ttl),
        Arc::new(SystemClock),
    );

    let feed_url = config.feed_url.clone();
    let feed_client = MlbClient::new(config.request_timeout);
    let report = cached
        .run(config.mode, &config.team, || async move {
            feed_client.fetch_season_feed(&feed_url).await
        })
        .await
        .context("failed to build season report")?;

    print!("{}", report::render_text(&report));
    Ok(())
}

/// Initialize tracing to stderr so stdout stays clean for the report.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scorecard=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}
