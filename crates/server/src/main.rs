use duel_server::config::Config;
use duel_server::matchmaking::MatchmakingQueue;
use duel_server::store::MatchStore;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    let store = MatchStore::new();
    let queue = MatchmakingQueue::new(config.ticket_ttl, config.queue_rules());

    // Pair waiting tickets and drop old finished matches on a fixed cadence
    tokio::spawn({
        let store = store.clone();
        let queue = queue.clone();
        let period = config.matchmaking_interval;
        let retention = chrono::Duration::from_std(config.match_retention)
            .context("MATCH_RETENTION_SECS out of range")?;
        async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let now = chrono::Utc::now();
                let created = queue.process(&store, now).await;
                if !created.is_empty() {
                    tracing::debug!("Matchmaking pass created {} matches", created.len());
                }
                let evicted = store.evict_finished(now, retention).await;
                if evicted > 0 {
                    tracing::info!("Evicted {} finished matches", evicted);
                }
            }
        }
    });

    let addr = format!("{}:{}", config.host, config.port);
    let app = duel_server::app(store, queue, config);

    tracing::info!("Starting server on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
