use anyhow::Context;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod game;
mod highscore;
mod storage;
mod transport;

use app::AppState;
use config::AppConfig;
use game::world::World;
use highscore::HighScores;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = AppConfig::from_env()?;
  let store = config.object_store().await;
  if store.backend() == "memory" {
    tracing::warn!("HIGHSCORE_BUCKET not set, high scores are kept in memory only");
  }

  let scores = HighScores::open(store, config.highscore_key.clone())
    .await
    .context("failed to load stored high scores")?;
  tracing::info!(count = scores.count().await, "loaded high scores");

  let shutdown = CancellationToken::new();
  let persister = scores.spawn_persister(shutdown.clone());

  let state = Arc::new(AppState {
    world: Arc::new(World::new()),
    scores,
    shutdown: shutdown.clone(),
  });
  let app = app::router(state, &config.static_dir);

  let address = config.listen_address();
  let listener = tokio::net::TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("listening on {address}");

  tokio::spawn(shutdown_on_ctrl_c(shutdown.clone()));
  let serve_shutdown = shutdown.clone();
  axum::serve(listener, app)
    .with_graceful_shutdown(async move { serve_shutdown.cancelled().await })
    .await?;

  shutdown.cancel();
  if let Err(error) = persister.await {
    tracing::warn!(?error, "high score persister stopped abnormally");
  }
  Ok(())
}

async fn shutdown_on_ctrl_c(shutdown: CancellationToken) {
  if let Err(error) = tokio::signal::ctrl_c().await {
    tracing::warn!(?error, "failed to listen for ctrl-c");
    return;
  }
  tracing::info!("shutdown requested");
  shutdown.cancel();
}
