use super::types::GameState;
use anyhow::Context;
use std::future::Future;
use tokio::sync::Mutex;

/// The one simulation shared by every connected viewer.
///
/// All access goes through a single async mutex. A tick holds it from the
/// advance through the publish, so a slow viewer delays every other
/// viewer's tick and all of them observe one strictly ordered sequence of
/// states.
#[derive(Debug, Default)]
pub struct World {
  state: Mutex<GameState>,
}

impl World {
  pub fn new() -> Self {
    Self::with_state(GameState::new())
  }

  pub fn with_state(state: GameState) -> Self {
    Self {
      state: Mutex::new(state),
    }
  }

  pub async fn snapshot(&self) -> GameState {
    self.state.lock().await.clone()
  }

  /// Advances the simulation once and hands the serialized snapshot to
  /// `publish` without releasing the lock. The advance stands even when
  /// publishing fails.
  pub async fn advance_and_publish<F, Fut>(&self, publish: F) -> anyhow::Result<()>
  where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
  {
    let mut state = self.state.lock().await;
    state.advance();
    let payload = state.to_json().context("failed to encode game state")?;
    publish(payload).await
  }
}
