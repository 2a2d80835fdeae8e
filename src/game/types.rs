use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
  pub x: i64,
  pub y: i64,
}

impl Position {
  pub const fn new(x: i64, y: i64) -> Self {
    Self { x, y }
  }

  pub const fn offset(self, dx: i64, dy: i64) -> Self {
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }
}

/// Full simulation snapshot. The serialized form is the per-tick wire message.
///
/// Fields are only reachable through accessors so the snake can never be
/// emptied; decoding a message with an empty snake fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireGameState")]
pub struct GameState {
  /// Head-first, never empty.
  pub(super) snake: Vec<Position>,
  pub(super) food: Position,
  /// Carried on the wire; nothing toggles or reads it.
  pub(super) running: bool,
}

#[derive(Deserialize)]
struct WireGameState {
  snake: Vec<Position>,
  food: Position,
  running: bool,
}

impl TryFrom<WireGameState> for GameState {
  type Error = &'static str;

  fn try_from(wire: WireGameState) -> Result<Self, Self::Error> {
    if wire.snake.is_empty() {
      return Err("snake must have at least one cell");
    }
    Ok(Self {
      snake: wire.snake,
      food: wire.food,
      running: wire.running,
    })
  }
}
