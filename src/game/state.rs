use super::constants::{FOOD_RELOCATE_OFFSET, INITIAL_FOOD, INITIAL_HEAD};
use super::types::{GameState, Position};

impl GameState {
  pub fn new() -> Self {
    Self::with_layout(vec![INITIAL_HEAD], INITIAL_FOOD)
  }

  /// Falls back to the default head when `snake` is empty so the
  /// non-empty invariant holds from construction on.
  pub fn with_layout(snake: Vec<Position>, food: Position) -> Self {
    let snake = if snake.is_empty() {
      vec![INITIAL_HEAD]
    } else {
      snake
    };
    Self {
      snake,
      food,
      running: true,
    }
  }

  /// Every constructor and the decoder keep at least one cell.
  pub fn head(&self) -> Position {
    self.snake[0]
  }

  pub fn snake(&self) -> &[Position] {
    &self.snake
  }

  pub fn food(&self) -> Position {
    self.food
  }

  pub fn running(&self) -> bool {
    self.running
  }

  /// Moves the snake one cell to the right. Reaching the food keeps the tail
  /// and moves the food diagonally ahead of the new head.
  pub fn advance(&mut self) {
    let head = self.head().offset(1, 0);
    self.snake.insert(0, head);

    if head == self.food {
      self.food = head.offset(FOOD_RELOCATE_OFFSET, FOOD_RELOCATE_OFFSET);
    } else {
      self.snake.pop();
    }
  }

  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }
}

impl Default for GameState {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pos(x: i64, y: i64) -> Position {
    Position::new(x, y)
  }

  #[test]
  fn initial_state_matches_startup_layout() {
    let state = GameState::new();
    assert_eq!(state.snake, vec![pos(5, 5)]);
    assert_eq!(state.food, pos(10, 10));
    assert!(state.running);
  }

  #[test]
  fn empty_layout_keeps_a_head() {
    let state = GameState::with_layout(Vec::new(), pos(0, 0));
    assert_eq!(state.snake.len(), 1);
  }

  #[test]
  fn straight_line_motion_never_reaches_food_off_row() {
    let mut state = GameState::new();
    for _ in 0..5 {
      state.advance();
    }
    assert_eq!(state.snake, vec![pos(10, 5)]);
    assert_eq!(state.food, pos(10, 10));

    for tick in 1..=5 {
      state.advance();
      assert_eq!(state.head(), pos(10 + tick, 5));
      assert_eq!(state.snake.len(), 1);
    }
    assert_eq!(state.food, pos(10, 10));
  }

  #[test]
  fn head_x_tracks_tick_count() {
    let mut state = GameState::with_layout(vec![pos(-3, 7), pos(-4, 7), pos(-5, 7)], pos(0, 0));
    for _ in 0..40 {
      state.advance();
    }
    assert_eq!(state.head(), pos(37, 7));
    assert_eq!(state.snake.len(), 3);
    assert_eq!(state.snake, vec![pos(37, 7), pos(36, 7), pos(35, 7)]);
  }

  #[test]
  fn eating_food_grows_snake_and_relocates_food() {
    let mut state = GameState::with_layout(vec![pos(5, 5)], pos(6, 5));
    state.advance();
    assert_eq!(state.snake, vec![pos(6, 5), pos(5, 5)]);
    assert_eq!(state.food, pos(9, 8));

    state.advance();
    assert_eq!(state.snake, vec![pos(7, 5), pos(6, 5)]);
    assert_eq!(state.food, pos(9, 8));
  }

  #[test]
  fn food_on_a_body_cell_is_not_consumed() {
    let mut state = GameState::with_layout(vec![pos(5, 5), pos(4, 5), pos(3, 5)], pos(4, 5));
    state.advance();
    assert_eq!(state.snake.len(), 3);
    assert_eq!(state.food, pos(4, 5));
  }

  #[test]
  fn length_grows_by_at_most_one_per_tick() {
    let mut state = GameState::with_layout(vec![pos(0, 0)], pos(1, 0));
    let mut food_moves = 0;
    for _ in 0..30 {
      let before = state.snake.len();
      let food_before = state.food;
      state.advance();
      let after = state.snake.len();
      assert!(after == before || after == before + 1);
      assert!(!state.snake.is_empty());
      if state.food != food_before {
        food_moves += 1;
      }
    }
    assert_eq!(food_moves, 1);
    assert_eq!(state.snake.len(), 2);
  }

  #[test]
  fn snapshot_json_uses_wire_field_names() {
    let state = GameState::with_layout(vec![pos(6, 5), pos(5, 5)], pos(9, 8));
    let value: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();
    assert_eq!(
      value,
      serde_json::json!({
        "snake": [{ "x": 6, "y": 5 }, { "x": 5, "y": 5 }],
        "food": { "x": 9, "y": 8 },
        "running": true,
      })
    );
  }

  #[test]
  fn snapshot_with_empty_snake_is_rejected() {
    let error = serde_json::from_str::<GameState>(
      r#"{"snake":[],"food":{"x":1,"y":1},"running":true}"#,
    )
    .expect_err("empty snake must not decode");
    assert!(error.to_string().contains("snake must have at least one cell"));
  }

  #[test]
  fn snapshot_json_parses_back_to_equal_state() {
    let mut state = GameState::with_layout(vec![pos(-2, 4), pos(-3, 4)], pos(-1, 4));
    state.advance();
    let parsed: GameState = serde_json::from_str(&state.to_json().unwrap()).unwrap();
    assert_eq!(parsed, state);
  }
}
