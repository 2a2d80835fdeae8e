use super::types::Position;

pub const TICK_MS: u64 = 200;
pub const INITIAL_HEAD: Position = Position { x: 5, y: 5 };
pub const INITIAL_FOOD: Position = Position { x: 10, y: 10 };
pub const FOOD_RELOCATE_OFFSET: i64 = 3;
