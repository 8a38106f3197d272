use serde::Serialize;

use super::types::{Direction, FieldSize, GameStatus, Point};

/// Owned, read-only view of a game for shells to render or export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SnakeSnapshot {
    pub field_size: FieldSize,
    /// Head first.
    pub snake: Vec<Point>,
    pub food: Option<Point>,
    pub direction: Direction,
    pub score: u32,
    pub status: GameStatus,
    pub tick: u64,
    pub tick_interval_ms: u64,
}

impl SnakeSnapshot {
    pub fn head(&self) -> Option<Point> {
        self.snake.first().copied()
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }
}
