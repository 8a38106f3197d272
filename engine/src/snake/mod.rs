mod bot_controller;
mod engine;
mod error;
mod game_state;
mod settings;
mod snake;
mod snapshot;
mod types;

pub use bot_controller::{BotController, BotType};
pub use engine::SnakeEngine;
pub use error::EngineError;
pub use settings::{DEFAULT_FOOD_REWARD, EngineSettings, MAX_FIELD_DIMENSION, StartDirection};
pub use snake::{INITIAL_SNAKE_LENGTH, Snake};
pub use snapshot::SnakeSnapshot;
pub use types::{Direction, EndReason, FieldSize, GameStatus, Point, TickOutcome};
