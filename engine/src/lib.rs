pub mod config;
pub mod logger;
pub mod session_rng;
pub mod snake;

pub use session_rng::SessionRng;
pub use snake::{
    BotController, BotType, Direction, EndReason, EngineError, EngineSettings, FieldSize,
    GameStatus, Point, SnakeEngine, SnakeSnapshot, StartDirection, TickOutcome,
};
