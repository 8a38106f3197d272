use std::time::Duration;

use crate::{debug_log, log, SessionRng};
use super::error::EngineError;
use super::game_state::{place_food, SnakeGameState};
use super::settings::EngineSettings;
use super::snake::Snake;
use super::snapshot::SnakeSnapshot;
use super::types::{Direction, EndReason, FieldSize, GameStatus, Point, TickOutcome};

/// Owns a single snake game and exposes the only legal mutators.
///
/// The engine does no locking. Callers driving it from several tasks must
/// serialize `set_direction` and `advance` themselves.
pub struct SnakeEngine {
    settings: EngineSettings,
    field_size: FieldSize,
    rng: SessionRng,
    state: SnakeGameState,
}

impl SnakeEngine {
    pub fn new(settings: EngineSettings, mut rng: SessionRng) -> Result<Self, EngineError> {
        settings.check()?;
        let state = SnakeGameState::initial(&settings, &mut rng);

        Ok(Self {
            field_size: settings.field_size(),
            settings,
            rng,
            state,
        })
    }

    /// Starts from an explicit position instead of the centred opening.
    /// `reset` still returns to the regular opening for `settings`.
    pub fn from_parts(
        settings: EngineSettings,
        body: impl IntoIterator<Item = Point>,
        direction: Direction,
        food: Point,
        rng: SessionRng,
    ) -> Result<Self, EngineError> {
        settings.check()?;
        let field_size = settings.field_size();
        let snake = Snake::from_segments(body, &field_size)?;

        if !field_size.contains(food) {
            return Err(EngineError::InvalidConfiguration(format!(
                "food ({}, {}) is outside the {}x{} field",
                food.x, food.y, field_size.width, field_size.height
            )));
        }
        if snake.contains(&food) {
            return Err(EngineError::InvalidConfiguration(format!(
                "food ({}, {}) lies on the snake",
                food.x, food.y
            )));
        }

        Ok(Self {
            settings,
            field_size,
            rng,
            state: SnakeGameState {
                snake,
                direction,
                food: Some(food),
                score: 0,
                status: GameStatus::Running,
                tick: 0,
                foods_eaten: 0,
            },
        })
    }

    /// Turns the snake unless `requested` is the reverse of the current
    /// direction or the game is over. Returns `false` when the request was ignored.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.state.status.is_over() || requested.is_opposite(&self.state.direction) {
            return false;
        }
        self.state.direction = requested;
        true
    }

    pub fn advance(&mut self) -> TickOutcome {
        if self.state.status.is_over() {
            return TickOutcome::Idle;
        }

        let head = self.state.snake.head();
        let Some(new_head) = head.step(self.state.direction, &self.field_size) else {
            return self.finish(EndReason::WallCollision);
        };

        // The pre-tick body counts, tail included.
        if self.state.snake.contains(&new_head) {
            return self.finish(EndReason::SelfCollision);
        }

        self.state.snake.push_head(new_head);
        self.state.tick += 1;

        if self.state.food != Some(new_head) {
            self.state.snake.pop_tail();
            return TickOutcome::Moved;
        }

        self.state.score += self.settings.food_reward;
        self.state.foods_eaten += 1;
        debug_log!(
            "Ate food at ({}, {}). Score: {}, length: {}",
            new_head.x,
            new_head.y,
            self.state.score,
            self.state.snake.len()
        );

        self.state.food = place_food(&self.field_size, &self.state.snake, &mut self.rng);
        match self.state.food {
            Some(food) => {
                debug_log!("Food placed at ({}, {})", food.x, food.y);
                TickOutcome::Ate
            }
            None => self.finish(EndReason::BoardFilled),
        }
    }

    pub fn reset(&mut self) {
        self.state = SnakeGameState::initial(&self.settings, &mut self.rng);
        log!(
            "Game reset on {}x{} field heading {:?}",
            self.field_size.width,
            self.field_size.height,
            self.state.direction
        );
    }

    fn finish(&mut self, reason: EndReason) -> TickOutcome {
        self.state.status = GameStatus::Over(reason);
        log!(
            "Game over ({:?}) after {} ticks. Score: {}, length: {}",
            reason,
            self.state.tick,
            self.state.score,
            self.state.snake.len()
        );
        TickOutcome::Ended(reason)
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            field_size: self.field_size,
            snake: self.state.snake.segments().copied().collect(),
            food: self.state.food,
            direction: self.state.direction,
            score: self.state.score,
            status: self.state.status,
            tick: self.state.tick,
            tick_interval_ms: self.tick_interval().as_millis() as u64,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn field_size(&self) -> FieldSize {
        self.field_size
    }

    pub fn snake(&self) -> &Snake {
        &self.state.snake
    }

    pub fn head(&self) -> Point {
        self.state.snake.head()
    }

    pub fn food(&self) -> Option<Point> {
        self.state.food
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn is_game_over(&self) -> bool {
        self.state.status.is_over()
    }

    pub fn tick(&self) -> u64 {
        self.state.tick
    }

    /// Suggested delay between ticks; shrinks as food is eaten. Never
    /// influences movement or collisions.
    pub fn tick_interval(&self) -> Duration {
        self.settings.tick_interval_after(self.state.foods_eaten)
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}
