use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::error::EngineError;
use super::snake::{INITIAL_SNAKE_LENGTH, Snake};
use super::types::{Direction, FieldSize};

pub const DEFAULT_FOOD_REWARD: u32 = 10;
pub const MAX_FIELD_DIMENSION: usize = 1000;

/// Direction the snake faces after construction and after every `reset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartDirection {
    Fixed(Direction),
    Random,
}

impl Default for StartDirection {
    fn default() -> Self {
        StartDirection::Fixed(Direction::Right)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub field_width: usize,
    pub field_height: usize,
    pub food_reward: u32,
    pub start_direction: StartDirection,
    pub base_tick_interval_ms: u64,
    pub min_tick_interval_ms: u64,
    pub speedup_per_food_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            field_width: 20,
            field_height: 15,
            food_reward: DEFAULT_FOOD_REWARD,
            start_direction: StartDirection::default(),
            base_tick_interval_ms: 150,
            min_tick_interval_ms: 50,
            speedup_per_food_ms: 5,
        }
    }
}

impl EngineSettings {
    pub fn with_field(field_width: usize, field_height: usize) -> Self {
        Self {
            field_width,
            field_height,
            ..Self::default()
        }
    }

    pub fn field_size(&self) -> FieldSize {
        FieldSize::new(self.field_width, self.field_height)
    }

    pub fn check(&self) -> Result<(), EngineError> {
        if self.field_width == 0 || self.field_height == 0 {
            return Err(EngineError::InvalidConfiguration(format!(
                "field must be at least 1x1, got {}x{}",
                self.field_width, self.field_height
            )));
        }
        if self.field_width > MAX_FIELD_DIMENSION || self.field_height > MAX_FIELD_DIMENSION {
            return Err(EngineError::InvalidConfiguration(format!(
                "field dimensions must not exceed {}x{}, got {}x{}",
                MAX_FIELD_DIMENSION, MAX_FIELD_DIMENSION, self.field_width, self.field_height
            )));
        }
        let cell_count = self.field_width.checked_mul(self.field_height).ok_or_else(|| {
            EngineError::InvalidConfiguration(format!(
                "{}x{} field has too many cells",
                self.field_width, self.field_height
            ))
        })?;

        let field_size = self.field_size();
        match self.start_direction {
            StartDirection::Fixed(direction) => {
                Snake::initial(&field_size, direction)?;
            }
            StartDirection::Random => {
                for direction in Direction::ALL {
                    Snake::initial(&field_size, direction)?;
                }
            }
        }

        if cell_count <= INITIAL_SNAKE_LENGTH {
            return Err(EngineError::InvalidConfiguration(format!(
                "{}x{} field leaves no free cell for food",
                self.field_width, self.field_height
            )));
        }
        if self.food_reward == 0 {
            return Err(EngineError::InvalidConfiguration(
                "food_reward must be greater than 0".to_string(),
            ));
        }
        if self.min_tick_interval_ms == 0 {
            return Err(EngineError::InvalidConfiguration(
                "min_tick_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.min_tick_interval_ms > self.base_tick_interval_ms {
            return Err(EngineError::InvalidConfiguration(format!(
                "min_tick_interval_ms ({}) must not exceed base_tick_interval_ms ({})",
                self.min_tick_interval_ms, self.base_tick_interval_ms
            )));
        }
        Ok(())
    }

    /// Presentation-facing tick interval after `foods_eaten` pickups.
    pub fn tick_interval_after(&self, foods_eaten: u64) -> Duration {
        let reduction = self.speedup_per_food_ms.saturating_mul(foods_eaten);
        let ms = self
            .base_tick_interval_ms
            .saturating_sub(reduction)
            .max(self.min_tick_interval_ms);
        Duration::from_millis(ms)
    }
}

impl Validate for EngineSettings {
    fn validate(&self) -> Result<(), String> {
        self.check().map_err(|e| e.to_string())
    }
}
