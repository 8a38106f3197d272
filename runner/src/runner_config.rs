use serde::{Deserialize, Serialize};
use snake_engine::config::Validate;
use snake_engine::{BotType, EngineSettings};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RunnerConfig {
    pub engine: EngineSettings,
    pub bot_type: BotType,
    pub rounds: u32,
    pub max_ticks_per_round: u64,
    pub restart_delay_ms: u64,
    pub render: bool,
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        self.engine.validate()?;
        if self.rounds == 0 {
            return Err("rounds must be greater than 0".to_string());
        }
        if self.rounds > 1000 {
            return Err("rounds must not exceed 1000".to_string());
        }
        if self.max_ticks_per_round == 0 {
            return Err("max_ticks_per_round must be greater than 0".to_string());
        }
        if self.restart_delay_ms > 60_000 {
            return Err("restart_delay_ms must not exceed 60000".to_string());
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            bot_type: BotType::Efficient,
            rounds: 3,
            max_ticks_per_round: 2_000,
            restart_delay_ms: 500,
            render: false,
        }
    }
}
