#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Settings or an explicit starting state that cannot describe a valid game.
    InvalidConfiguration(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidConfiguration(reason) => {
                write!(f, "Invalid configuration: {}", reason)
            }
        }
    }
}

impl std::error::Error for EngineError {}
