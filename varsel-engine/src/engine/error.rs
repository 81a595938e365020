use thiserror::Error;
use tokio::task::JoinError;
use varsel_config::ConfigError;
use varsel_core::error::EventError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid event input: {0}")]
    Event(#[from] EventError),

    #[error("Engine command channel closed")]
    ChannelClosed,

    #[error("Engine task failed: {0}")]
    Task(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JoinError> for EngineError {
    fn from(err: JoinError) -> Self {
        EngineError::Task(err.to_string())
    }
}
