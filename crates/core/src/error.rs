use thiserror::Error;

pub type EngageResult<T> = Result<T, EngageError>;

#[derive(Error, Debug)]
pub enum EngageError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
