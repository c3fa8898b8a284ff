use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load {file}: {reason}")]
    Load { file: String, reason: String },

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
