use thiserror::Error;

#[derive(Error, Debug)]
pub enum NdError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Signature length mismatch: expected {expected}, got {got}")]
    SignatureLengthMismatch { expected: usize, got: usize },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, NdError>;
