use thiserror::Error;

use pantry_core::DomainError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid engine input: {0}")]
    InvalidInput(String),

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl EngineError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
