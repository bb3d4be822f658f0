use agora_core::AgentId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Agent {0} submitted more than one action in a tick")]
    DuplicateAgent(AgentId),

    #[error("Mid-price left the representable range: {0}")]
    PriceOutOfRange(String),
}

pub type Result<T> = std::result::Result<T, EnvironmentError>;
