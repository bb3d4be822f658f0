use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    #[error("Invalid {strategy} parameter: {reason}")]
    InvalidParameter {
        strategy: &'static str,
        reason: String,
    },
}

impl StrategyError {
    pub(crate) fn invalid(strategy: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            strategy,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StrategyError>;
