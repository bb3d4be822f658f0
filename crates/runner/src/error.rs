use agora_environment::EnvironmentError;
use agora_ports::TelemetryError;
use agora_strategy::StrategyError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Environment error: {0}")]
    Environment(#[from] EnvironmentError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
