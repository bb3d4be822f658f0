//! Simulation configuration loading
//!
//! Supports JSON configuration files for:
//! - Environment parameters (initial price, volatility, spread, seed)
//! - Run length and telemetry output directory
//! - The agent population, in decision order

use agora_core::AgentId;
use agora_environment::EnvironmentConfig;
use agora_strategy::{ArbitrageConfig, MarketMakerConfig, TrendFollowerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Root configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Number of ticks to run
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Directory the CSV telemetry is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Agents in the order they act each tick
    #[serde(default = "default_agents")]
    pub agents: Vec<AgentSpec>,
}

fn default_ticks() -> u64 {
    1000
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results/logs")
}

fn default_agents() -> Vec<AgentSpec> {
    vec![
        AgentSpec::MarketMaker {
            id: AgentId::new("MM_01"),
            params: MarketMakerConfig::default(),
        },
        AgentSpec::TrendFollower {
            id: AgentId::new("Trend_01"),
            params: TrendFollowerConfig::default(),
        },
        AgentSpec::Arbitrageur {
            id: AgentId::new("Arb_01"),
            params: ArbitrageConfig::default(),
            seed: None,
        },
    ]
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            environment: EnvironmentConfig::default(),
            ticks: default_ticks(),
            output_dir: default_output_dir(),
            agents: default_agents(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject duplicate agent ids; fills are routed by id
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::BTreeSet::new();
        for spec in &self.agents {
            if !seen.insert(spec.id()) {
                return Err(ConfigError::DuplicateAgent(spec.id().clone()));
            }
        }
        Ok(())
    }
}

/// One agent of the population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum AgentSpec {
    MarketMaker {
        id: AgentId,
        #[serde(default)]
        params: MarketMakerConfig,
    },
    TrendFollower {
        id: AgentId,
        #[serde(default)]
        params: TrendFollowerConfig,
    },
    Arbitrageur {
        id: AgentId,
        #[serde(default)]
        params: ArbitrageConfig,
        /// Fixed noise seed; derived from the environment seed when absent
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl AgentSpec {
    pub fn id(&self) -> &AgentId {
        match self {
            AgentSpec::MarketMaker { id, .. }
            | AgentSpec::TrendFollower { id, .. }
            | AgentSpec::Arbitrageur { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Duplicate agent id: {0}")]
    DuplicateAgent(AgentId),
}
