//! Agora Runner - Multi-Agent Market Simulation
//!
//! Orchestrates a full run:
//!
//! - **Config**: JSON-loadable run parameters and agent population
//! - **Simulation**: the tick loop between agents and the environment
//! - **Telemetry**: CSV and in-memory sinks for prices, actions and PnL
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  TRADING AGENTS                      │
//! │  ┌──────────────┐ ┌───────────────┐ ┌─────────────┐ │
//! │  │ Market Maker │ │ Trend Follower│ │ Arbitrageur │ │
//! │  └──────┬───────┘ └──────┬────────┘ └──────┬──────┘ │
//! └─────────┼────────────────┼─────────────────┼────────┘
//!           │  one action each, in order       │
//!           ▼                                  │
//!   ┌───────────────────────┐   fills          │
//!   │      Environment      │──────────────────┘
//!   │ (order book + price)  │
//!   └───────────┬───────────┘
//!               │ state, actions, portfolios
//!               ▼
//!   ┌───────────────────────┐
//!   │    Telemetry sink     │
//!   └───────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod simulation;
pub mod telemetry;

// Re-export main types
pub use config::{AgentSpec, ConfigError, SimulationConfig};
pub use error::{Result, RunnerError};
pub use simulation::{Simulation, SimulationSummary, build_agents};
pub use telemetry::{CsvTelemetry, MemoryTelemetry};
