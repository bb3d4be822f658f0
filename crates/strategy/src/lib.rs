//! Agora Strategies
//!
//! The closed set of trading agents that take part in a simulation:
//! - [`MarketMaker`]: one inventory-skewed limit quote per tick
//! - [`TrendFollower`]: market orders in the direction of the short-term trend
//! - [`Arbitrageur`]: market orders against a noisy private fair value
//!
//! Each one implements [`agora_ports::Agent`]; [`StrategyAgent`] wraps them
//! so a population can be held in a single `Vec`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agora_strategy::{MarketMaker, MarketMakerConfig, StrategyAgent};
//!
//! let mm = MarketMaker::new("MM_01", MarketMakerConfig::default())?;
//! let agents = vec![StrategyAgent::from(mm)];
//! ```

pub mod agent;
pub mod arbitrageur;
pub mod error;
pub mod market_maker;
pub mod trend_follower;

// Re-export main types
pub use agent::StrategyAgent;
pub use arbitrageur::{ArbitrageConfig, Arbitrageur};
pub use error::{Result, StrategyError};
pub use market_maker::{MarketMaker, MarketMakerConfig};
pub use trend_follower::{TrendFollower, TrendFollowerConfig};
