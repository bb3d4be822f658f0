//! Arbitrageur Agent
//!
//! Trades the observed mid against a private, noisy estimate of fair value.
//!
//! Strategy:
//! - fair = mid + N(0, noise_factor)
//! - Mid cheaper than fair by more than the threshold: buy
//! - Mid richer than fair by more than the threshold: sell

use agora_core::{Action, AgentId, Fill, MarketState, Portfolio, Price, Quantity};
use agora_ports::Agent;
use log::debug;
use rand::prelude::*;
use rand_distr::Normal;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StrategyError};

/// Configuration for the arbitrageur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbitrageConfig {
    /// Standard deviation of the fair-value estimate around the mid
    pub noise_factor: f64,
    /// Minimum mispricing before trading
    pub threshold: Price,
    /// Market order size
    pub order_size: Quantity,
    pub initial_cash: Decimal,
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            noise_factor: 0.5,
            threshold: dec!(0.2),
            order_size: 5,
            initial_cash: Portfolio::DEFAULT_INITIAL_CASH,
        }
    }
}

/// Arbitrageur agent
pub struct Arbitrageur {
    id: AgentId,
    config: ArbitrageConfig,
    portfolio: Portfolio,
    fair_value_noise: Normal<f64>,
    rng: StdRng,
}

impl Arbitrageur {
    /// Create an arbitrageur drawing its noise from `rng`
    pub fn new(id: impl Into<AgentId>, config: ArbitrageConfig, rng: StdRng) -> Result<Self> {
        if config.order_size == 0 {
            return Err(StrategyError::invalid(
                "arbitrageur",
                "order_size must be positive",
            ));
        }
        if config.threshold < Decimal::ZERO {
            return Err(StrategyError::invalid(
                "arbitrageur",
                format!("threshold must not be negative, got {}", config.threshold),
            ));
        }
        let fair_value_noise = Normal::new(0.0, config.noise_factor).map_err(|e| {
            StrategyError::invalid("arbitrageur", format!("noise_factor: {}", e))
        })?;
        let portfolio = Portfolio::new(config.initial_cash);

        Ok(Self {
            id: id.into(),
            config,
            portfolio,
            fair_value_noise,
            rng,
        })
    }

    /// Create an arbitrageur with a seeded (or entropy-seeded) generator
    pub fn with_seed(
        id: impl Into<AgentId>,
        config: ArbitrageConfig,
        seed: Option<u64>,
    ) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(id, config, rng)
    }

    fn estimate_fair_value(&mut self, mid: Price) -> Price {
        let noise = self.fair_value_noise.sample(&mut self.rng);
        mid + Decimal::try_from(noise).unwrap_or(Decimal::ZERO)
    }
}

impl std::fmt::Debug for Arbitrageur {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arbitrageur")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("portfolio", &self.portfolio)
            .finish()
    }
}

impl Agent for Arbitrageur {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn act(&mut self, state: &MarketState) -> Option<Action> {
        let mid = state.mid_price;
        let fair = self.estimate_fair_value(mid);
        let threshold = self.config.threshold;

        let action = if mid < fair - threshold {
            Some(Action::market_buy(self.config.order_size))
        } else if mid > fair + threshold {
            Some(Action::market_sell(self.config.order_size))
        } else {
            None
        };

        debug!("[{}] mid={} fair={} -> {:?}", self.id, mid, fair, action);
        action
    }

    fn on_fills(&mut self, fills: &[Fill]) {
        self.portfolio.apply_fills(fills);
    }

    fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    fn agent_type(&self) -> &'static str {
        "Arbitrageur"
    }
}
