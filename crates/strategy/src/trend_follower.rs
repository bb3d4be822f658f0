//! Trend Follower Agent
//!
//! Bets on short-term trend continuation: buys when the current mid is above
//! the average of the previous `lookback` mids and sells when it is below.

use agora_core::{Action, AgentId, Fill, MarketState, Portfolio, Price, Quantity};
use agora_ports::Agent;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::error::{Result, StrategyError};

/// Configuration for the trend follower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendFollowerConfig {
    /// Number of past mids averaged into the reference price
    pub lookback: usize,
    /// Market order size
    pub order_size: Quantity,
    pub initial_cash: Decimal,
}

impl Default for TrendFollowerConfig {
    fn default() -> Self {
        Self {
            lookback: 3,
            order_size: 5,
            initial_cash: Portfolio::DEFAULT_INITIAL_CASH,
        }
    }
}

impl TrendFollowerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.lookback == 0 {
            return Err(StrategyError::invalid(
                "trend follower",
                "lookback must be at least 1",
            ));
        }
        if self.order_size == 0 {
            return Err(StrategyError::invalid(
                "trend follower",
                "order_size must be positive",
            ));
        }
        Ok(())
    }
}

/// Trend follower agent
#[derive(Debug, Clone)]
pub struct TrendFollower {
    id: AgentId,
    config: TrendFollowerConfig,
    portfolio: Portfolio,
    /// Most recent mids, oldest first; holds at most `lookback + 1`
    history: VecDeque<Price>,
}

impl TrendFollower {
    pub fn new(id: impl Into<AgentId>, config: TrendFollowerConfig) -> Result<Self> {
        config.validate()?;
        let portfolio = Portfolio::new(config.initial_cash);
        let history = VecDeque::with_capacity(config.lookback + 1);
        Ok(Self {
            id: id.into(),
            config,
            portfolio,
            history,
        })
    }

    /// Mean of the mids preceding the latest one, once enough are known
    fn reference_price(&self) -> Option<Price> {
        if self.history.len() < self.config.lookback + 1 {
            return None;
        }
        let previous = self.history.iter().take(self.config.lookback);
        let sum: Decimal = previous.sum();
        sum.checked_div(Decimal::from(self.config.lookback))
    }

    fn observe(&mut self, mid: Price) {
        self.history.push_back(mid);
        if self.history.len() > self.config.lookback + 1 {
            self.history.pop_front();
        }
    }
}

impl Agent for TrendFollower {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn act(&mut self, state: &MarketState) -> Option<Action> {
        let current = state.mid_price;
        self.observe(current);

        let sma = self.reference_price()?;
        let action = if current > sma {
            Some(Action::market_buy(self.config.order_size))
        } else if current < sma {
            Some(Action::market_sell(self.config.order_size))
        } else {
            None
        };

        debug!("[{}] mid={} sma={} -> {:?}", self.id, current, sma, action);
        action
    }

    fn on_fills(&mut self, fills: &[Fill]) {
        self.portfolio.apply_fills(fills);
    }

    fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    fn agent_type(&self) -> &'static str {
        "TrendFollower"
    }
}
