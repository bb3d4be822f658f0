//! Inventory-Skewed Market Maker
//!
//! Provides liquidity with a single limit quote per tick:
//! - Quotes around the observed mid with a fixed spread
//! - Shifts both quote prices against its inventory (long -> cheaper)
//! - Sells at the ask once long beyond the inventory band, bids otherwise

use agora_core::{Action, AgentId, Fill, MarketState, Portfolio, Price, Quantity};
use agora_ports::Agent;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StrategyError};

/// Configuration for the market maker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketMakerConfig {
    /// Distance between the bid and ask quote
    pub spread: Price,
    /// Inventory at which the skew reaches `skew_factor`
    pub max_inventory: i64,
    /// Quote shift at `max_inventory` (price units)
    pub skew_factor: Decimal,
    /// Size of every quote
    pub quote_size: Quantity,
    /// Long inventory beyond which the maker switches to selling
    pub inventory_band: i64,
    /// Decimal places quote prices are rounded to
    pub price_decimals: u32,
    pub initial_cash: Decimal,
}

impl Default for MarketMakerConfig {
    fn default() -> Self {
        Self {
            spread: dec!(0.2),
            max_inventory: 100,
            skew_factor: dec!(0.5),
            quote_size: 10,
            inventory_band: 20,
            price_decimals: 2,
            initial_cash: Portfolio::DEFAULT_INITIAL_CASH,
        }
    }
}

impl MarketMakerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_inventory <= 0 {
            return Err(StrategyError::invalid(
                "market maker",
                format!("max_inventory must be positive, got {}", self.max_inventory),
            ));
        }
        if self.quote_size == 0 {
            return Err(StrategyError::invalid(
                "market maker",
                "quote_size must be positive",
            ));
        }
        if self.spread < Decimal::ZERO {
            return Err(StrategyError::invalid(
                "market maker",
                format!("spread must not be negative, got {}", self.spread),
            ));
        }
        Ok(())
    }
}

/// Single-quote market maker
#[derive(Debug, Clone)]
pub struct MarketMaker {
    id: AgentId,
    config: MarketMakerConfig,
    portfolio: Portfolio,
}

impl MarketMaker {
    pub fn new(id: impl Into<AgentId>, config: MarketMakerConfig) -> Result<Self> {
        config.validate()?;
        let portfolio = Portfolio::new(config.initial_cash);
        Ok(Self {
            id: id.into(),
            config,
            portfolio,
        })
    }

    pub fn config(&self) -> &MarketMakerConfig {
        &self.config
    }

    /// Quote shift for the current inventory (negative when long)
    fn skew(&self) -> Decimal {
        let ratio =
            Decimal::from(self.portfolio.inventory) / Decimal::from(self.config.max_inventory);
        -ratio * self.config.skew_factor
    }

    /// Bid and ask quote around `mid`, skewed and rounded
    pub fn quotes(&self, mid: Price) -> (Price, Price) {
        let half_spread = self.config.spread / Decimal::TWO;
        let skew = self.skew();
        let bid = (mid - half_spread + skew).round_dp(self.config.price_decimals);
        let ask = (mid + half_spread + skew).round_dp(self.config.price_decimals);
        (bid, ask)
    }
}

impl Agent for MarketMaker {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn act(&mut self, state: &MarketState) -> Option<Action> {
        let (bid, ask) = self.quotes(state.mid_price);
        let inventory = self.portfolio.inventory;

        let action = if inventory > self.config.inventory_band {
            Action::limit_sell(ask, self.config.quote_size)
        } else {
            Action::limit_buy(bid, self.config.quote_size)
        };

        debug!(
            "[{}] mid={} inv={} bid={} ask={} -> {} {}",
            self.id,
            state.mid_price,
            inventory,
            bid,
            ask,
            action.side(),
            action.price_or_marker()
        );

        Some(action)
    }

    fn on_fills(&mut self, fills: &[Fill]) {
        self.portfolio.apply_fills(fills);
    }

    fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    fn agent_type(&self) -> &'static str {
        "MarketMaker"
    }
}
