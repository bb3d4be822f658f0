//! Agent Actions
//!
//! The order intent an agent may hand to the environment each tick.

use serde::{Deserialize, Serialize};

use super::Side;
use crate::error::OrderError;
use crate::values::{Price, Quantity};

/// Marker written in place of a price for market orders
pub const MARKET_PRICE_MARKER: &str = "MKT";

/// Order kind of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Market order (immediate execution, no price limit)
    Market,
    /// Limit order (rests on the book for the current tick)
    Limit,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Market => "market",
            ActionKind::Limit => "limit",
        }
    }
}

/// An order intent submitted by an agent for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    Market {
        side: Side,
        quantity: Quantity,
    },
    Limit {
        side: Side,
        price: Price,
        quantity: Quantity,
    },
}

impl Action {
    /// Create a market buy order
    pub fn market_buy(quantity: Quantity) -> Self {
        Self::Market {
            side: Side::Buy,
            quantity,
        }
    }

    /// Create a market sell order
    pub fn market_sell(quantity: Quantity) -> Self {
        Self::Market {
            side: Side::Sell,
            quantity,
        }
    }

    /// Create a limit buy order
    pub fn limit_buy(price: Price, quantity: Quantity) -> Self {
        Self::Limit {
            side: Side::Buy,
            price,
            quantity,
        }
    }

    /// Create a limit sell order
    pub fn limit_sell(price: Price, quantity: Quantity) -> Self {
        Self::Limit {
            side: Side::Sell,
            price,
            quantity,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Market { .. } => ActionKind::Market,
            Action::Limit { .. } => ActionKind::Limit,
        }
    }

    pub fn side(&self) -> Side {
        match *self {
            Action::Market { side, .. } | Action::Limit { side, .. } => side,
        }
    }

    pub fn quantity(&self) -> Quantity {
        match *self {
            Action::Market { quantity, .. } | Action::Limit { quantity, .. } => quantity,
        }
    }

    /// Limit price, `None` for market orders
    pub fn price(&self) -> Option<Price> {
        match *self {
            Action::Market { .. } => None,
            Action::Limit { price, .. } => Some(price),
        }
    }

    /// Price as text, or the market marker when the action has no price
    pub fn price_or_marker(&self) -> String {
        self.price()
            .map(|p| p.to_string())
            .unwrap_or_else(|| MARKET_PRICE_MARKER.to_string())
    }

    /// Check quantity and price before the action reaches the book
    pub fn validate(&self) -> Result<(), OrderError> {
        super::order::validate(self.price(), self.quantity())
    }
}
