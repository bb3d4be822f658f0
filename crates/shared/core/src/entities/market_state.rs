//! Market State
//!
//! Snapshot handed to agents and telemetry after every tick.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Price, Tick};

/// Immutable top-of-book view of the market
///
/// `best_bid`/`best_ask` are always populated: when a side of the book is
/// empty they hold the theoretical quote around the mid-price instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketState {
    pub tick: Tick,
    pub mid_price: Price,
    pub best_bid: Price,
    pub best_ask: Price,
}

impl MarketState {
    /// Build a snapshot from the book's top of book, falling back to
    /// `mid ± spread / 2` for any empty side
    pub fn from_book(
        tick: Tick,
        mid_price: Price,
        best_bid: Option<Price>,
        best_ask: Option<Price>,
        spread: Price,
    ) -> Self {
        let half_spread = spread / Decimal::TWO;
        Self {
            tick,
            mid_price,
            best_bid: best_bid.unwrap_or(mid_price - half_spread),
            best_ask: best_ask.unwrap_or(mid_price + half_spread),
        }
    }

    /// Snapshot with no book at all (both sides theoretical)
    pub fn theoretical(tick: Tick, mid_price: Price, spread: Price) -> Self {
        Self::from_book(tick, mid_price, None, None, spread)
    }

    /// Quoted spread (may be negative if agents quoted through each other
    /// on one side only)
    pub fn spread(&self) -> Price {
        self.best_ask - self.best_bid
    }
}
