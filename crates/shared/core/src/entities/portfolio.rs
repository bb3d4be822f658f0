use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{Fill, Side};
use crate::values::Price;

/// Cash and inventory held by one participant
///
/// Valued mark-to-market at the mid-price; there is no margin, fee or
/// borrow model, so inventory and cash may both go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub cash: Decimal,
    pub inventory: i64,
}

impl Portfolio {
    pub const DEFAULT_INITIAL_CASH: Decimal = dec!(100000);

    pub fn new(initial_cash: Decimal) -> Self {
        Self {
            cash: initial_cash,
            inventory: 0,
        }
    }

    /// Apply one execution to cash and inventory
    pub fn apply_fill(&mut self, fill: &Fill) {
        let notional = fill.price * Decimal::from(fill.quantity);
        match fill.side {
            Side::Buy => self.cash -= notional,
            Side::Sell => self.cash += notional,
        }
        self.inventory += fill.signed_quantity();
    }

    pub fn apply_fills(&mut self, fills: &[Fill]) {
        for fill in fills {
            self.apply_fill(fill);
        }
    }

    /// Mark-to-market value: cash + inventory * mark price
    pub fn total_value(&self, mark_price: Price) -> Decimal {
        self.cash + Decimal::from(self.inventory) * mark_price
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CASH)
    }
}
