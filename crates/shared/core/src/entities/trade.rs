use serde::{Deserialize, Serialize};

use super::Side;
use crate::values::{AgentId, Price, Quantity, Tick};

/// Trade resulting from matching orders
///
/// Immutable once produced by the book. `aggressor` is set when the trade
/// came from a market order; that side has already been reported to its
/// owner in aggregate, so only the resting counterparty still needs a fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub buyer: AgentId,
    pub seller: AgentId,
    pub price: Price,
    pub quantity: Quantity,
    pub tick: Tick,
    pub aggressor: Option<Side>,
}

impl Trade {
    /// Returns the notional value of the trade (price * quantity)
    pub fn notional(&self) -> Price {
        self.price * Price::from(self.quantity)
    }

    /// Whether the given side of this trade still has to be reported
    pub fn is_unattributed(&self, side: Side) -> bool {
        self.aggressor != Some(side)
    }
}
