use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Side;
use crate::values::{AgentId, Price, Quantity};

/// One execution as seen by a single participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub side: Side,
    pub quantity: Quantity,
    pub price: Price,
}

impl Fill {
    pub fn new(side: Side, quantity: Quantity, price: Price) -> Self {
        Self {
            side,
            quantity,
            price,
        }
    }

    /// Signed quantity (positive = bought, negative = sold)
    ///
    /// Fills never exceed an accepted order's quantity, which is capped at
    /// [`crate::MAX_QUANTITY`]; anything larger saturates instead of wrapping.
    pub fn signed_quantity(&self) -> i64 {
        let qty = i64::try_from(self.quantity).unwrap_or(i64::MAX);
        match self.side {
            Side::Buy => qty,
            Side::Sell => -qty,
        }
    }
}

/// Per-participant fills produced by one tick, in the order they happened
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReports(BTreeMap<AgentId, Vec<Fill>>);

impl ExecutionReports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fill to the participant's report
    pub fn push(&mut self, agent: AgentId, fill: Fill) {
        self.0.entry(agent).or_default().push(fill);
    }

    /// Fills for one participant (empty if it did not trade)
    pub fn get(&self, agent: &AgentId) -> &[Fill] {
        self.0.get(agent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, &[Fill])> {
        self.0.iter().map(|(id, fills)| (id, fills.as_slice()))
    }

    /// Number of participants with at least one fill
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total quantity reported on one side across all participants
    pub fn total_quantity(&self, side: Side) -> Quantity {
        self.0
            .values()
            .flatten()
            .filter(|f| f.side == side)
            .map(|f| f.quantity)
            .sum()
    }
}
