use serde::{Deserialize, Serialize};

use super::Side;
use crate::error::OrderError;
use crate::values::{AgentId, MAX_QUANTITY, Price, Quantity, Sequence};

/// A limit order resting on the book for the current tick
///
/// Market orders never rest, so every order here carries a price. The arrival `sequence` is tick-local and never reassigned, so a
/// partially filled order keeps its time priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub owner: AgentId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub sequence: Sequence,
}

impl Order {
    /// Create a resting limit order
    pub fn limit(
        owner: AgentId,
        side: Side,
        price: Price,
        quantity: Quantity,
        sequence: Sequence,
    ) -> Result<Self, OrderError> {
        validate(Some(price), quantity)?;
        Ok(Self {
            owner,
            side,
            price,
            quantity,
            sequence,
        })
    }

    /// Returns a copy of this order carrying only the unfilled residual
    ///
    /// Returns `None` once nothing is left, so exhausted orders are dropped
    /// instead of being kept around at zero quantity.
    pub fn residual(&self, filled: Quantity) -> Option<Self> {
        let remaining = self.quantity.saturating_sub(filled);
        (remaining > 0).then(|| Self {
            quantity: remaining,
            ..self.clone()
        })
    }
}

/// Shared order-parameter checks for limit and market submissions
pub(crate) fn validate(price: Option<Price>, quantity: Quantity) -> Result<(), OrderError> {
    if quantity == 0 {
        return Err(OrderError::NonPositiveQuantity(quantity));
    }
    if quantity > MAX_QUANTITY {
        return Err(OrderError::QuantityTooLarge(quantity));
    }
    match price {
        Some(p) if p < Price::ZERO => Err(OrderError::NegativePrice(p)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_limit_rejects_zero_quantity() {
        let err = Order::limit(AgentId::new("a"), Side::Buy, dec!(100), 0, 0).unwrap_err();
        assert_eq!(err, OrderError::NonPositiveQuantity(0));
    }

    #[test]
    fn test_limit_rejects_negative_price() {
        let err = Order::limit(AgentId::new("a"), Side::Sell, dec!(-1), 5, 0).unwrap_err();
        assert_eq!(err, OrderError::NegativePrice(dec!(-1)));
    }

    #[test]
    fn test_limit_rejects_quantity_beyond_signed_range() {
        let err =
            Order::limit(AgentId::new("a"), Side::Buy, dec!(100), MAX_QUANTITY + 1, 0).unwrap_err();
        assert_eq!(err, OrderError::QuantityTooLarge(MAX_QUANTITY + 1));
        assert!(Order::limit(AgentId::new("a"), Side::Buy, dec!(100), MAX_QUANTITY, 0).is_ok());
    }

    #[test]
    fn test_limit_keeps_its_price() {
        let order = Order::limit(AgentId::new("a"), Side::Sell, dec!(101.5), 3, 0).unwrap();
        assert_eq!(order.price, dec!(101.5));
        assert_eq!(order.residual(1).unwrap().price, dec!(101.5));
    }

    #[test]
    fn test_residual_keeps_sequence() {
        let order = Order::limit(AgentId::new("a"), Side::Buy, dec!(100), 10, 7).unwrap();

        let rest = order.residual(4).unwrap();
        assert_eq!(rest.quantity, 6);
        assert_eq!(rest.sequence, 7);

        assert!(order.residual(10).is_none());
    }
}
