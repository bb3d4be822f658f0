use thiserror::Error;

use crate::values::{Price, Quantity};

/// Rejection reasons for order parameters
///
/// Raised before an order touches the book; a rejected order never
/// produces trades or partial state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Order quantity must be positive, got {0}")]
    NonPositiveQuantity(Quantity),

    #[error("Order quantity {0} exceeds the signed inventory range")]
    QuantityTooLarge(Quantity),

    #[error("Limit price must not be negative, got {0}")]
    NegativePrice(Price),
}
