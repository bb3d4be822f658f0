//! Agora Matching
//!
//! The single-instrument order book. It lives for exactly one tick:
//! limit orders are inserted, crossed limits are resolved, market orders
//! walk the remaining liquidity, and the trade log is drained by the caller.

mod order_book;
mod priority;

pub use order_book::{MarketFill, OrderBook};
pub use priority::BookPriority;
