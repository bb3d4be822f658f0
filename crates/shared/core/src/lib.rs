//! Agora Core Domain
//!
//! Pure domain types for the Agora single-instrument market simulator.
//! This crate contains no I/O and no randomness, and is 100% unit testable.

pub mod entities;
pub mod error;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    Action, ActionKind, ExecutionReports, Fill, MarketState, Order, Portfolio, Side, Trade,
};
pub use error::OrderError;
pub use values::{AgentId, MAX_QUANTITY, PRICE_DECIMALS, Price, Quantity, Sequence, Tick};
