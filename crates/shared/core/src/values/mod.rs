mod agent_id;

use rust_decimal::Decimal;

pub use agent_id::AgentId;

/// Number of decimal places prices are kept at after a random-walk update
pub const PRICE_DECIMALS: u32 = 8;

/// Price value - uses Decimal for exact, totally ordered arithmetic
pub type Price = Decimal;

/// Quantity value - whole units of the instrument
pub type Quantity = u64;

/// Largest accepted order quantity; keeps signed inventory changes exact
pub const MAX_QUANTITY: Quantity = i64::MAX as Quantity;

/// Discrete simulation step index
pub type Tick = u64;

/// Tick-local arrival number, restarts at zero on every book reset
pub type Sequence = u64;
