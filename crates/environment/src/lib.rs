//! Agora Environment
//!
//! Owns the order book and the mid-price process and runs one tick at a
//! time:
//!
//! ```text
//!   actions ──► validate ──► price walk ──► reset book ──► limit phase
//!                                                              │
//!   state + reports ◄── snapshot ◄── trade drain ◄── market phase ◄── cross resolution
//! ```
//!
//! Everything is synchronous and single-writer: agents only ever see the
//! [`agora_core::MarketState`] copies and execution reports it emits.

pub mod config;
pub mod environment;
pub mod error;
pub mod price_process;

pub use config::EnvironmentConfig;
pub use environment::{Environment, RejectedAction, StepOutcome};
pub use error::{EnvironmentError, Result};
pub use price_process::{MAX_VOLATILITY, RandomWalk};
