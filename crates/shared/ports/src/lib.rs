//! Agora Ports
//!
//! Port definitions (traits) for the Agora market simulator.
//! These define the boundaries between the matching core and its
//! collaborators: the agents that decide, and the sinks that record.

mod agent;
mod error;
mod telemetry;

pub use agent::Agent;
pub use error::{TelemetryError, TelemetryResult};
pub use telemetry::{ActionRecord, MarketRecord, PortfolioRecord, TelemetrySink};
