use agora_core::{Action, AgentId, MarketState, Portfolio, Price, Quantity, Tick};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::TelemetryResult;

/// One row of market-state telemetry per tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketRecord {
    pub step: Tick,
    pub mid_price: Price,
    pub best_bid: Price,
    pub best_ask: Price,
}

impl MarketRecord {
    pub fn new(step: Tick, state: &MarketState) -> Self {
        Self {
            step,
            mid_price: state.mid_price,
            best_bid: state.best_bid,
            best_ask: state.best_ask,
        }
    }
}

/// One row per submitted (non-empty) agent action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    pub step: Tick,
    pub agent_id: AgentId,
    #[serde(rename = "type")]
    pub kind: String,
    pub side: String,
    /// Limit price, or the market marker for market orders
    pub price: String,
    pub quantity: Quantity,
}

impl ActionRecord {
    pub fn new(step: Tick, agent_id: AgentId, action: &Action) -> Self {
        Self {
            step,
            agent_id,
            kind: action.kind().as_str().to_string(),
            side: action.side().as_str().to_string(),
            price: action.price_or_marker(),
            quantity: action.quantity(),
        }
    }
}

/// One row per agent per tick with its mark-to-market portfolio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioRecord {
    pub step: Tick,
    pub agent_id: AgentId,
    pub inventory: i64,
    pub cash: Decimal,
    pub total_value: Decimal,
}

impl PortfolioRecord {
    pub fn new(step: Tick, agent_id: AgentId, portfolio: &Portfolio, mark_price: Price) -> Self {
        Self {
            step,
            agent_id,
            inventory: portfolio.inventory,
            cash: portfolio.cash,
            total_value: portfolio.total_value(mark_price),
        }
    }
}

/// Port for telemetry persistence
///
/// The simulation produces the records; implementations decide where
/// they go (files, memory, nowhere).
pub trait TelemetrySink {
    fn record_market(&mut self, record: &MarketRecord) -> TelemetryResult<()>;

    fn record_action(&mut self, record: &ActionRecord) -> TelemetryResult<()>;

    fn record_portfolio(&mut self, record: &PortfolioRecord) -> TelemetryResult<()>;

    /// Flush buffered records; the default does nothing
    fn flush(&mut self) -> TelemetryResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_action_record_for_market_order() {
        let record = ActionRecord::new(7, AgentId::new("Trend_01"), &Action::market_sell(5));
        assert_eq!(record.kind, "market");
        assert_eq!(record.side, "sell");
        assert_eq!(record.price, "MKT");
        assert_eq!(record.quantity, 5);
    }

    #[test]
    fn test_portfolio_record_values_at_mark() {
        let portfolio = Portfolio {
            cash: dec!(99000),
            inventory: 10,
        };
        let record = PortfolioRecord::new(1, AgentId::new("MM_01"), &portfolio, dec!(100.5));
        assert_eq!(record.total_value, dec!(100005.0));
    }
}
