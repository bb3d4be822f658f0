use agora_core::{
    Action, AgentId, ExecutionReports, Fill, MarketState, OrderError, Price, Side, Tick, Trade,
};
use agora_matching::OrderBook;
use log::{debug, warn};
use rand::rngs::StdRng;
use std::collections::BTreeSet;

use crate::config::EnvironmentConfig;
use crate::error::{EnvironmentError, Result};
use crate::price_process::RandomWalk;

/// An action left out of the tick because its parameters were invalid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedAction {
    pub agent: AgentId,
    pub action: Action,
    pub reason: OrderError,
}

/// What one tick produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Market state observable for the next tick
    pub state: MarketState,
    /// Fills per participant, market-order aggregates first, then the
    /// resting side of every trade in production order
    pub reports: ExecutionReports,
    /// Every trade the tick produced, in production order
    pub trades: Vec<Trade>,
    /// Actions that never reached the book, in submission order
    pub rejected: Vec<RejectedAction>,
}

/// Single-instrument market environment
///
/// Exclusively owns the order book and the mid-price process. Each call to
/// [`Environment::step`] runs one full tick to completion.
#[derive(Debug)]
pub struct Environment {
    config: EnvironmentConfig,
    book: OrderBook,
    price: RandomWalk,
    tick: Tick,
    state: MarketState,
}

impl Environment {
    /// Create an environment whose price walk is seeded from the config
    pub fn new(config: EnvironmentConfig) -> Result<Self> {
        config.validate()?;
        let price =
            RandomWalk::with_seed(config.initial_mid_price, config.volatility, config.seed)?;
        Ok(Self::assemble(config, price))
    }

    /// Create an environment driven by an explicit generator
    pub fn with_rng(config: EnvironmentConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let price = RandomWalk::new(config.initial_mid_price, config.volatility, rng)?;
        Ok(Self::assemble(config, price))
    }

    fn assemble(config: EnvironmentConfig, price: RandomWalk) -> Self {
        let state = MarketState::theoretical(0, config.initial_mid_price, config.spread);
        Self {
            config,
            book: OrderBook::new(),
            price,
            tick: 0,
            state,
        }
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    /// Index of the next tick to be processed
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn mid_price(&self) -> Price {
        self.price.mid_price()
    }

    /// Last emitted market state (what agents decide on)
    pub fn state(&self) -> MarketState {
        self.state
    }

    /// Read-only view of the book as left by the last tick
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Run one tick with at most one action per agent
    ///
    /// Actions are processed in slice order. An action with invalid
    /// parameters is logged, reported in [`StepOutcome::rejected`] and left
    /// out; everyone else still trades. A repeated agent id or a mid-price
    /// leaving the `Decimal` range fails the whole call before the book is
    /// touched.
    pub fn step(&mut self, actions: &[(AgentId, Option<Action>)]) -> Result<StepOutcome> {
        let mut seen = BTreeSet::new();
        for (agent, _) in actions {
            if !seen.insert(agent) {
                return Err(EnvironmentError::DuplicateAgent(agent.clone()));
            }
        }

        let mut accepted = Vec::with_capacity(actions.len());
        let mut rejected = Vec::new();
        for (agent, action) in actions {
            let Some(action) = *action else {
                continue;
            };
            match action.validate() {
                Ok(()) => accepted.push((agent, action)),
                Err(reason) => rejected.push(reject(agent, action, reason)),
            }
        }

        // Trading never feeds back into the walk, so it can be drawn first
        let mid_price = self.price.step()?;

        let tick = self.tick;
        self.book.reset(tick);
        let mut reports = ExecutionReports::new();

        // Limit phase (liquidity provision)
        for &(agent, action) in &accepted {
            if let Action::Limit {
                side,
                price,
                quantity,
            } = action
            {
                if let Err(reason) = self.book.submit_limit(agent.clone(), side, price, quantity) {
                    rejected.push(reject(agent, action, reason));
                }
            }
        }

        let crossed = self.book.match_crossed_limits();

        // Market phase (liquidity taking)
        for &(agent, action) in &accepted {
            if let Action::Market { side, quantity } = action {
                match self.book.submit_market(agent.clone(), side, quantity) {
                    Ok(fill) if !fill.is_empty() => {
                        reports.push(agent.clone(), Fill::new(side, fill.filled, fill.avg_price));
                    }
                    Ok(_) => {}
                    Err(reason) => rejected.push(reject(agent, action, reason)),
                }
            }
        }

        let trades = self.book.drain_trades();
        attribute_trades(&trades, &mut reports);

        let (best_bid, best_ask) = self.book.snapshot();
        let state =
            MarketState::from_book(tick + 1, mid_price, best_bid, best_ask, self.config.spread);

        debug!(
            "Tick {}: {} crossed, {} trades, {} rejected, mid={}, bid={}, ask={}",
            tick,
            crossed,
            trades.len(),
            rejected.len(),
            state.mid_price,
            state.best_bid,
            state.best_ask
        );

        self.tick += 1;
        self.state = state;

        Ok(StepOutcome {
            state,
            reports,
            trades,
            rejected,
        })
    }
}

fn reject(agent: &AgentId, action: Action, reason: OrderError) -> RejectedAction {
    warn!(
        "Rejecting {} {} from {}: {}",
        action.kind().as_str(),
        action.side(),
        agent,
        reason
    );
    RejectedAction {
        agent: agent.clone(),
        action,
        reason,
    }
}

/// Turn each trade into a fill for every counterparty not yet reported
fn attribute_trades(trades: &[Trade], reports: &mut ExecutionReports) {
    for trade in trades {
        if trade.is_unattributed(Side::Buy) {
            reports.push(
                trade.buyer.clone(),
                Fill::new(Side::Buy, trade.quantity, trade.price),
            );
        }
        if trade.is_unattributed(Side::Sell) {
            reports.push(
                trade.seller.clone(),
                Fill::new(Side::Sell, trade.quantity, trade.price),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flat_env() -> Environment {
        Environment::new(EnvironmentConfig {
            volatility: 0.0,
            seed: Some(1),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_initial_state_is_theoretical() {
        let env = flat_env();
        let state = env.state();
        assert_eq!(state.tick, 0);
        assert_eq!(state.best_bid, dec!(99.95));
        assert_eq!(state.best_ask, dec!(100.05));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = Environment::new(EnvironmentConfig {
            volatility: -1.0,
            ..Default::default()
        });
        assert!(matches!(result, Err(EnvironmentError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_tick_advances() {
        let mut env = flat_env();
        let outcome = env.step(&[]).unwrap();

        assert_eq!(outcome.state.tick, 1);
        assert!(outcome.reports.is_empty());
        assert!(outcome.trades.is_empty());
        assert_eq!(env.tick(), 1);
        assert_eq!(env.state(), outcome.state);
    }

    #[test]
    fn test_market_taker_reported_once() {
        let mut env = flat_env();
        let actions = vec![
            (AgentId::new("S1"), Some(Action::limit_sell(dec!(100), 4))),
            (AgentId::new("B1"), Some(Action::market_buy(10))),
        ];

        let outcome = env.step(&actions).unwrap();

        let buyer = outcome.reports.get(&AgentId::new("B1"));
        assert_eq!(buyer, &[Fill::new(Side::Buy, 4, dec!(100))]);
        let seller = outcome.reports.get(&AgentId::new("S1"));
        assert_eq!(seller, &[Fill::new(Side::Sell, 4, dec!(100))]);
    }

    #[test]
    fn test_invalid_action_is_dropped_and_tick_proceeds() {
        let mut env = flat_env();
        let actions = vec![
            (AgentId::new("S1"), Some(Action::limit_sell(dec!(100), 4))),
            (AgentId::new("MM"), Some(Action::limit_buy(dec!(-0.05), 10))),
            (AgentId::new("B1"), Some(Action::market_buy(0))),
            (AgentId::new("B2"), Some(Action::market_buy(3))),
        ];

        let outcome = env.step(&actions).unwrap();

        let rejected: Vec<_> = outcome.rejected.iter().map(|r| r.agent.as_str()).collect();
        assert_eq!(rejected, ["MM", "B1"]);
        assert_eq!(
            outcome.rejected[0].reason,
            OrderError::NegativePrice(dec!(-0.05))
        );
        assert_eq!(
            outcome.reports.get(&AgentId::new("B2")),
            &[Fill::new(Side::Buy, 3, dec!(100))]
        );
        assert!(outcome.reports.get(&AgentId::new("MM")).is_empty());
        assert_eq!(outcome.state.best_ask, dec!(100));
        assert_eq!(env.tick(), 1);
    }

    #[test]
    fn test_duplicate_agent_fails_before_mutation() {
        let mut env = flat_env();
        let before = env.state();
        let actions = vec![
            (AgentId::new("A"), Some(Action::limit_sell(dec!(100), 4))),
            (AgentId::new("B"), None),
            (AgentId::new("A"), Some(Action::market_buy(4))),
        ];

        let err = env.step(&actions).unwrap_err();

        assert_eq!(err, EnvironmentError::DuplicateAgent(AgentId::new("A")));
        assert_eq!(env.tick(), 0);
        assert_eq!(env.state(), before);
        assert!(env.book().is_empty());
    }
}
