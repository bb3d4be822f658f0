use agora_core::{Action, AgentId, Fill, MarketState, Portfolio};
use agora_ports::Agent;

use crate::arbitrageur::Arbitrageur;
use crate::market_maker::MarketMaker;
use crate::trend_follower::TrendFollower;

/// Any of the built-in strategies
///
/// The population is a closed set, so dispatch is a plain `match` rather
/// than a trait object.
#[derive(Debug)]
pub enum StrategyAgent {
    MarketMaker(MarketMaker),
    TrendFollower(TrendFollower),
    Arbitrageur(Arbitrageur),
}

impl StrategyAgent {
    fn inner(&self) -> &dyn Agent {
        match self {
            StrategyAgent::MarketMaker(a) => a,
            StrategyAgent::TrendFollower(a) => a,
            StrategyAgent::Arbitrageur(a) => a,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Agent {
        match self {
            StrategyAgent::MarketMaker(a) => a,
            StrategyAgent::TrendFollower(a) => a,
            StrategyAgent::Arbitrageur(a) => a,
        }
    }
}

impl Agent for StrategyAgent {
    fn id(&self) -> &AgentId {
        self.inner().id()
    }

    fn act(&mut self, state: &MarketState) -> Option<Action> {
        self.inner_mut().act(state)
    }

    fn on_fills(&mut self, fills: &[Fill]) {
        self.inner_mut().on_fills(fills)
    }

    fn portfolio(&self) -> &Portfolio {
        self.inner().portfolio()
    }

    fn agent_type(&self) -> &'static str {
        self.inner().agent_type()
    }
}

impl From<MarketMaker> for StrategyAgent {
    fn from(agent: MarketMaker) -> Self {
        StrategyAgent::MarketMaker(agent)
    }
}

impl From<TrendFollower> for StrategyAgent {
    fn from(agent: TrendFollower) -> Self {
        StrategyAgent::TrendFollower(agent)
    }
}

impl From<Arbitrageur> for StrategyAgent {
    fn from(agent: Arbitrageur) -> Self {
        StrategyAgent::Arbitrageur(agent)
    }
}
