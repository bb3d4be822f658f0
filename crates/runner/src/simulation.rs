//! Simulation - tick loop over one environment and a fixed agent population
//!
//! Per tick `t`:
//! 1. Every agent observes the current state and may submit one action
//! 2. The environment runs the tick
//! 3. Fills are handed back and portfolios marked at the new mid
//!
//! Every step is mirrored into the [`TelemetrySink`].

use agora_core::{AgentId, MarketState, Price, Quantity, Tick};
use agora_environment::{Environment, StepOutcome};
use agora_ports::{ActionRecord, Agent, MarketRecord, PortfolioRecord, TelemetrySink};
use agora_strategy::{Arbitrageur, MarketMaker, StrategyAgent, TrendFollower};
use log::{debug, info};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::config::{AgentSpec, SimulationConfig};
use crate::error::Result;

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    pub ticks: u64,
    pub total_trades: u64,
    pub total_volume: Quantity,
    /// Actions the environment left out for invalid parameters
    pub rejected_actions: u64,
    pub final_mid_price: Price,
    /// Mark-to-market value per agent at the final mid
    pub final_values: BTreeMap<AgentId, Decimal>,
}

/// Build the agent population in configuration order
///
/// Arbitrageurs without an explicit seed get `environment seed + index + 1`,
/// so a seeded run is reproducible end to end.
pub fn build_agents(config: &SimulationConfig) -> Result<Vec<StrategyAgent>> {
    let base_seed = config.environment.seed;
    let mut agents = Vec::with_capacity(config.agents.len());

    for (index, spec) in config.agents.iter().enumerate() {
        let agent: StrategyAgent = match spec {
            AgentSpec::MarketMaker { id, params } => {
                MarketMaker::new(id.clone(), params.clone())?.into()
            }
            AgentSpec::TrendFollower { id, params } => {
                TrendFollower::new(id.clone(), params.clone())?.into()
            }
            AgentSpec::Arbitrageur { id, params, seed } => {
                let seed = seed.or_else(|| base_seed.map(|s| s.wrapping_add(index as u64 + 1)));
                Arbitrageur::with_seed(id.clone(), params.clone(), seed)?.into()
            }
        };
        debug!("Created {} agent {}", agent.agent_type(), agent.id());
        agents.push(agent);
    }

    Ok(agents)
}

/// Multi-agent simulation
pub struct Simulation<S: TelemetrySink> {
    env: Environment,
    agents: Vec<StrategyAgent>,
    sink: S,
    ticks_run: u64,
    total_trades: u64,
    total_volume: Quantity,
    total_rejected: u64,
}

impl<S: TelemetrySink> Simulation<S> {
    pub fn new(env: Environment, agents: Vec<StrategyAgent>, sink: S) -> Self {
        Self {
            env,
            agents,
            sink,
            ticks_run: 0,
            total_trades: 0,
            total_volume: 0,
            total_rejected: 0,
        }
    }

    /// Build environment and population from configuration
    pub fn from_config(config: &SimulationConfig, sink: S) -> Result<Self> {
        config.validate()?;
        let env = Environment::new(config.environment.clone())?;
        let agents = build_agents(config)?;
        Ok(Self::new(env, agents, sink))
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn agents(&self) -> &[StrategyAgent] {
        &self.agents
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn state(&self) -> MarketState {
        self.env.state()
    }

    /// Run a single tick
    ///
    /// Every submitted action is logged, including ones the environment
    /// rejects. Nothing reaches the sink unless the environment step
    /// succeeds.
    pub fn tick(&mut self) -> Result<StepOutcome> {
        let step: Tick = self.env.tick();
        let state = self.env.state();

        let actions: Vec<_> = self
            .agents
            .iter_mut()
            .map(|agent| (agent.id().clone(), agent.act(&state)))
            .collect();

        let outcome = self.env.step(&actions)?;

        for (agent, action) in &actions {
            if let Some(action) = action {
                self.sink
                    .record_action(&ActionRecord::new(step, agent.clone(), action))?;
            }
        }
        self.sink
            .record_market(&MarketRecord::new(step, &outcome.state))?;

        let mark = outcome.state.mid_price;
        for agent in self.agents.iter_mut() {
            let fills = outcome.reports.get(agent.id());
            agent.on_fills(fills);

            let record = PortfolioRecord::new(step, agent.id().clone(), agent.portfolio(), mark);
            self.sink.record_portfolio(&record)?;
        }

        self.ticks_run += 1;
        self.total_rejected += outcome.rejected.len() as u64;
        self.total_trades += outcome.trades.len() as u64;
        self.total_volume += outcome.trades.iter().map(|t| t.quantity).sum::<Quantity>();

        Ok(outcome)
    }

    /// Run `ticks` ticks and flush the sink
    pub fn run(&mut self, ticks: u64) -> Result<SimulationSummary> {
        info!(
            "Running {} ticks with {} agents (mid={})",
            ticks,
            self.agents.len(),
            self.env.mid_price()
        );

        for _ in 0..ticks {
            self.tick()?;
        }
        self.sink.flush()?;

        let summary = self.summary();
        info!(
            "Simulation complete: {} ticks, {} trades, volume {}, {} rejected, final mid {}",
            summary.ticks,
            summary.total_trades,
            summary.total_volume,
            summary.rejected_actions,
            summary.final_mid_price
        );
        Ok(summary)
    }

    pub fn summary(&self) -> SimulationSummary {
        let mark = self.env.state().mid_price;
        let final_values = self
            .agents
            .iter()
            .map(|a| (a.id().clone(), a.portfolio().total_value(mark)))
            .collect();

        SimulationSummary {
            ticks: self.ticks_run,
            total_trades: self.total_trades,
            total_volume: self.total_volume,
            rejected_actions: self.total_rejected,
            final_mid_price: mark,
            final_values,
        }
    }
}

impl<S: TelemetrySink> std::fmt::Debug for Simulation<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("tick", &self.env.tick())
            .field("agents", &self.agents.len())
            .field("ticks_run", &self.ticks_run)
            .field("total_trades", &self.total_trades)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::error::RunnerError;
    use crate::telemetry::MemoryTelemetry;
    use agora_environment::EnvironmentConfig;

    fn seeded_config(seed: u64) -> SimulationConfig {
        SimulationConfig {
            environment: EnvironmentConfig::default().with_seed(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_default_population() {
        let agents = build_agents(&SimulationConfig::default()).unwrap();
        let types: Vec<_> = agents.iter().map(|a| a.agent_type()).collect();
        assert_eq!(types, ["MarketMaker", "TrendFollower", "Arbitrageur"]);
    }

    #[test]
    fn test_tick_records_one_pnl_row_per_agent() {
        let mut sim = Simulation::from_config(&seeded_config(1), MemoryTelemetry::new()).unwrap();

        sim.tick().unwrap();
        sim.tick().unwrap();

        let sink = sim.sink();
        assert_eq!(sink.markets.len(), 2);
        assert_eq!(sink.portfolios.len(), 6);
        assert_eq!(sink.markets[0].step, 0);
        assert_eq!(sink.markets[1].step, 1);
        // The market maker quotes every tick
        assert!(sink.actions.iter().filter(|a| a.agent_id.as_str() == "MM_01").count() == 2);
    }

    #[test]
    fn test_from_config_refuses_shared_ids() {
        let mut config = seeded_config(3);
        config.agents.push(AgentSpec::TrendFollower {
            id: AgentId::new("MM_01"),
            params: Default::default(),
        });

        let err = Simulation::from_config(&config, MemoryTelemetry::new()).unwrap_err();

        assert!(matches!(
            err,
            RunnerError::Config(ConfigError::DuplicateAgent(ref id)) if id.as_str() == "MM_01"
        ));
    }

    #[test]
    fn test_failed_step_writes_nothing() {
        let env = Environment::new(EnvironmentConfig::default().with_seed(1)).unwrap();
        let twins = vec![
            StrategyAgent::from(MarketMaker::new("MM_01", Default::default()).unwrap()),
            StrategyAgent::from(MarketMaker::new("MM_01", Default::default()).unwrap()),
        ];
        let mut sim = Simulation::new(env, twins, MemoryTelemetry::new());

        assert!(sim.tick().is_err());

        let sink = sim.sink();
        assert!(sink.actions.is_empty());
        assert!(sink.markets.is_empty());
        assert!(sink.portfolios.is_empty());
        assert_eq!(sim.summary().ticks, 0);
    }

    #[test]
    fn test_seeded_runs_match() {
        let mut a = Simulation::from_config(&seeded_config(17), MemoryTelemetry::new()).unwrap();
        let mut b = Simulation::from_config(&seeded_config(17), MemoryTelemetry::new()).unwrap();

        let sa = a.run(200).unwrap();
        let sb = b.run(200).unwrap();

        assert_eq!(sa, sb);
        assert_eq!(a.sink().actions, b.sink().actions);
    }
}
