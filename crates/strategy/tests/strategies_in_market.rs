//! Integration test: strategies trading against the environment
//!
//! Tests the complete flow:
//! 1. Market maker rests a bid
//! 2. A seller crosses it through the environment
//! 3. Fills flow back and the maker requotes with skew
//! 4. A mixed population keeps its books balanced over many ticks

use agora_core::{Action, AgentId, Side};
use agora_environment::{Environment, EnvironmentConfig};
use agora_ports::Agent;
use agora_strategy::{
    ArbitrageConfig, Arbitrageur, MarketMaker, MarketMakerConfig, StrategyAgent, TrendFollower,
    TrendFollowerConfig,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn frozen_env() -> Environment {
    Environment::new(EnvironmentConfig {
        volatility: 0.0,
        seed: Some(5),
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_market_maker_quote_lifted_then_skews() {
    let _ = env_logger::try_init();

    let mut env = frozen_env();
    let mut mm = MarketMaker::new("MM_01", MarketMakerConfig::default()).unwrap();
    let seller = AgentId::new("Seller");

    // Three ticks of selling into the maker's bid
    for _ in 0..3 {
        let state = env.state();
        let quote = mm.act(&state);
        assert_eq!(quote.map(|a| a.side()), Some(Side::Buy));

        let actions = vec![
            (mm.id().clone(), quote),
            (seller.clone(), Some(Action::market_sell(10))),
        ];
        let outcome = env.step(&actions).unwrap();
        mm.on_fills(outcome.reports.get(mm.id()));
    }

    assert_eq!(mm.portfolio().inventory, 30);

    // Long beyond the band: now offering, below the unskewed ask
    let quote = mm.act(&env.state()).unwrap();
    assert_eq!(quote.side(), Side::Sell);
    assert!(quote.price().unwrap() < dec!(100.1));
}

#[test]
fn test_mixed_population_conserves_inventory_and_cash() {
    let mut env = Environment::new(EnvironmentConfig::default().with_seed(11)).unwrap();
    let mut agents: Vec<StrategyAgent> = vec![
        MarketMaker::new("MM_01", MarketMakerConfig::default())
            .unwrap()
            .into(),
        TrendFollower::new("Trend_01", TrendFollowerConfig::default())
            .unwrap()
            .into(),
        Arbitrageur::with_seed("Arb_01", ArbitrageConfig::default(), Some(12))
            .unwrap()
            .into(),
    ];
    let initial_cash: Decimal = agents.iter().map(|a| a.portfolio().cash).sum();

    for _ in 0..300 {
        let state = env.state();
        let actions: Vec<_> = agents
            .iter_mut()
            .map(|a| {
                let action = a.act(&state);
                (a.id().clone(), action)
            })
            .collect();
        let outcome = env.step(&actions).unwrap();
        for agent in agents.iter_mut() {
            let fills = outcome.reports.get(agent.id()).to_vec();
            agent.on_fills(&fills);
        }
    }

    // Every unit bought was sold by someone inside the population
    let net_inventory: i64 = agents.iter().map(|a| a.portfolio().inventory).sum();
    assert_eq!(net_inventory, 0);
    let total_cash: Decimal = agents.iter().map(|a| a.portfolio().cash).sum();
    assert_eq!(total_cash, initial_cash);
}
