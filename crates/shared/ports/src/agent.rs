use agora_core::{Action, AgentId, Fill, MarketState, Portfolio};

/// Port for trading agents
///
/// An agent only ever sees immutable snapshots: it observes the market
/// state, optionally returns one order intent, and later receives the
/// fills attributed to it. It never holds a reference into the book.
pub trait Agent {
    /// Get agent's unique identifier
    fn id(&self) -> &AgentId;

    /// Decide this tick's order intent from the observed market state
    fn act(&mut self, state: &MarketState) -> Option<Action>;

    /// Called once per tick with the fills attributed to this agent
    fn on_fills(&mut self, fills: &[Fill]);

    /// Current cash and inventory
    fn portfolio(&self) -> &Portfolio;

    /// Get agent type name (for logging/metrics)
    fn agent_type(&self) -> &'static str;
}
