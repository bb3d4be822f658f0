mod action;
mod fill;
mod market_state;
mod order;
mod portfolio;
mod side;
mod trade;

pub use action::{Action, ActionKind};
pub use fill::{ExecutionReports, Fill};
pub use market_state::MarketState;
pub use order::Order;
pub use portfolio::Portfolio;
pub use side::Side;
pub use trade::Trade;
