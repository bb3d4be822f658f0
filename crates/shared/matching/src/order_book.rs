use agora_core::{
    AgentId, MAX_QUANTITY, Order, OrderError, Price, Quantity, Sequence, Side, Tick, Trade,
};
use log::debug;
use priority_queue::PriorityQueue;
use rust_decimal::Decimal;

use crate::priority::BookPriority;

type SideQueue = PriorityQueue<Order, BookPriority>;

/// Result of a market order walking the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketFill {
    /// Quantity executed; never more than requested
    pub filled: Quantity,
    /// Volume-weighted average execution price, zero when nothing filled
    pub avg_price: Price,
}

impl MarketFill {
    pub const EMPTY: MarketFill = MarketFill {
        filled: 0,
        avg_price: Decimal::ZERO,
    };

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }
}

/// Order book for a single instrument, valid for one tick
///
/// Bids and asks are kept in price-time priority. The book is emptied by
/// [`OrderBook::reset`] at the start of every tick, so no liquidity and no
/// trade ever crosses a tick boundary.
#[derive(Default)]
pub struct OrderBook {
    /// Bids, best (highest price, earliest arrival) first
    bids: SideQueue,
    /// Asks, best (lowest price, earliest arrival) first
    asks: SideQueue,
    /// Trades produced since the last drain
    trades: Vec<Trade>,
    /// Next arrival number handed out this tick
    next_sequence: Sequence,
    /// Tick stamped on produced trades
    tick: Tick,
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBook")
            .field("tick", &self.tick)
            .field("bids_count", &self.bids.len())
            .field("asks_count", &self.asks.len())
            .field("pending_trades", &self.trades.len())
            .field("next_sequence", &self.next_sequence)
            .finish()
    }
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard both side queues and the trade log and start `tick`
    pub fn reset(&mut self, tick: Tick) {
        self.bids.clear();
        self.asks.clear();
        self.trades.clear();
        self.next_sequence = 0;
        self.tick = tick;
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Insert a resting limit order
    ///
    /// Returns the arrival sequence assigned to the order.
    pub fn submit_limit(
        &mut self,
        owner: AgentId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Result<Sequence, OrderError> {
        let sequence = self.next_sequence;
        let order = Order::limit(owner, side, price, quantity, sequence)?;
        self.next_sequence += 1;

        let priority = BookPriority::new(side, price, sequence);
        self.queue_mut(side).push(order, priority);
        Ok(sequence)
    }

    /// Resolve every crossed pair of resting limit orders
    ///
    /// Trades execute at the resting ask's price. Residuals go back into
    /// their queue with their original arrival sequence. Returns the number
    /// of trades produced.
    pub fn match_crossed_limits(&mut self) -> usize {
        let mut produced = 0;

        // A crossed book has both sides populated, so both pops succeed
        while self.is_crossed() {
            let (Some((bid, bid_priority)), Some((ask, ask_priority))) =
                (self.bids.pop(), self.asks.pop())
            else {
                break;
            };
            let (bid_price, ask_price) = (bid.price, ask.price);

            let quantity = bid.quantity.min(ask.quantity);
            debug!(
                "Crossed match: {} buys {} from {} @ {} (bid {})",
                bid.owner, quantity, ask.owner, ask_price, bid_price
            );

            self.trades.push(Trade {
                buyer: bid.owner.clone(),
                seller: ask.owner.clone(),
                price: ask_price,
                quantity,
                tick: self.tick,
                aggressor: None,
            });
            produced += 1;

            if let Some(rest) = bid.residual(quantity) {
                self.bids.push(rest, bid_priority);
            }
            if let Some(rest) = ask.residual(quantity) {
                self.asks.push(rest, ask_priority);
            }
        }

        produced
    }

    /// Execute a market order against the opposing side
    ///
    /// Consumes liquidity from the best price outward without a price
    /// limit. Whatever cannot be filled is dropped; it is never queued.
    pub fn submit_market(
        &mut self,
        owner: AgentId,
        side: Side,
        quantity: Quantity,
    ) -> Result<MarketFill, OrderError> {
        if quantity == 0 {
            return Err(OrderError::NonPositiveQuantity(quantity));
        }
        if quantity > MAX_QUANTITY {
            return Err(OrderError::QuantityTooLarge(quantity));
        }

        let tick = self.tick;
        let mut remaining = quantity;
        let mut filled: Quantity = 0;
        let mut total_cost = Decimal::ZERO;
        let mut trades = Vec::new();

        let book = self.queue_mut(side.opposite());
        while remaining > 0 {
            let Some((resting, priority)) = book.pop() else {
                break;
            };
            let price = resting.price;

            let fill = remaining.min(resting.quantity);
            remaining -= fill;
            filled += fill;
            total_cost += price * Decimal::from(fill);

            let (buyer, seller) = match side {
                Side::Buy => (owner.clone(), resting.owner.clone()),
                Side::Sell => (resting.owner.clone(), owner.clone()),
            };
            trades.push(Trade {
                buyer,
                seller,
                price,
                quantity: fill,
                tick,
                aggressor: Some(side),
            });

            if let Some(rest) = resting.residual(fill) {
                book.push(rest, priority);
            }
        }

        if remaining > 0 {
            debug!(
                "Market {} from {} dropped {} of {} unfilled",
                side, owner, remaining, quantity
            );
        }
        self.trades.extend(trades);

        if filled == 0 {
            return Ok(MarketFill::EMPTY);
        }
        Ok(MarketFill {
            filled,
            avg_price: total_cost / Decimal::from(filled),
        })
    }

    /// Best bid and best ask, without mutating the book
    pub fn snapshot(&self) -> (Option<Price>, Option<Price>) {
        (self.best_bid(), self.best_ask())
    }

    /// Best bid price (highest buy order)
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.peek().map(|(order, _)| order.price)
    }

    /// Best ask price (lowest sell order)
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.peek().map(|(order, _)| order.price)
    }

    /// Whether the best bid meets or exceeds the best ask
    pub fn is_crossed(&self) -> bool {
        matches!(self.snapshot(), (Some(bid), Some(ask)) if bid >= ask)
    }

    /// Total resting buy quantity
    pub fn bid_depth(&self) -> Quantity {
        self.bids.iter().map(|(order, _)| order.quantity).sum()
    }

    /// Total resting sell quantity
    pub fn ask_depth(&self) -> Quantity {
        self.asks.iter().map(|(order, _)| order.quantity).sum()
    }

    /// Number of resting orders on both sides
    pub fn len(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Resting orders on one side, best first
    pub fn resting(&self, side: Side) -> Vec<Order> {
        let mut orders: Vec<_> = self
            .queue(side)
            .iter()
            .map(|(order, priority)| (order.clone(), *priority))
            .collect();
        orders.sort_by(|a, b| b.1.cmp(&a.1));
        orders.into_iter().map(|(order, _)| order).collect()
    }

    /// Trades produced since the last drain
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Remove and return the trade log in production order
    pub fn drain_trades(&mut self) -> Vec<Trade> {
        std::mem::take(&mut self.trades)
    }

    fn queue(&self, side: Side) -> &SideQueue {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn queue_mut(&mut self, side: Side) -> &mut SideQueue {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }
}
