use std::cmp::{Ordering, Reverse};

use agora_core::{Price, Sequence, Side};

/// Price-time priority key for a resting order
///
/// Side queues are max-heaps, so the best order must compare greatest:
/// bids rank by price, asks by negated price, and at equal price the
/// earlier arrival wins. Sequences are unique per tick, so no two keys in a
/// queue ever compare equal and pop order never depends on insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookPriority {
    rank: Price,
    arrival: Reverse<Sequence>,
}

impl BookPriority {
    pub fn new(side: Side, price: Price, sequence: Sequence) -> Self {
        let rank = match side {
            Side::Buy => price,
            Side::Sell => -price,
        };
        Self {
            rank,
            arrival: Reverse(sequence),
        }
    }

    pub fn sequence(&self) -> Sequence {
        self.arrival.0
    }
}

impl Ord for BookPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.arrival.cmp(&other.arrival))
    }
}

impl PartialOrd for BookPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_higher_bid_wins() {
        let low = BookPriority::new(Side::Buy, dec!(99), 0);
        let high = BookPriority::new(Side::Buy, dec!(100), 1);
        assert!(high > low);
    }

    #[test]
    fn test_lower_ask_wins() {
        let low = BookPriority::new(Side::Sell, dec!(99), 1);
        let high = BookPriority::new(Side::Sell, dec!(100), 0);
        assert!(low > high);
    }

    #[test]
    fn test_earlier_arrival_wins_at_equal_price() {
        let first = BookPriority::new(Side::Buy, dec!(100), 3);
        let second = BookPriority::new(Side::Buy, dec!(100), 8);
        assert!(first > second);

        let first = BookPriority::new(Side::Sell, dec!(100), 3);
        let second = BookPriority::new(Side::Sell, dec!(100), 8);
        assert!(first > second);
    }

    #[test]
    fn test_trailing_zeros_do_not_break_ties() {
        // 100 and 100.00 are the same price level
        let first = BookPriority::new(Side::Sell, dec!(100), 0);
        let second = BookPriority::new(Side::Sell, dec!(100.00), 1);
        assert!(first > second);
        assert_eq!(first.sequence(), 0);
    }
}
