//! Mid-price process
//!
//! Arithmetic Gaussian random walk driven by an explicitly owned,
//! seedable generator. Trading activity never feeds back into it.

use agora_core::{PRICE_DECIMALS, Price};
use rand::prelude::*;
use rand_distr::Normal;
use rust_decimal::Decimal;

use crate::error::{EnvironmentError, Result};

/// Largest accepted per-tick standard deviation
///
/// Keeps every plausible draw convertible to `Decimal` and far away from
/// its range over any realistic run length.
pub const MAX_VOLATILITY: f64 = 1e9;

pub struct RandomWalk {
    mid_price: Price,
    normal: Normal<f64>,
    rng: StdRng,
}

impl RandomWalk {
    /// Create a walk starting at `initial` with per-step standard deviation
    /// `volatility`
    pub fn new(initial: Price, volatility: f64, rng: StdRng) -> Result<Self> {
        if !(0.0..=MAX_VOLATILITY).contains(&volatility) {
            return Err(EnvironmentError::InvalidConfig(format!(
                "volatility must be between 0 and {MAX_VOLATILITY}, got {volatility}"
            )));
        }
        let normal = Normal::new(0.0, volatility)
            .map_err(|e| EnvironmentError::InvalidConfig(format!("volatility: {e}")))?;
        Ok(Self {
            mid_price: initial,
            normal,
            rng,
        })
    }

    /// Seeded walk, or entropy-seeded when `seed` is `None`
    pub fn with_seed(initial: Price, volatility: f64, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(initial, volatility, rng)
    }

    pub fn mid_price(&self) -> Price {
        self.mid_price
    }

    /// Draw one increment and apply it
    ///
    /// On error the mid-price is left where it was.
    pub fn step(&mut self) -> Result<Price> {
        let draw = self.normal.sample(&mut self.rng);
        let change = Decimal::try_from(draw)
            .map_err(|e| EnvironmentError::PriceOutOfRange(format!("increment {draw}: {e}")))?
            .round_dp(PRICE_DECIMALS);
        self.mid_price = self.mid_price.checked_add(change).ok_or_else(|| {
            EnvironmentError::PriceOutOfRange(format!("{} + {}", self.mid_price, change))
        })?;
        Ok(self.mid_price)
    }
}

impl std::fmt::Debug for RandomWalk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomWalk")
            .field("mid_price", &self.mid_price)
            .field("std_dev", &self.normal.std_dev())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_volatility_is_flat() {
        let mut walk = RandomWalk::with_seed(dec!(100), 0.0, Some(1)).unwrap();
        for _ in 0..50 {
            assert_eq!(walk.step().unwrap(), dec!(100));
        }
    }

    #[test]
    fn test_same_seed_same_path() {
        let mut a = RandomWalk::with_seed(dec!(100), 0.5, Some(42)).unwrap();
        let mut b = RandomWalk::with_seed(dec!(100), 0.5, Some(42)).unwrap();
        for _ in 0..100 {
            assert_eq!(a.step().unwrap(), b.step().unwrap());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = RandomWalk::with_seed(dec!(100), 0.5, Some(1)).unwrap();
        let mut b = RandomWalk::with_seed(dec!(100), 0.5, Some(2)).unwrap();
        let path_a: Vec<_> = (0..10).map(|_| a.step().unwrap()).collect();
        let path_b: Vec<_> = (0..10).map(|_| b.step().unwrap()).collect();
        assert_ne!(path_a, path_b);
    }

    #[test]
    fn test_increments_are_rounded() {
        let mut walk = RandomWalk::with_seed(dec!(100), 0.5, Some(9)).unwrap();
        for _ in 0..20 {
            assert!(walk.step().unwrap().scale() <= PRICE_DECIMALS);
        }
    }

    #[test]
    fn test_negative_volatility_rejected() {
        assert!(RandomWalk::with_seed(dec!(100), -1.0, Some(1)).is_err());
    }

    #[test]
    fn test_oversized_volatility_rejected() {
        for volatility in [1e28, f64::INFINITY, f64::NAN] {
            assert!(matches!(
                RandomWalk::with_seed(dec!(100), volatility, Some(1)),
                Err(EnvironmentError::InvalidConfig(_))
            ));
        }
        assert!(RandomWalk::with_seed(dec!(100), MAX_VOLATILITY, Some(1)).is_ok());
    }

    #[test]
    fn test_overflow_is_an_error_not_a_panic() {
        let mut overflows = 0;
        for seed in 0..20 {
            let mut walk = RandomWalk::with_seed(Decimal::MAX, MAX_VOLATILITY, Some(seed)).unwrap();
            match walk.step() {
                // Downward draws move away from the limit
                Ok(mid) => assert!(mid <= Decimal::MAX),
                Err(EnvironmentError::PriceOutOfRange(_)) => {
                    assert_eq!(walk.mid_price(), Decimal::MAX);
                    overflows += 1;
                }
                Err(other) => panic!("unexpected error {other}"),
            }
        }
        assert!(overflows > 0);
    }
}
