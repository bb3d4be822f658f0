//! Environment configuration
//!
//! Plain scalar parameters; loading them from files is the runner's job.

use agora_core::Price;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EnvironmentError, Result};
use crate::price_process::MAX_VOLATILITY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Mid-price before the first tick
    pub initial_mid_price: Price,
    /// Standard deviation of the per-tick mid-price change
    pub volatility: f64,
    /// Nominal spread used for the theoretical quote of an empty side
    pub spread: Price,
    /// Random seed for the price walk (entropy when absent)
    pub seed: Option<u64>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            initial_mid_price: dec!(100.0),
            volatility: 0.5,
            spread: dec!(0.1),
            seed: None,
        }
    }
}

impl EnvironmentConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject parameters that would only fail later, mid-run
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=MAX_VOLATILITY).contains(&self.volatility) {
            return Err(EnvironmentError::InvalidConfig(format!(
                "volatility must be between 0 and {}, got {}",
                MAX_VOLATILITY, self.volatility
            )));
        }
        if self.spread < Decimal::ZERO {
            return Err(EnvironmentError::InvalidConfig(format!(
                "spread must not be negative, got {}",
                self.spread
            )));
        }
        if self.initial_mid_price <= Decimal::ZERO {
            return Err(EnvironmentError::InvalidConfig(format!(
                "initial mid-price must be positive, got {}",
                self.initial_mid_price
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EnvironmentConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_volatility() {
        let config = EnvironmentConfig {
            volatility: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EnvironmentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_nan_volatility() {
        let config = EnvironmentConfig {
            volatility: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_volatility_that_would_overflow_prices() {
        let config = EnvironmentConfig {
            volatility: 1e28,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EnvironmentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_negative_spread_and_price() {
        let config = EnvironmentConfig {
            spread: dec!(-0.1),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EnvironmentConfig {
            initial_mid_price: Decimal::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EnvironmentConfig =
            serde_json::from_str(r#"{"volatility": 0.0, "seed": 7}"#).unwrap();
        assert_eq!(config.volatility, 0.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.spread, dec!(0.1));
    }
}
