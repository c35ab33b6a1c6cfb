// =============================================================================
// Screen Settings
// =============================================================================
//
// User-supplied screen parameters, validated at construction before any
// price data is touched. The ranges mirror classical usage: an RSI
// overbought threshold below 70 or an oversold threshold above 30 is a
// configuration mistake, not a screening opinion. A violation raises
// `InvalidConfiguration`, which is fatal to the whole run.

use std::ops::RangeInclusive;

use crate::error::{Result, ScreenError};

/// Supported RSI lookback windows, in sessions.
pub const RSI_TIMEFRAMES: RangeInclusive<usize> = 2..=99;
/// Supported RSI overbought thresholds.
pub const RSI_OVERBOUGHT: RangeInclusive<u32> = 70..=100;
/// Supported RSI oversold thresholds.
pub const RSI_OVERSOLD: RangeInclusive<u32> = 0..=30;

/// Supported Stochastic RSI lookback windows, in sessions. The ceiling sits
/// below the RSI one because each value needs a full extra RSI window of
/// history behind it.
pub const STOCH_RSI_TIMEFRAMES: RangeInclusive<usize> = 2..=97;
/// Supported Stochastic RSI overbought thresholds.
pub const STOCH_RSI_OVERBOUGHT: RangeInclusive<f64> = 0.7..=1.0;
/// Supported Stochastic RSI oversold thresholds.
pub const STOCH_RSI_OVERSOLD: RangeInclusive<f64> = 0.0..=0.3;

/// Validated parameters for an RSI screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiSettings {
    pub timeframe: usize,
    pub overbought: f64,
    pub oversold: f64,
}

impl RsiSettings {
    /// Validate and build. Thresholds are whole index points on the 0..100
    /// scale.
    pub fn new(timeframe: usize, overbought: u32, oversold: u32) -> Result<Self> {
        if !RSI_TIMEFRAMES.contains(&timeframe) {
            return Err(ScreenError::InvalidConfiguration(format!(
                "RSI timeframe {timeframe} outside {}..={} sessions",
                RSI_TIMEFRAMES.start(),
                RSI_TIMEFRAMES.end()
            )));
        }
        if !RSI_OVERBOUGHT.contains(&overbought) {
            return Err(ScreenError::InvalidConfiguration(format!(
                "RSI overbought threshold {overbought} outside {}..={}",
                RSI_OVERBOUGHT.start(),
                RSI_OVERBOUGHT.end()
            )));
        }
        if !RSI_OVERSOLD.contains(&oversold) {
            return Err(ScreenError::InvalidConfiguration(format!(
                "RSI oversold threshold {oversold} outside {}..={}",
                RSI_OVERSOLD.start(),
                RSI_OVERSOLD.end()
            )));
        }

        Ok(Self {
            timeframe,
            overbought: overbought as f64,
            oversold: oversold as f64,
        })
    }

    /// Sessions needed for one defined RSI value.
    pub fn required_history(&self) -> usize {
        self.timeframe + 1
    }
}

/// Validated parameters for a Stochastic RSI screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StochRsiSettings {
    pub timeframe: usize,
    pub overbought: f64,
    pub oversold: f64,
}

impl StochRsiSettings {
    /// Validate and build. Thresholds are fractions of the 0..1 stochastic
    /// range.
    pub fn new(timeframe: usize, overbought: f64, oversold: f64) -> Result<Self> {
        if !STOCH_RSI_TIMEFRAMES.contains(&timeframe) {
            return Err(ScreenError::InvalidConfiguration(format!(
                "Stochastic RSI timeframe {timeframe} outside {}..={} sessions",
                STOCH_RSI_TIMEFRAMES.start(),
                STOCH_RSI_TIMEFRAMES.end()
            )));
        }
        if !STOCH_RSI_OVERBOUGHT.contains(&overbought) {
            return Err(ScreenError::InvalidConfiguration(format!(
                "Stochastic RSI overbought threshold {overbought} outside {}..={}",
                STOCH_RSI_OVERBOUGHT.start(),
                STOCH_RSI_OVERBOUGHT.end()
            )));
        }
        if !STOCH_RSI_OVERSOLD.contains(&oversold) {
            return Err(ScreenError::InvalidConfiguration(format!(
                "Stochastic RSI oversold threshold {oversold} outside {}..={}",
                STOCH_RSI_OVERSOLD.start(),
                STOCH_RSI_OVERSOLD.end()
            )));
        }

        Ok(Self {
            timeframe,
            overbought,
            oversold,
        })
    }

    /// Sessions needed for one defined Stochastic RSI value: a full RSI
    /// window plus a full stochastic window on top of it.
    pub fn required_history(&self) -> usize {
        2 * self.timeframe
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_classic_settings_accepted() {
        let settings = RsiSettings::new(14, 70, 30).unwrap();
        assert_eq!(settings.timeframe, 14);
        assert_eq!(settings.overbought, 70.0);
        assert_eq!(settings.oversold, 30.0);
        assert_eq!(settings.required_history(), 15);
    }

    #[test]
    fn rsi_boundary_settings_accepted() {
        assert!(RsiSettings::new(2, 100, 0).is_ok());
        assert!(RsiSettings::new(99, 70, 30).is_ok());
    }

    #[test]
    fn rsi_rejects_out_of_range_values() {
        assert!(RsiSettings::new(1, 70, 30).is_err());
        assert!(RsiSettings::new(100, 70, 30).is_err());
        assert!(RsiSettings::new(14, 69, 30).is_err());
        assert!(RsiSettings::new(14, 101, 30).is_err());
        assert!(RsiSettings::new(14, 70, 31).is_err());
    }

    #[test]
    fn rsi_rejection_is_invalid_configuration() {
        let err = RsiSettings::new(150, 70, 30).unwrap_err();
        assert!(matches!(err, ScreenError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("150"));
    }

    #[test]
    fn stoch_rsi_classic_settings_accepted() {
        let settings = StochRsiSettings::new(14, 0.8, 0.2).unwrap();
        assert_eq!(settings.required_history(), 28);
    }

    #[test]
    fn stoch_rsi_boundary_settings_accepted() {
        assert!(StochRsiSettings::new(2, 0.7, 0.0).is_ok());
        assert!(StochRsiSettings::new(97, 1.0, 0.3).is_ok());
    }

    #[test]
    fn stoch_rsi_rejects_out_of_range_values() {
        assert!(StochRsiSettings::new(98, 0.8, 0.2).is_err());
        assert!(StochRsiSettings::new(14, 0.69, 0.2).is_err());
        assert!(StochRsiSettings::new(14, 1.01, 0.2).is_err());
        assert!(StochRsiSettings::new(14, 0.8, 0.31).is_err());
        assert!(StochRsiSettings::new(14, 0.8, -0.01).is_err());
    }
}
