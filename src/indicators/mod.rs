// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the three screened indicators.
// Every series function returns a `Vec<Option<f64>>` aligned one-to-one with
// the input closes: entries are `None` through the warm-up window (and for
// degenerate windows), never zero, so callers are forced to handle
// insufficient-data and numerical-edge-case scenarios.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod stoch_rsi;
