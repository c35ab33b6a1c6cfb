// =============================================================================
// Stochastic RSI
// =============================================================================
//
// Applies the stochastic oscillator formula to the RSI series instead of raw
// prices, normalising the current RSI against its own recent range:
//
//   StochRSI = (RSI - min(window)) / (max(window) - min(window))
//
// in [0, 1]. The window is the last `timeframe` RSI values including the
// current one, and the underlying RSI uses the same timeframe, so the first
// defined value sits at index `2 * timeframe - 1`.
//
// When every RSI in the window is identical the range is zero and the ratio
// is undefined. The entry stays `None`; screens report the instrument as a
// degenerate computation rather than inventing a bucket for it.
// =============================================================================

use crate::indicators::rsi::calculate_rsi;

/// Compute the Stochastic RSI series for the given `closes`, aligned to the
/// input.
///
/// Entries are `None` through the warm-up (indices below `2 * timeframe - 1`)
/// and wherever the RSI window has zero range. Needs `2 * timeframe` closes
/// for one defined value.
///
/// # Edge cases
/// - `timeframe == 0` => all-None series
/// - `closes.len() < 2 * timeframe` => all-None series
/// - Zero-range RSI window => `None` at that index
pub fn calculate_stoch_rsi(closes: &[f64], timeframe: usize) -> Vec<Option<f64>> {
    let rsi = calculate_rsi(closes, timeframe);
    let mut out = vec![None; closes.len()];
    if timeframe == 0 {
        return out;
    }

    // The window [i - timeframe + 1, i] must hold only defined RSI values;
    // RSI starts at index `timeframe`, which puts the first full window at
    // index 2 * timeframe - 1.
    let first = 2 * timeframe - 1;
    for i in first..rsi.len() {
        let current = match rsi[i] {
            Some(v) => v,
            None => continue,
        };

        let mut lo = current;
        let mut hi = current;
        for &v in rsi[i + 1 - timeframe..=i].iter().flatten() {
            lo = lo.min(v);
            hi = hi.max(v);
        }

        if hi > lo {
            out[i] = Some((current - lo) / (hi - lo));
        }
    }

    out
}

/// Most recent Stochastic RSI value, or `None` when the input cannot produce
/// one (too short, or the final window is flat).
pub fn latest_stoch_rsi(closes: &[f64], timeframe: usize) -> Option<f64> {
    calculate_stoch_rsi(closes, timeframe)
        .last()
        .copied()
        .flatten()
}
