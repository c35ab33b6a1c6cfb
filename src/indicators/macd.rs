// =============================================================================
// Moving Average Convergence / Divergence (MACD)
// =============================================================================
//
// Standard 12/26/9 construction:
//
//   macd   = EMA12(close) - EMA26(close)
//   signal = EMA9(macd)
//
// The spans are deliberately not configurable: the classic parameters are
// part of the indicator's definition here, and the screen reads only the
// signal-line crossover, never the raw magnitudes.
//
// Alignment: the MACD line is defined from index SLOW_SPAN - 1 (both EMAs
// available), the signal line from index SLOW_SPAN + SIGNAL_SPAN - 2 (its
// own seed needs SIGNAL_SPAN MACD values). Reading a crossover compares two
// adjacent sessions, hence MIN_SESSIONS below.
// =============================================================================

use crate::indicators::ema::calculate_ema;
use crate::types::MacdSignal;

/// Fast EMA span of the MACD line.
pub const FAST_SPAN: usize = 12;
/// Slow EMA span of the MACD line.
pub const SLOW_SPAN: usize = 26;
/// EMA span of the signal line.
pub const SIGNAL_SPAN: usize = 9;

/// Closes required before a crossover can be read: the signal line is first
/// defined at index SLOW_SPAN + SIGNAL_SPAN - 2, and the crossover needs it
/// on the final two sessions.
pub const MIN_SESSIONS: usize = SLOW_SPAN + SIGNAL_SPAN;

/// MACD line and signal line, both aligned element-for-element with the
/// closes they were computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// Compute the MACD line and its signal line for the given `closes`.
pub fn calculate_macd(closes: &[f64]) -> MacdSeries {
    let ema_fast = calculate_ema(closes, FAST_SPAN);
    let ema_slow = calculate_ema(closes, SLOW_SPAN);

    let macd: Vec<Option<f64>> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(fast, slow)| match (fast, slow) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    // The signal line is an EMA over the defined stretch of the MACD line
    // (contiguous once both EMAs are seeded), re-aligned onto the input
    // index space.
    let mut signal = vec![None; closes.len()];
    if let Some(start) = macd.iter().position(|v| v.is_some()) {
        let tail: Vec<f64> = macd[start..].iter().copied().flatten().collect();
        for (offset, value) in calculate_ema(&tail, SIGNAL_SPAN).into_iter().enumerate() {
            signal[start + offset] = value;
        }
    }

    MacdSeries { macd, signal }
}

/// Crossover state across the session pair ending at index `i`.
///
/// `BullishCross` when the MACD line sat at or below the signal line on the
/// earlier session and closed strictly above it on the later one;
/// `BearishCross` for the mirror image; `NoCross` otherwise. The earlier
/// comparison tolerates exact equality so a line departing a dead-level
/// touch still crosses in the direction it leaves; the later comparison is
/// strict so a pair still sitting level never signals.
///
/// Returns `None` when `i` is out of range or either line is undefined on
/// either session of the pair.
pub fn crossover_at(series: &MacdSeries, i: usize) -> Option<MacdSignal> {
    if i == 0 || i >= series.macd.len() {
        return None;
    }

    let macd_prev = series.macd[i - 1]?;
    let macd_last = series.macd[i]?;
    let signal_prev = series.signal[i - 1]?;
    let signal_last = series.signal[i]?;

    let state = if macd_prev <= signal_prev && macd_last > signal_last {
        MacdSignal::BullishCross
    } else if macd_prev >= signal_prev && macd_last < signal_last {
        MacdSignal::BearishCross
    } else {
        MacdSignal::NoCross
    };

    Some(state)
}

/// Crossover state of the two most recent sessions, the value the screen
/// reports. `None` with fewer than [`MIN_SESSIONS`] closes.
pub fn latest_crossover(series: &MacdSeries) -> Option<MacdSignal> {
    if series.macd.is_empty() {
        return None;
    }
    crossover_at(series, series.macd.len() - 1)
}
