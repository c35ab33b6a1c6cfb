// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an instrument is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Seed average gain / average loss with the simple mean of the first
//          `timeframe` gains / losses.
// Step 3 — Apply Wilder's exponential smoothing:
//            avg_gain = (prev_avg_gain * (timeframe - 1) + current_gain) / timeframe
//            avg_loss = (prev_avg_loss * (timeframe - 1) + current_loss) / timeframe
//          This is not a rolling mean; substituting one drifts the index away
//          from the standard definition.
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// When the average loss is zero the index is pinned at 100: an all-gain
// window is maximal strength, and a perfectly flat window counts the same
// way (no loss observed).
// =============================================================================

/// Compute the RSI series for the given `closes`, aligned to the input.
///
/// Entries before index `timeframe` are `None`: the first `timeframe` deltas
/// are consumed to seed the averages, so the first defined value sits at
/// index `timeframe` and needs `timeframe + 1` closes.
///
/// # Edge cases
/// - `timeframe == 0` => all-None series
/// - `closes.len() < timeframe + 1` => all-None series
/// - Zero average loss => 100.0 rather than a division fault.
pub fn calculate_rsi(closes: &[f64], timeframe: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if timeframe == 0 || closes.len() < timeframe + 1 {
        return out;
    }

    // --- Price deltas --------------------------------------------------------
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    // --- Seed averages with the mean of the first `timeframe` deltas ---------
    let (sum_gain, sum_loss) =
        deltas[..timeframe]
            .iter()
            .fold((0.0_f64, 0.0_f64), |(g, l), &d| {
                if d > 0.0 {
                    (g + d, l)
                } else {
                    (g, l + d.abs())
                }
            });

    let timeframe_f = timeframe as f64;
    let mut avg_gain = sum_gain / timeframe_f;
    let mut avg_loss = sum_loss / timeframe_f;

    out[timeframe] = Some(rsi_from_averages(avg_gain, avg_loss));

    // --- Wilder's smoothing for subsequent values ----------------------------
    // Delta index k covers the move into close k + 1.
    for (k, &delta) in deltas.iter().enumerate().skip(timeframe) {
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { delta.abs() } else { 0.0 };

        avg_gain = (avg_gain * (timeframe_f - 1.0) + gain) / timeframe_f;
        avg_loss = (avg_loss * (timeframe_f - 1.0) + loss) / timeframe_f;

        out[k + 1] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    out
}

/// Most recent RSI value, or `None` when the input cannot seed one.
pub fn latest_rsi(closes: &[f64], timeframe: usize) -> Option<f64> {
    calculate_rsi(closes, timeframe).last().copied().flatten()
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Convert average gain / average loss into an index value in [0, 100].
///
/// A zero average loss (all gains, or no movement at all) pins the index at
/// 100.0.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
