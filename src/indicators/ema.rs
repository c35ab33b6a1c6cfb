// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (span + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The first defined value is seeded with the SMA of the first `span` closes
// and sits at index `span - 1`. Everything before it is `None`, so the output
// stays aligned element-for-element with the input. That alignment is what
// lets MACD subtract two EMA series of different spans without index bending.
// =============================================================================

/// Compute the EMA series for the given `closes` slice, aligned to the input.
///
/// Entries before the seed index `span - 1` are `None`.
///
/// # Edge cases
/// - `span == 0` => all-None series (division by zero guard)
/// - `closes.len() < span` => all-None series (not enough data to seed)
pub fn calculate_ema(closes: &[f64], span: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if span == 0 || closes.len() < span {
        return out;
    }

    let multiplier = 2.0 / (span + 1) as f64;

    // Seed: SMA of the first `span` values.
    let seed: f64 = closes[..span].iter().sum::<f64>() / span as f64;
    out[span - 1] = Some(seed);

    let mut prev_ema = seed;
    for (i, &close) in closes.iter().enumerate().skip(span) {
        let ema = close * multiplier + prev_ema * (1.0 - multiplier);
        out[i] = Some(ema);
        prev_ema = ema;
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 5).is_empty());
    }

    #[test]
    fn ema_span_zero() {
        assert_eq!(calculate_ema(&[1.0, 2.0, 3.0], 0), vec![None, None, None]);
    }

    #[test]
    fn ema_insufficient_data() {
        assert_eq!(calculate_ema(&[1.0, 2.0], 5), vec![None, None]);
    }

    #[test]
    fn ema_span_equals_length() {
        let closes = vec![2.0, 4.0, 6.0];
        let ema = calculate_ema(&closes, 3);
        assert_eq!(ema.len(), 3);
        assert_eq!(ema[0], None);
        assert_eq!(ema[1], None);
        // Seed should be the SMA = (2+4+6)/3 = 4.0
        let seed = ema[2].unwrap();
        assert!((seed - 4.0).abs() < 1e-10);
    }

    #[test]
    fn ema_known_values() {
        // 5-span EMA of [1,2,3,4,5,6,7,8,9,10]
        // SMA of first 5 = 3.0, multiplier = 2/6 = 1/3
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let ema = calculate_ema(&closes, 5);
        assert_eq!(ema.len(), 10);
        assert!(ema[..4].iter().all(|v| v.is_none()));

        let mult = 2.0 / 6.0;
        let mut expected = 3.0; // SMA seed
        assert!((ema[4].unwrap() - expected).abs() < 1e-10);
        for (i, &c) in closes.iter().enumerate().skip(5) {
            expected = c * mult + expected * (1.0 - mult);
            let got = ema[i].unwrap();
            assert!((got - expected).abs() < 1e-10, "index {i}: got {got}, expected {expected}");
        }
    }

    #[test]
    fn ema_stays_aligned_with_input() {
        for n in [5, 9, 26, 60] {
            let closes: Vec<f64> = (1..=n).map(|x| x as f64).collect();
            assert_eq!(calculate_ema(&closes, 12).len(), closes.len());
        }
    }
}
