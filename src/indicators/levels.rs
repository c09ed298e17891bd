use super::{round_to, LevelValue};

const MIN_PRICES: usize = 10;
const LOOKBACK: usize = 20;

/// Heuristic support/resistance from recent extremes.
///
/// floor = 90% of the trailing 20-price low, ceiling = 110% of the high,
/// rounded to 4 decimal places. Under 10 prices the levels are a flat
/// -5%/+5% around the last price, unrounded.
pub fn support_resistance(prices: &[f64]) -> LevelValue {
    let Some(&last) = prices.last() else {
        return LevelValue::default();
    };

    if prices.len() < MIN_PRICES {
        return LevelValue {
            floor: last * 0.95,
            ceiling: last * 1.05,
        };
    }

    let recent = &prices[prices.len().saturating_sub(LOOKBACK)..];
    let low = recent.iter().copied().fold(f64::INFINITY, f64::min);
    let high = recent.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    LevelValue {
        floor: round_to(low * 0.9, 4),
        ceiling: round_to(high * 1.1, 4),
    }
}
