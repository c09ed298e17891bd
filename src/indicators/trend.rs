use super::TrendLabel;

const WINDOW: usize = 5;
const SHORT_WINDOW: usize = 3;
const UP_FACTOR: f64 = 1.02;
const DOWN_FACTOR: f64 = 0.98;

/// Classify the recent trend by comparing the mean of the last 3 prices
/// against the mean of the last 5. A move outside +/-2% counts as a trend.
pub fn classify_trend(prices: &[f64]) -> TrendLabel {
    if prices.len() < WINDOW {
        return TrendLabel::Sideways;
    }

    let recent = &prices[prices.len() - WINDOW..];
    let short_avg = recent[WINDOW - SHORT_WINDOW..].iter().sum::<f64>() / SHORT_WINDOW as f64;
    let long_avg = recent.iter().sum::<f64>() / WINDOW as f64;

    if short_avg > long_avg * UP_FACTOR {
        TrendLabel::Uptrend
    } else if short_avg < long_avg * DOWN_FACTOR {
        TrendLabel::Downtrend
    } else {
        TrendLabel::Sideways
    }
}
