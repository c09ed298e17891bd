// Technical indicators module
// Pure calculation functions over a chronological (oldest first) price series

pub mod bollinger;
pub mod levels;
pub mod macd;
pub mod moving_averages;
pub mod rsi;
pub mod trend;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use bollinger::BollingerBands;
pub use levels::support_resistance;
pub use macd::MACD;
pub use moving_averages::EMA;
pub use rsi::{NEUTRAL_RSI, RSI};
pub use trend::classify_trend;

/// Fewer prices than this and the whole bundle is the default one
const MIN_BUNDLE_PRICES: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdValue {
    pub main: f64,
    pub signal: f64,
    pub divergence: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelValue {
    pub floor: f64,
    pub ceiling: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BandValue {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendLabel {
    Uptrend,
    Downtrend,
    #[default]
    Sideways,
}

impl fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendLabel::Uptrend => write!(f, "Uptrend"),
            TrendLabel::Downtrend => write!(f, "Downtrend"),
            TrendLabel::Sideways => write!(f, "Sideways"),
        }
    }
}

/// Every signal derived from one price series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorBundle {
    pub momentum: f64,
    pub trend_oscillator: MacdValue,
    pub levels: LevelValue,
    pub bands: BandValue,
    pub trend: TrendLabel,
}

impl Default for IndicatorBundle {
    fn default() -> Self {
        Self {
            momentum: NEUTRAL_RSI,
            trend_oscillator: MacdValue::default(),
            levels: LevelValue::default(),
            bands: BandValue::default(),
            trend: TrendLabel::Sideways,
        }
    }
}

/// Run every calculator over `prices` and assemble the bundle.
///
/// Below 5 prices nothing is calculated and the default bundle is returned.
/// Past that gate each calculator still applies its own minimum length, so a
/// short series mixes real readings with per-calculator fallbacks.
pub fn compute_indicators(prices: &[f64]) -> IndicatorBundle {
    if prices.len() < MIN_BUNDLE_PRICES {
        tracing::debug!(
            samples = prices.len(),
            "Not enough prices for indicators, using default bundle"
        );
        return IndicatorBundle::default();
    }

    IndicatorBundle {
        momentum: RSI::default().calculate(prices),
        trend_oscillator: MACD::default().calculate(prices),
        levels: support_resistance(prices),
        bands: BollingerBands::default().calculate(prices),
        trend: classify_trend(prices),
    }
}

/// Round to `places` decimal places from the exact decimal value of `value`,
/// ties to even
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_returns_default_bundle() {
        let bundle = compute_indicators(&[]);
        assert_eq!(bundle.momentum, 50.0);
        assert_eq!(bundle.trend_oscillator, MacdValue { main: 0.0, signal: 0.0, divergence: 0.0 });
        assert_eq!(bundle.levels, LevelValue { floor: 0.0, ceiling: 0.0 });
        assert_eq!(bundle.bands, BandValue { upper: 0.0, middle: 0.0, lower: 0.0 });
        assert_eq!(bundle.trend, TrendLabel::Sideways);
    }

    #[test]
    fn test_four_prices_returns_default_bundle() {
        // Calculators are skipped, so levels are not derived from the last price
        let bundle = compute_indicators(&[10.0, 20.0, 30.0, 40.0]);
        assert_eq!(bundle, IndicatorBundle::default());
    }

    #[test]
    fn test_seven_prices_mix_real_and_fallback_values() {
        let prices = [10.0, 10.0, 10.0, 10.0, 12.0, 14.0, 16.0];
        let bundle = compute_indicators(&prices);

        // RSI needs 15, MACD 26, bands 20, levels 10
        assert_eq!(bundle.momentum, 50.0);
        assert_eq!(bundle.trend_oscillator, MacdValue::default());
        assert_eq!(bundle.bands.middle, 16.0);
        assert!((bundle.bands.upper - 17.6).abs() < 1e-9);
        assert!((bundle.bands.lower - 14.4).abs() < 1e-9);
        assert!((bundle.levels.floor - 15.2).abs() < 1e-9);
        assert!((bundle.levels.ceiling - 16.8).abs() < 1e-9);

        // Trend classifier has enough data: short = 14, long = 12.4
        assert_eq!(bundle.trend, TrendLabel::Uptrend);
    }

    #[test]
    fn test_fifteen_increasing_prices() {
        let prices: Vec<f64> = (1..=15).map(|i| i as f64).collect();
        let bundle = compute_indicators(&prices);
        assert_eq!(bundle.momentum, 100.0);
        assert_eq!(bundle.trend, TrendLabel::Uptrend);
    }

    #[test]
    fn test_five_equal_prices_are_sideways() {
        let bundle = compute_indicators(&[10.0; 5]);
        assert_eq!(bundle.trend, TrendLabel::Sideways);
    }

    #[test]
    fn test_uniform_decline_has_zero_momentum() {
        let prices: Vec<f64> = (0..30).map(|i| 500.0 - 2.0 * i as f64).collect();
        let bundle = compute_indicators(&prices);
        assert_eq!(bundle.momentum, 0.0);
        assert_eq!(bundle.trend, TrendLabel::Sideways);
        assert!(bundle.trend_oscillator.main < 0.0);
    }

    #[test]
    fn test_long_series_is_fully_populated_and_finite() {
        let prices: Vec<f64> = (0..120)
            .map(|i| 1_000.0 + (i as f64 * 0.3).sin() * 40.0 + i as f64)
            .collect();
        let bundle = compute_indicators(&prices);

        let numbers = [
            bundle.momentum,
            bundle.trend_oscillator.main,
            bundle.trend_oscillator.signal,
            bundle.trend_oscillator.divergence,
            bundle.levels.floor,
            bundle.levels.ceiling,
            bundle.bands.upper,
            bundle.bands.middle,
            bundle.bands.lower,
        ];
        assert!(numbers.iter().all(|v| v.is_finite()));
        assert!((0.0..=100.0).contains(&bundle.momentum));

        let last_20 = &prices[prices.len() - 20..];
        let mean = last_20.iter().sum::<f64>() / 20.0;
        assert_eq!(bundle.bands.middle, round_to(mean, 4));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(66.666666, 2), 66.67);
        assert_eq!(round_to(-1.23456, 4), -1.2346);
        assert_eq!(round_to(0.0, 4), 0.0);
    }

    #[test]
    fn test_round_to_ties_go_to_even() {
        // Exact binary ties
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(0.03125, 4), 0.0312);
    }

    #[test]
    fn test_round_to_uses_exact_decimal_value() {
        // 2.00005 is stored slightly below the tie, scaling by 10^4 would hide that
        assert_eq!(round_to(2.00005, 4), 2.0);
        assert_eq!(round_to(1.005, 2), 1.0);
    }

    #[test]
    fn test_bands_round_tie_on_middle() {
        let bundle = compute_indicators(&[0.03125; 20]);
        assert_eq!(bundle.bands.middle, 0.0312);
        assert_eq!(bundle.bands.upper, 0.0312);
        assert_eq!(bundle.bands.lower, 0.0312);
    }

    #[test]
    fn test_trend_label_display_and_json() {
        assert_eq!(TrendLabel::Uptrend.to_string(), "Uptrend");
        assert_eq!(TrendLabel::Downtrend.to_string(), "Downtrend");
        assert_eq!(serde_json::to_string(&TrendLabel::Sideways).unwrap(), "\"Sideways\"");
    }

    #[test]
    fn test_bundle_json_shape() {
        let json = serde_json::to_value(IndicatorBundle::default()).unwrap();
        assert_eq!(json["momentum"], 50.0);
        assert_eq!(json["trend_oscillator"]["divergence"], 0.0);
        assert_eq!(json["levels"]["ceiling"], 0.0);
        assert_eq!(json["bands"]["middle"], 0.0);
        assert_eq!(json["trend"], "Sideways");
    }
}
