use super::round_to;

/// Neutral reading returned when there is not enough history
pub const NEUTRAL_RSI: f64 = 50.0;

/// Relative Strength Index (RSI)
/// Measures momentum by comparing magnitude of recent gains to recent losses
/// Returns values between 0-100:
/// - Below 30: Oversold (potentially undervalued)
/// - Above 70: Overbought (potentially overvalued)
pub struct RSI {
    period: usize,
}

impl Default for RSI {
    fn default() -> Self {
        Self::new(14)
    }
}

impl RSI {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Calculate the latest RSI reading for a price series
    ///
    /// Averages are plain means over the last `period` gains and losses,
    /// not Wilder-smoothed. The result is rounded to 2 decimal places.
    /// Needs at least `period + 1` prices, otherwise returns [`NEUTRAL_RSI`].
    pub fn calculate(&self, prices: &[f64]) -> f64 {
        if prices.len() < self.period + 1 {
            return NEUTRAL_RSI;
        }

        // Calculate price changes
        let mut gains = Vec::with_capacity(prices.len() - 1);
        let mut losses = Vec::with_capacity(prices.len() - 1);

        for window in prices.windows(2) {
            let change = window[1] - window[0];
            gains.push(if change > 0.0 { change } else { 0.0 });
            losses.push(if change < 0.0 { -change } else { 0.0 });
        }

        if gains.len() < self.period {
            return NEUTRAL_RSI;
        }

        let start = gains.len() - self.period;
        let avg_gain = gains[start..].iter().sum::<f64>() / self.period as f64;
        let avg_loss = losses[start..].iter().sum::<f64>() / self.period as f64;

        if avg_loss == 0.0 {
            return 100.0;
        }

        let rs = avg_gain / avg_loss;
        round_to(100.0 - (100.0 / (1.0 + rs)), 2)
    }
}
