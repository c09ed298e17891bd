/// Exponential Moving Average (EMA)
/// Gives more weight to recent prices using exponential smoothing
pub struct EMA {
    period: usize,
}

impl EMA {
    /// `period` must be non-zero
    pub fn new(period: usize) -> Self {
        debug_assert!(period > 0, "EMA period must be non-zero");
        Self { period }
    }

    /// Smoothing factor (k) for EMA calculation
    /// k = 2 / (period + 1)
    fn smoothing_factor(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }

    /// Calculate EMA for a series
    /// Returns a vector of the same length as input
    /// First EMA value is the first input value (no SMA seed)
    /// Inputs shorter than the period are returned unchanged
    pub fn calculate(&self, values: &[f64]) -> Vec<f64> {
        if values.len() < self.period {
            return values.to_vec();
        }

        let k = self.smoothing_factor();
        let mut result = Vec::with_capacity(values.len());
        result.push(values[0]);

        // EMA(t) = Value(t) * k + EMA(t-1) * (1 - k)
        for &value in &values[1..] {
            let prev_ema = result[result.len() - 1];
            result.push(value * k + prev_ema * (1.0 - k));
        }

        result
    }
}
