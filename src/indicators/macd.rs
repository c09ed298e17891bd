use super::{round_to, MacdValue, EMA};

/// Moving Average Convergence Divergence (MACD)
/// main = EMA(fast) - EMA(slow)
/// signal = EMA(main, signal_period)
/// divergence = main - signal
pub struct MACD {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for MACD {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl MACD {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }

    /// Latest main/signal/divergence values, each rounded to 4 decimal places
    /// Returns all zeros when there are fewer than `slow_period` prices
    pub fn calculate(&self, prices: &[f64]) -> MacdValue {
        if prices.len() < self.slow_period {
            return MacdValue::default();
        }

        let fast = EMA::new(self.fast_period).calculate(prices);
        let slow = EMA::new(self.slow_period).calculate(prices);

        // Both lines cover the full series, so this is index-for-index
        let main: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();

        if main.len() < self.signal_period {
            return MacdValue::default();
        }

        let signal = EMA::new(self.signal_period).calculate(&main);

        let (Some(&last_main), Some(&last_signal)) = (main.last(), signal.last()) else {
            return MacdValue::default();
        };

        MacdValue {
            main: round_to(last_main, 4),
            signal: round_to(last_signal, 4),
            divergence: round_to(last_main - last_signal, 4),
        }
    }
}
