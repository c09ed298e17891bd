// Bollinger Bands
//
// middle = SMA of the last `period` prices
// upper  = middle + multiplier * σ
// lower  = middle - multiplier * σ
//
// σ is the population standard deviation of the window (divides by `period`).

use super::{round_to, BandValue};

pub struct BollingerBands {
    period: usize,
    multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl BollingerBands {
    pub fn new(period: usize, multiplier: f64) -> Self {
        Self { period, multiplier }
    }

    /// Bands over the trailing window, rounded to 4 decimal places.
    ///
    /// With fewer than `period` prices the band is centred on the last price
    /// at +/-10% and left unrounded. An empty series yields all zeros.
    pub fn calculate(&self, prices: &[f64]) -> BandValue {
        if prices.len() < self.period || self.period == 0 {
            let last = prices.last().copied().unwrap_or(0.0);
            return BandValue {
                upper: last * 1.1,
                middle: last,
                lower: last * 0.9,
            };
        }

        let window = &prices[prices.len() - self.period..];
        let middle = window.iter().sum::<f64>() / self.period as f64;
        let variance =
            window.iter().map(|p| (p - middle).powi(2)).sum::<f64>() / self.period as f64;
        let std_dev = variance.sqrt();

        BandValue {
            upper: round_to(middle + std_dev * self.multiplier, 4),
            middle: round_to(middle, 4),
            lower: round_to(middle - std_dev * self.multiplier, 4),
        }
    }
}
