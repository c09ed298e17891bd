use crate::api_client::{project_prices, ApiClient, ApiError};
use crate::indicators::{compute_indicators, IndicatorBundle};
use crate::models::{CoinSnapshot, PricePoint, Timeframe};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Lookback used for the indicator bundle in a full analysis
const ANALYSIS_LOOKBACK_DAYS: u32 = 30;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Upstream(#[from] ApiError),
}

/// Indicators for one coin over one lookback window
#[derive(Debug, Clone, Serialize)]
pub struct ChartIndicators {
    pub coin: String,
    pub days: u32,
    pub samples: usize,
    pub indicators: IndicatorBundle,
}

/// Everything the analysis prompt is built from
#[derive(Debug, Clone, Serialize)]
pub struct TokenAnalysis {
    pub coin_id: String,
    pub name: String,
    pub symbol: String,
    pub snapshot: CoinSnapshot,
    pub price_changes: BTreeMap<Timeframe, f64>,
    pub indicators: IndicatorBundle,
}

pub struct AnalysisService {
    api: ApiClient,
}

impl AnalysisService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Run the indicator engine over a coin's market chart
    pub async fn chart_indicators(
        &self,
        coin_id: &str,
        days: u32,
    ) -> Result<ChartIndicators, AnalysisError> {
        let points = self.api.fetch_market_chart(coin_id, days).await?;
        if points.is_empty() {
            return Err(AnalysisError::NotFound(format!(
                "No price data found for coin: {}",
                coin_id
            )));
        }

        let prices = project_prices(&points);
        let indicators = compute_indicators(&prices);
        debug!("Computed indicators for {} over {}d ({} samples)", coin_id, days, prices.len());

        Ok(ChartIndicators {
            coin: coin_id.to_string(),
            days,
            samples: prices.len(),
            indicators,
        })
    }

    /// Resolve a ticker symbol and gather market data, indicators and
    /// multi-timeframe price changes for it
    pub async fn analyze(&self, symbol: &str) -> Result<TokenAnalysis, AnalysisError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(AnalysisError::InvalidRequest("Empty token symbol".to_string()));
        }

        let hit = self
            .api
            .search_coins(&symbol)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::NotFound(format!("Token not found: {}", symbol)))?;

        info!("Analyzing {} as {} ({}, {})", symbol, hit.name, hit.symbol, hit.id);

        let snapshot = self.api.fetch_coin_snapshot(&hit.id).await?;
        let chart = self.chart_indicators(&hit.id, ANALYSIS_LOOKBACK_DAYS).await?;

        let mut price_changes = BTreeMap::new();
        for timeframe in Timeframe::ALL {
            match self.api.fetch_market_chart(&hit.id, timeframe.days()).await {
                Ok(points) => {
                    if let Some(change) = price_change_pct(&points) {
                        price_changes.insert(timeframe, change);
                    }
                }
                Err(e) => {
                    warn!("Skipping {} price change for {}: {}", timeframe, hit.id, e);
                }
            }
        }

        Ok(TokenAnalysis {
            coin_id: hit.id,
            name: hit.name,
            symbol,
            snapshot,
            price_changes,
            indicators: chart.indicators,
        })
    }
}

/// Percent change from the first to the last sample
/// None with fewer than 2 samples or a zero starting price
pub fn price_change_pct(points: &[PricePoint]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }

    let start = points.first()?.price;
    let end = points.last()?.price;
    if start == 0.0 {
        return None;
    }

    Some((end - start) / start * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn points(prices: &[f64]) -> Vec<PricePoint> {
        let start = Utc::now();
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint {
                timestamp: start + Duration::hours(i as i64),
                price,
            })
            .collect()
    }

    #[test]
    fn test_price_change_pct() {
        let change = price_change_pct(&points(&[100.0, 90.0, 125.0])).unwrap();
        assert!((change - 25.0).abs() < 1e-9);

        let change = price_change_pct(&points(&[200.0, 150.0])).unwrap();
        assert!((change + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_change_needs_two_samples() {
        assert!(price_change_pct(&[]).is_none());
        assert!(price_change_pct(&points(&[100.0])).is_none());
    }

    #[test]
    fn test_price_change_zero_start() {
        assert!(price_change_pct(&points(&[0.0, 5.0])).is_none());
    }

    #[test]
    fn test_analysis_error_messages() {
        let err = AnalysisError::NotFound("Token not found: XYZ".to_string());
        assert_eq!(err.to_string(), "Not found: Token not found: XYZ");

        let err: AnalysisError = ApiError::ParseError("bad body".to_string()).into();
        assert_eq!(err.to_string(), "Parse error: bad body");
    }
}
