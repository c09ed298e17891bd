use crate::models::{CoinSearchHit, CoinSnapshot, PricePoint};
use chrono::DateTime;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<CoinSearchHit>,
}

#[derive(Deserialize)]
struct CoinResponse {
    #[serde(default)]
    market_data: Option<MarketData>,
}

#[derive(Deserialize, Default)]
struct MarketData {
    #[serde(default)]
    current_price: UsdValue,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    market_cap: UsdValue,
    #[serde(default)]
    total_volume: UsdValue,
}

#[derive(Deserialize, Default)]
struct UsdValue {
    #[serde(default)]
    usd: Option<f64>,
}

#[derive(Deserialize)]
struct MarketChartResponse {
    // [timestamp_ms, price]
    #[serde(default)]
    prices: Vec<(f64, f64)>,
}

/// Client for the CoinGecko REST API
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn get_text(&self, path: &str, query: &[(&str, String)]) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .get(&url)
            .query(query)
            .header("User-Agent", "token-signals/0.1");
        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .text()
            .await
            .map_err(|e| ApiError::ParseError(format!("Failed to get response text: {}", e)))
    }

    /// Search coins by name or symbol, best match first
    pub async fn search_coins(&self, query: &str) -> Result<Vec<CoinSearchHit>, ApiError> {
        let body = self
            .get_text("/search", &[("query", query.to_string())])
            .await?;
        parse_search(&body)
    }

    pub async fn fetch_coin_snapshot(&self, coin_id: &str) -> Result<CoinSnapshot, ApiError> {
        let query = [
            ("localization", "false".to_string()),
            ("tickers", "false".to_string()),
            ("market_data", "true".to_string()),
            ("community_data", "false".to_string()),
            ("developer_data", "false".to_string()),
            ("sparkline", "false".to_string()),
        ];
        let body = self.get_text(&format!("/coins/{}", coin_id), &query).await?;
        parse_coin_snapshot(&body)
    }

    /// Fetch USD price samples over the last `days` days, oldest first
    /// Hourly granularity for a single day, daily beyond that
    pub async fn fetch_market_chart(
        &self,
        coin_id: &str,
        days: u32,
    ) -> Result<Vec<PricePoint>, ApiError> {
        let interval = if days <= 1 { "hourly" } else { "daily" };
        let query = [
            ("vs_currency", "usd".to_string()),
            ("days", days.to_string()),
            ("interval", interval.to_string()),
        ];
        let body = self
            .get_text(&format!("/coins/{}/market_chart", coin_id), &query)
            .await?;
        parse_market_chart(&body)
    }
}

fn parse_search(body: &str) -> Result<Vec<CoinSearchHit>, ApiError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::ParseError(format!("Failed to parse search results: {}", e)))?;
    Ok(response.coins)
}

fn parse_coin_snapshot(body: &str) -> Result<CoinSnapshot, ApiError> {
    let response: CoinResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::ParseError(format!("Failed to parse coin data: {}", e)))?;
    let market = response.market_data.unwrap_or_default();

    Ok(CoinSnapshot {
        current_price: market.current_price.usd.unwrap_or(0.0),
        price_change_percentage_24h: market.price_change_percentage_24h.unwrap_or(0.0),
        market_cap: market.market_cap.usd.unwrap_or(0.0),
        total_volume: market.total_volume.usd.unwrap_or(0.0),
    })
}

/// Parse a market chart body into price points, keeping the upstream order
fn parse_market_chart(body: &str) -> Result<Vec<PricePoint>, ApiError> {
    let response: MarketChartResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::ParseError(format!("Failed to parse market chart: {}", e)))?;

    response
        .prices
        .into_iter()
        .map(|(timestamp_ms, price)| {
            if !price.is_finite() {
                return Err(ApiError::ParseError(format!("Non-finite price: {}", price)));
            }
            let timestamp = DateTime::from_timestamp_millis(timestamp_ms as i64)
                .ok_or_else(|| ApiError::ParseError("Invalid timestamp conversion".to_string()))?;
            Ok(PricePoint { timestamp, price })
        })
        .collect()
}

/// Drop timestamps, keep the chronological order
pub fn project_prices(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.price).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_market_chart() {
        let body = r#"{
            "prices": [[1700000000000, 37000.5], [1700003600000, 37100], [1700007200000, 36950.25]],
            "market_caps": [],
            "total_volumes": []
        }"#;

        let points = parse_market_chart(body).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].timestamp.timestamp(), 1_700_000_000);
        assert_eq!(points[1].price, 37100.0);
        assert_eq!(project_prices(&points), vec![37000.5, 37100.0, 36950.25]);
    }

    #[test]
    fn test_parse_market_chart_keeps_order() {
        let body = r#"{"prices": [[1700003600000, 2.0], [1700000000000, 1.0]]}"#;
        let points = parse_market_chart(body).unwrap();
        assert_eq!(project_prices(&points), vec![2.0, 1.0]);
    }

    #[test]
    fn test_parse_market_chart_missing_prices() {
        assert!(parse_market_chart("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_market_chart_malformed() {
        let result = parse_market_chart(r#"{"prices": [[1700000000000]]}"#);
        assert!(matches!(result, Err(ApiError::ParseError(_))));
    }

    #[test]
    fn test_parse_search() {
        let body = r#"{"coins": [
            {"id": "bitcoin", "name": "Bitcoin", "symbol": "BTC", "market_cap_rank": 1},
            {"id": "wrapped-bitcoin", "name": "Wrapped Bitcoin", "symbol": "WBTC"}
        ], "exchanges": []}"#;

        let hits = parse_search(body).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "bitcoin");
        assert_eq!(hits[1].symbol, "WBTC");
    }

    #[test]
    fn test_parse_coin_snapshot() {
        let body = r#"{
            "id": "bitcoin",
            "market_data": {
                "current_price": {"usd": 64000.12, "eur": 59000.0},
                "price_change_percentage_24h": -1.5,
                "market_cap": {"usd": 1250000000000},
                "total_volume": {"usd": 32000000000}
            }
        }"#;

        let snapshot = parse_coin_snapshot(body).unwrap();
        assert_eq!(snapshot.current_price, 64000.12);
        assert_eq!(snapshot.price_change_percentage_24h, -1.5);
        assert_eq!(snapshot.market_cap, 1.25e12);
        assert_eq!(snapshot.total_volume, 3.2e10);
    }

    #[test]
    fn test_parse_coin_snapshot_missing_fields_default_to_zero() {
        let snapshot = parse_coin_snapshot(r#"{"id": "obscure"}"#).unwrap();
        assert_eq!(snapshot, CoinSnapshot::default());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ApiClient::new("https://example.com/api/v3/", None);
        assert_eq!(client.base_url, "https://example.com/api/v3");
    }
}
