use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// First-pass match from a coin search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSearchHit {
    pub id: String,
    pub name: String,
    pub symbol: String,
}

/// Current market numbers for a coin, all in USD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinSnapshot {
    pub current_price: f64,
    pub price_change_percentage_24h: f64,
    pub market_cap: f64,
    pub total_volume: f64,
}

/// Lookback windows used for the multi-timeframe price change summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::OneDay,
        Timeframe::ThreeDays,
        Timeframe::OneWeek,
        Timeframe::OneMonth,
    ];

    pub fn days(self) -> u32 {
        match self {
            Timeframe::OneDay => 1,
            Timeframe::ThreeDays => 3,
            Timeframe::OneWeek => 7,
            Timeframe::OneMonth => 30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::OneDay => "1d",
            Timeframe::ThreeDays => "3d",
            Timeframe::OneWeek => "1w",
            Timeframe::OneMonth => "1m",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
