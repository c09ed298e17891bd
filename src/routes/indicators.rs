use axum::{extract::{Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use crate::{config::MAX_LOOKBACK_DAYS, services::analysis_service::ChartIndicators, state::AppState};
use super::{error_response, ApiResult};

#[derive(Deserialize)]
pub struct IndicatorQuery {
    pub coin: String,            // CoinGecko coin id, e.g. "bitcoin"
    pub days: Option<u32>,       // lookback window, defaults to config
}

pub async fn get_indicators(
    State(state): State<AppState>,
    Query(query): Query<IndicatorQuery>,
) -> ApiResult<ChartIndicators> {
    let coin = query.coin.trim().to_lowercase();
    if coin.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "Missing coin id"));
    }
    if !is_valid_coin_id(&coin) {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid coin id: {}", coin),
        ));
    }

    let days = query.days.unwrap_or(state.config.default_lookback_days);
    if days == 0 || days > MAX_LOOKBACK_DAYS {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!(
                "Lookback must be between 1 and {} days. Requested: {}",
                MAX_LOOKBACK_DAYS, days
            ),
        ));
    }

    tracing::info!("Indicator request for {} over {}d", coin, days);

    let result = state.analysis.chart_indicators(&coin, days).await?;
    Ok(Json(result))
}

/// Coin ids are placed in the upstream URL path, so only `[a-z0-9-]` is allowed
fn is_valid_coin_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
