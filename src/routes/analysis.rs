use axum::{extract::{Query, State}, Json};
use serde::{Deserialize, Serialize};
use crate::{
    services::{
        analysis_service::TokenAnalysis,
        prompt::{build_analysis_prompt, SYSTEM_PROMPT},
    },
    state::AppState,
};
use super::ApiResult;

#[derive(Deserialize)]
pub struct AnalysisQuery {
    pub symbol: String,
}

#[derive(Serialize)]
pub struct AnalysisResponse {
    pub analysis: TokenAnalysis,
    pub system_prompt: &'static str,
    pub prompt: String,
}

/// Gather market data and indicators for a token and render the AI prompt
pub async fn get_analysis(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> ApiResult<AnalysisResponse> {
    tracing::info!("Analysis request for {}", query.symbol);

    let analysis = state.analysis.analyze(&query.symbol).await?;
    let prompt = build_analysis_prompt(&analysis);

    Ok(Json(AnalysisResponse {
        analysis,
        system_prompt: SYSTEM_PROMPT,
        prompt,
    }))
}
