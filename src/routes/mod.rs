use crate::services::analysis_service::AnalysisError;
use axum::{http::StatusCode, Json};
use serde::Serialize;

pub mod analysis;
pub mod indicators;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

pub fn error_response(status: StatusCode, error: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

impl From<AnalysisError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: AnalysisError) -> Self {
        let status = match &err {
            AnalysisError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AnalysisError::NotFound(_) => StatusCode::NOT_FOUND,
            AnalysisError::Upstream(e) => {
                tracing::warn!("Upstream market data error: {}", e);
                StatusCode::BAD_GATEWAY
            }
        };
        error_response(status, err.to_string())
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
