use crate::api_client::ApiClient;
use crate::config::Config;
use crate::services::analysis_service::AnalysisService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analysis: Arc<AnalysisService>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let api_client = ApiClient::new(
            config.coingecko_api_base.clone(),
            config.coingecko_api_key.clone(),
        );

        Self {
            config: Arc::new(config),
            analysis: Arc::new(AnalysisService::new(api_client)),
        }
    }
}
