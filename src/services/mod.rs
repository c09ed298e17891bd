pub mod analysis_service;
pub mod prompt;
