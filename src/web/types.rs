// src/web/types.rs

use rocket::serde::Serialize;
use std::path::PathBuf;

use crate::career_analysis::AnalysisError;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            raw_response: None,
        }
    }
}

impl From<&AnalysisError> for ErrorBody {
    fn from(error: &AnalysisError) -> Self {
        Self {
            error: error.user_message(),
            details: error.details().map(str::to_string),
            raw_response: error.raw_response().map(str::to_string),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub credential_configured: bool,
}

pub struct ServerConfig {
    pub pages_dir: PathBuf,
    pub static_dir: PathBuf,
}
