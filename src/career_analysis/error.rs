use thiserror::Error;

use crate::core::inference_client::RemoteCallError;

pub const ACCESS_DENIED_MESSAGE: &str = "Access denied to the HF model. You may need to visit the model page on Hugging Face and accept the terms of use, or verify your API key permissions.";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Hugging Face API Key is missing or invalid. Please check your .env file.")]
    Configuration,

    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    RemoteCall(#[from] RemoteCallError),

    #[error("The AI provided an incorrectly formatted response.")]
    ResponseFormat {
        details: String,
        raw_response: String,
    },
}

impl AnalysisError {
    /// Message shown to the caller; access denials get operator guidance
    /// instead of the raw failure text.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::RemoteCall(e) if e.is_access_denied() => {
                ACCESS_DENIED_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            AnalysisError::ResponseFormat { details, .. } => Some(details),
            _ => None,
        }
    }

    pub fn raw_response(&self) -> Option<&str> {
        match self {
            AnalysisError::ResponseFormat { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AnalysisError::Configuration => "CONFIGURATION_ERROR",
            AnalysisError::InvalidRequest(_) => "INVALID_REQUEST",
            AnalysisError::RemoteCall(e) if e.is_access_denied() => "ACCESS_DENIED",
            AnalysisError::RemoteCall(_) => "REMOTE_CALL_ERROR",
            AnalysisError::ResponseFormat { .. } => "RESPONSE_FORMAT_ERROR",
        }
    }
}
