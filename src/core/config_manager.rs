// src/core/config_manager.rs
//! Unified configuration: server environment plus inference settings

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

use crate::core::inference_client::{HuggingFaceClient, DEFAULT_MODEL_ID};
use crate::environment::EnvironmentConfig;

pub const API_KEY_VAR: &str = "HUGGINGFACE_API_KEY";
pub const ENDPOINT_VAR: &str = "HF_INFERENCE_URL";

/// Value shipped in the sample `.env`; treated the same as an unset key.
pub const PLACEHOLDER_API_KEY: &str = "your_hugging_face_api_key_here";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub inference: InferenceConfig,
}

#[derive(Clone)]
pub struct InferenceConfig {
    pub api_key: Option<String>,
    pub model_id: String,
    pub endpoint: String,
}

// Keeps the credential out of debug output.
impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model_id", &self.model_id)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ConfigManager {
    /// Load all configurations
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let environment = EnvironmentConfig::load(config_path)?;
        let inference = InferenceConfig::from_env();

        if !inference.credential_configured() {
            warn!(
                "{} is missing or still set to the placeholder; /api/analyze will reject requests",
                API_KEY_VAR
            );
        }

        Ok(Self {
            environment,
            inference,
        })
    }

    /// Build the inference client, once per process.
    pub fn create_inference_client(&self) -> HuggingFaceClient {
        info!(
            "Inference model: {} ({})",
            self.inference.model_id, self.inference.endpoint
        );
        HuggingFaceClient::new(
            self.inference.api_key.clone(),
            self.inference.model_id.clone(),
            self.inference.endpoint.clone(),
        )
    }
}

impl InferenceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_id = DEFAULT_MODEL_ID.to_string();
        let endpoint = lookup(ENDPOINT_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| HuggingFaceClient::default_endpoint(&model_id));

        Self {
            api_key: lookup(API_KEY_VAR),
            model_id,
            endpoint,
        }
    }

    pub fn credential_configured(&self) -> bool {
        is_usable_api_key(self.api_key.as_deref())
    }
}

/// A key is usable when present, non-blank and not the placeholder.
pub fn is_usable_api_key(key: Option<&str>) -> bool {
    match key.map(str::trim) {
        Some(key) => !key.is_empty() && key != PLACEHOLDER_API_KEY,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_is_usable_api_key() {
        assert!(is_usable_api_key(Some("hf_abc123")));
        assert!(!is_usable_api_key(None));
        assert!(!is_usable_api_key(Some("")));
        assert!(!is_usable_api_key(Some("   ")));
        assert!(!is_usable_api_key(Some(PLACEHOLDER_API_KEY)));
    }

    #[test]
    fn test_inference_config_defaults() {
        let config = InferenceConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.model_id, DEFAULT_MODEL_ID);
        assert_eq!(config.endpoint, HuggingFaceClient::default_endpoint(DEFAULT_MODEL_ID));
        assert!(config.api_key.is_none());
        assert!(!config.credential_configured());
    }

    #[test]
    fn test_inference_config_overrides() {
        let config = InferenceConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "hf_real"),
            (ENDPOINT_VAR, "http://localhost:8080/v1/chat/completions"),
        ]));
        assert_eq!(config.endpoint, "http://localhost:8080/v1/chat/completions");
        assert!(config.credential_configured());
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = InferenceConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "hf_secret")]));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hf_secret"));
        assert!(rendered.contains("***"));
    }
}
