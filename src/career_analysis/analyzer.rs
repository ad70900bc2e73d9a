use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::error::AnalysisError;
use super::prompt::build_prompt;
use super::types::{AnalysisResult, Profile};
use crate::core::config_manager::is_usable_api_key;
use crate::core::inference_client::{
    ChatCompletionRequest, CompletionClient, GenerationParams, RemoteCallError,
};

pub struct CareerAnalyzer {
    client: Arc<dyn CompletionClient>,
    params: GenerationParams,
}

impl CareerAnalyzer {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            params: GenerationParams::default(),
        }
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }

    pub fn credential_configured(&self) -> bool {
        is_usable_api_key(self.client.api_key())
    }

    /// Run one analysis from a raw request body.
    ///
    /// The credential is checked before the body is looked at.
    pub async fn analyze_body(&self, body: &str) -> Result<Value, AnalysisError> {
        self.ensure_credential()?;

        let profile: Profile = serde_json::from_str(body)
            .map_err(|e| AnalysisError::InvalidRequest(format!("Invalid profile payload: {}", e)))?;

        self.run(&profile).await
    }

    pub async fn analyze(&self, profile: &Profile) -> Result<Value, AnalysisError> {
        self.ensure_credential()?;
        self.run(profile).await
    }

    fn ensure_credential(&self) -> Result<(), AnalysisError> {
        if self.credential_configured() {
            Ok(())
        } else {
            warn!("Rejecting analysis: inference credential is not configured");
            Err(AnalysisError::Configuration)
        }
    }

    async fn run(&self, profile: &Profile) -> Result<Value, AnalysisError> {
        let prompt = build_prompt(profile);
        let request =
            ChatCompletionRequest::single_prompt(self.client.model(), &prompt, self.params);

        info!(
            "Requesting career suggestions ({} interests, {} strengths, {} values)",
            profile.interests().len(),
            profile.strengths().len(),
            profile.values().len()
        );

        let response = self.client.chat_completion(&request).await.map_err(|e| {
            error!("Error during AI analysis: {}", e);
            AnalysisError::from(e)
        })?;

        let raw_text = response
            .first_content()
            .ok_or_else(|| {
                error!("Error during AI analysis: completion had no content");
                RemoteCallError::EmptyCompletion
            })?
            .trim();

        let cleaned = strip_code_fences(raw_text);

        match serde_json::from_str::<Value>(cleaned.trim()) {
            Ok(parsed) => {
                log_suggestion_shape(&parsed);
                Ok(parsed)
            }
            Err(e) => {
                error!("Failed to parse JSON. Raw response from model:\n{}", cleaned);
                Err(AnalysisError::ResponseFormat {
                    details: e.to_string(),
                    raw_response: cleaned.to_string(),
                })
            }
        }
    }
}

/// Strip a markdown fence wrapped around the whole text.
///
/// Only a leading ```` ```json ```` and/or ```` ``` ```` and a trailing
/// ```` ``` ```` are removed; fences elsewhere are left alone.
pub fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text;
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned
}

fn log_suggestion_shape(parsed: &Value) {
    match serde_json::from_value::<AnalysisResult>(parsed.clone()) {
        Ok(suggestions) => debug!("Model returned {} career suggestions", suggestions.len()),
        Err(e) => debug!("Model output does not match the suggestion schema: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::inference_client::ChatCompletionResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ScriptedClient {
        api_key: Option<String>,
        reply: String,
        calls: AtomicUsize,
        last_request: Mutex<Option<ChatCompletionRequest>>,
    }

    impl ScriptedClient {
        fn new(api_key: Option<&str>, reply: &str) -> Arc<Self> {
            Arc::new(Self {
                api_key: api_key.map(str::to_string),
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        fn model(&self) -> &str {
            "test/model"
        }

        fn api_key(&self) -> Option<&str> {
            self.api_key.as_deref()
        }

        async fn chat_completion(
            &self,
            request: &ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, RemoteCallError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            Ok(ChatCompletionResponse::with_content(self.reply.clone()))
        }
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json[1]```"), "[1]");
        assert_eq!(strip_code_fences("```\n[1]\n```"), "\n[1]\n");
        assert_eq!(strip_code_fences("[1]"), "[1]");
        assert_eq!(strip_code_fences("[1]```"), "[1]");
        // Only start and end fences are handled.
        assert_eq!(strip_code_fences("Here:\n```json\n[1]\n```"), "Here:\n```json\n[1]\n");
        assert_eq!(strip_code_fences("```json\n[1]\n```\n"), "\n[1]\n```\n");
    }

    #[test]
    fn test_strip_code_fences_is_idempotent_on_clean_input() {
        let clean = r#"[{"title":"Data Scientist"}]"#;
        assert_eq!(strip_code_fences(clean), clean);
        assert_eq!(strip_code_fences(strip_code_fences(clean)), clean);
    }

    #[tokio::test]
    async fn test_analyze_sends_single_user_prompt() {
        let client = ScriptedClient::new(Some("hf_key"), "  ```json\n[]\n```  ");
        let analyzer = CareerAnalyzer::new(client.clone());

        let result = analyzer.analyze(&Profile::default()).await.unwrap();
        assert_eq!(result, serde_json::json!([]));

        let request = client.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "test/model");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.messages[0].content, build_prompt(&Profile::default()));
        assert_eq!(request.max_tokens, 1024);
        assert_eq!(request.seed, 42);
    }

    #[tokio::test]
    async fn test_missing_credential_skips_remote_call() {
        for key in [None, Some(""), Some(crate::core::config_manager::PLACEHOLDER_API_KEY)] {
            let client = ScriptedClient::new(key, "[]");
            let analyzer = CareerAnalyzer::new(client.clone());

            let error = analyzer.analyze_body("not json at all").await.unwrap_err();
            assert!(matches!(error, AnalysisError::Configuration));
            assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_invalid_body_is_reported() {
        let client = ScriptedClient::new(Some("hf_key"), "[]");
        let analyzer = CareerAnalyzer::new(client.clone());

        let error = analyzer.analyze_body("[1, 2").await.unwrap_err();
        assert!(matches!(error, AnalysisError::InvalidRequest(_)));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unparseable_reply_keeps_sanitized_text() {
        let client = ScriptedClient::new(Some("hf_key"), "```json\nSure! Here you go\n```");
        let analyzer = CareerAnalyzer::new(client);

        let error = analyzer.analyze(&Profile::default()).await.unwrap_err();
        assert_eq!(error.raw_response(), Some("\nSure! Here you go\n"));
        assert!(error.details().is_some());
    }
}
