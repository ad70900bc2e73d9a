// src/core/inference_client.rs
//! Chat-completion client for the hosted Hugging Face inference API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

pub const DEFAULT_MODEL_ID: &str = "mistralai/Mistral-7B-Instruct-v0.2";

const HF_ROUTER_BASE: &str = "https://router.huggingface.co/hf-inference/models";

/// Decoding parameters sent with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub seed: u64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.3,
            top_p: 0.9,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub seed: u64,
    pub stream: bool,
}

impl ChatCompletionRequest {
    /// Single user-role message with the given decoding parameters.
    pub fn single_prompt(model: &str, prompt: &str, params: GenerationParams) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            seed: params.seed,
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Response holding a single choice with `content`.
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            choices: vec![ChatChoice {
                message: ChatChoiceMessage {
                    content: Some(content.into()),
                },
            }],
        }
    }

    /// Text of the first completion choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

#[derive(Debug, Error)]
pub enum RemoteCallError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", format_status(.status, .reason, .url, .body))]
    Status {
        status: u16,
        reason: String,
        url: String,
        body: String,
    },

    #[error("Failed to decode completion response: {0}")]
    Decode(String),

    #[error("The inference service returned no completion content")]
    EmptyCompletion,

    #[error("{0}")]
    Other(String),
}

fn format_status(status: &u16, reason: &str, url: &str, body: &str) -> String {
    let kind = if *status >= 500 {
        "Server Error"
    } else {
        "Client Error"
    };
    let mut message = format!("{} {}: {} for url: {}", status, kind, reason, url);
    if !body.trim().is_empty() {
        message.push_str(" - ");
        message.push_str(body.trim());
    }
    message
}

impl RemoteCallError {
    /// Whether the remote service refused access to the model.
    pub fn is_access_denied(&self) -> bool {
        match self {
            RemoteCallError::Status { status: 403, .. } => true,
            other => other.to_string().contains("403 Client Error"),
        }
    }
}

/// A hosted chat-completion backend.
///
/// The client owns the credential and model identifier so the handler never
/// reads process-wide state.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    fn model(&self) -> &str;

    fn api_key(&self) -> Option<&str>;

    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, RemoteCallError>;
}

pub struct HuggingFaceClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl HuggingFaceClient {
    pub fn new(api_key: Option<String>, model: String, endpoint: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            endpoint,
        }
    }

    /// Router URL serving the chat-completion route for `model`.
    pub fn default_endpoint(model: &str) -> String {
        format!("{}/{}/v1/chat/completions", HF_ROUTER_BASE, model)
    }
}

#[async_trait]
impl CompletionClient for HuggingFaceClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, RemoteCallError> {
        info!("Calling inference service: {}", self.endpoint);

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!("Inference response status: {}", status);

        if !status.is_success() {
            let url = response.url().to_string();
            let body = response.text().await.unwrap_or_default();
            error!("Inference service error {}: {}", status, body);
            return Err(RemoteCallError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url,
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str::<ChatCompletionResponse>(&text)
            .map_err(|e| RemoteCallError::Decode(e.to_string()))
    }
}
