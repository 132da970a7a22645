use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::prompt::{build_user_prompt, DEFAULT_SYSTEM_PROMPT};
use crate::providers::{provider_by_id, ProviderInfo, ProviderKind};
use crate::types::ModelSpec;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummarizeError {
    #[error("unknown provider {0}")]
    UnknownProvider(String),
    #[error("no api key configured for {0}")]
    MissingApiKey(String),
    #[error("no base url configured for {0}")]
    MissingBaseUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone)]
pub struct SummarizerSettings {
    pub api_keys: HashMap<String, String>,
    pub base_urls: HashMap<String, String>,
    /// Overrides the built-in system prompt.
    pub system_prompt: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_tokens: u32,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            api_keys: HashMap::new(),
            base_urls: HashMap::new(),
            system_prompt: None,
            connect_timeout: Duration::from_secs(10),
            // Completions are slow; give the model room to answer.
            request_timeout: Duration::from_secs(180),
            max_tokens: 4096,
        }
    }
}

#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, model: &ModelSpec, article: &str) -> Result<String, SummarizeError>;
}

/// LLM client speaking the two wire dialects of the provider table. One
/// request per summary, no streaming, no retry: a transport failure is
/// reported as-is and the caller decides what to show.
pub struct HttpSummarizer {
    settings: SummarizerSettings,
}

impl HttpSummarizer {
    pub fn new(settings: SummarizerSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, SummarizeError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| SummarizeError::Network(err.to_string()))
    }

    fn resolve_base_url(&self, provider: &ProviderInfo) -> Result<String, SummarizeError> {
        self.settings
            .base_urls
            .get(provider.id)
            .map(|base| base.trim_end_matches('/').to_string())
            .or_else(|| {
                provider
                    .default_base_url
                    .map(|base| base.trim_end_matches('/').to_string())
            })
            .ok_or_else(|| SummarizeError::MissingBaseUrl(provider.id.to_string()))
    }

    fn resolve_api_key(&self, provider: &ProviderInfo) -> Result<Option<&str>, SummarizeError> {
        let key = self
            .settings
            .api_keys
            .get(provider.id)
            .map(String::as_str)
            .filter(|key| !key.is_empty());
        if provider.requires_api_key && key.is_none() {
            return Err(SummarizeError::MissingApiKey(provider.id.to_string()));
        }
        Ok(key)
    }

    fn system_prompt(&self) -> &str {
        self.settings
            .system_prompt
            .as_deref()
            .filter(|prompt| !prompt.trim().is_empty())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    async fn chat_completion(
        &self,
        base_url: &str,
        api_key: Option<&str>,
        model_id: &str,
        article: &str,
    ) -> Result<String, SummarizeError> {
        let user_prompt = build_user_prompt(article);
        let request = ChatRequest {
            model: model_id,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: self.system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            max_tokens: Some(self.settings.max_tokens),
        };

        let mut builder = self
            .build_client()?
            .post(format!("{base_url}/chat/completions"))
            .json(&request);
        if let Some(key) = api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send().await.map_err(map_transport_error)?;
        let response = check_status(response).await?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|err| SummarizeError::MalformedResponse(err.to_string()))?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                SummarizeError::MalformedResponse("response carried no message content".to_string())
            })
    }

    async fn anthropic_message(
        &self,
        base_url: &str,
        api_key: &str,
        model_id: &str,
        article: &str,
    ) -> Result<String, SummarizeError> {
        let user_prompt = build_user_prompt(article);
        let request = AnthropicRequest {
            model: model_id,
            max_tokens: self.settings.max_tokens,
            system: self.system_prompt(),
            messages: vec![AnthropicMessage {
                role: "user",
                content: &user_prompt,
            }],
        };

        let response = self
            .build_client()?
            .post(format!("{base_url}/v1/messages"))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = check_status(response).await?;

        let body: AnthropicResponse = response
            .json()
            .await
            .map_err(|err| SummarizeError::MalformedResponse(err.to_string()))?;
        body.content
            .into_iter()
            .find_map(|block| match block {
                AnthropicBlock::Text { text } => Some(text),
                AnthropicBlock::Other => None,
            })
            .ok_or_else(|| {
                SummarizeError::MalformedResponse("response carried no text block".to_string())
            })
    }
}

#[async_trait::async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, model: &ModelSpec, article: &str) -> Result<String, SummarizeError> {
        let provider = provider_by_id(&model.provider_id)
            .ok_or_else(|| SummarizeError::UnknownProvider(model.provider_id.clone()))?;
        let base_url = self.resolve_base_url(provider)?;
        let api_key = self.resolve_api_key(provider)?;

        match provider.kind {
            ProviderKind::OpenAiCompatible => {
                self.chat_completion(&base_url, api_key, &model.model_id, article)
                    .await
            }
            ProviderKind::Anthropic => {
                // requires_api_key holds for every Anthropic-dialect entry.
                let key = api_key
                    .ok_or_else(|| SummarizeError::MissingApiKey(provider.id.to_string()))?;
                self.anthropic_message(&base_url, key, &model.model_id, article)
                    .await
            }
        }
    }
}

fn map_transport_error(err: reqwest::Error) -> SummarizeError {
    if err.is_timeout() {
        return SummarizeError::Network("request timed out".to_string());
    }
    SummarizeError::Network(err.to_string())
}

/// Turns a non-2xx response into an Api error, preferring the provider's own
/// `error.message` field when the body is the usual error JSON.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SummarizeError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(String::from))
        .unwrap_or(body);
    Err(SummarizeError::Api {
        status: status.as_u16(),
        message,
    })
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AnthropicBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}
