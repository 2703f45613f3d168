//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for chat completion against OpenAI-compatible endpoints
//! (the default deployment talks to the Naga API base URL).
//! Provides token masking for safe logging and a simple request/response API.

use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use std::sync::Arc;
use tracing;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If the token has 11 chars or fewer, returns "***" to avoid leaking any part of the key.
/// Counts chars, not bytes, so keys with non-ASCII characters never split a code point.
/// Exposed for tests and for the image and transcription clients, which log keys the same way.
pub fn mask_token(token: &str) -> String {
    let len = token.chars().count();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = token.chars().take(7).collect();
    let tail: String = token.chars().skip(len - 4).collect();
    format!("{}***{}", head, tail)
}

/// Builds an async-openai config for the given key and optional base URL.
pub fn openai_config(api_key: impl Into<String>, base_url: Option<&str>) -> OpenAIConfig {
    let config = OpenAIConfig::new().with_api_key(api_key.into());
    match base_url {
        Some(url) => config.with_api_base(url.trim_end_matches('/')),
        None => config,
    }
}

/// OpenAI chat client. Wraps async-openai client; optionally holds API key for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    /// Shared async-openai client used for all API calls.
    client: Arc<Client<OpenAIConfig>>,
    /// API key stored only for logging (masked).
    api_key: String,
}

impl OpenAIClient {
    /// Builds a client using the given API key and default API base URL.
    pub fn new(api_key: String) -> Self {
        Self {
            client: Arc::new(Client::with_config(openai_config(api_key.clone(), None))),
            api_key,
        }
    }

    /// Builds a client with a custom base URL (e.g. the Naga endpoint or a mock server).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Arc::new(Client::with_config(openai_config(
                api_key.clone(),
                Some(base_url.as_str()),
            ))),
            api_key,
        }
    }

    fn masked_key(&self) -> String {
        mask_token(&self.api_key)
    }

    /// Sends a chat completion request for one completion and returns the assistant reply.
    ///
    /// Logs masked API key, request JSON, and token usage. Fails when the response has no
    /// choices or the first choice carries no text content.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %self.masked_key(),
            "OpenAI chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .n(1)
            .build()?;

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        let choice = response
            .choices
            .first()
            .ok_or_else(|| anyhow::anyhow!("No response from chat completion endpoint"))?;
        choice
            .message
            .content
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Chat completion choice has no text content"))
    }
}
