use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::{AppError, Result};

// Stable Messages API version, works with all current Claude models.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Minimal Anthropic Messages API client. One user message in, the
/// concatenated text blocks out; no streaming, no tool use.
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        model: String,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url,
            model,
            max_tokens,
            timeout,
        }
    }

    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(AppError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Agent(format!(
                "Anthropic API error ({}): {}",
                status, error_text
            )));
        }

        let response: MessagesResponse = response.json().await.map_err(AppError::Network)?;

        let text: String = response
            .content
            .iter()
            .map(|block| block.text.as_str())
            .collect();

        if text.is_empty() {
            return Err(AppError::Agent(
                "Anthropic response contained no text content".to_string(),
            ));
        }

        Ok(text)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}
