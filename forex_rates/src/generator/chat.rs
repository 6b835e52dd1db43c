//! OpenAI-compatible chat-completions client.
//!
//! Sends the prompt as a single user message to `{api_base}/chat/completions` and
//! returns `choices[0].message.content`. The HTTP client carries its own request
//! timeout; a timed-out request is reported as `ConverterError::Timeout`.
use std::time::Duration;

use forex_common::error::ConverterError;
use forex_common::result::Result;
use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::generator::TextGenerator;

/// Default endpoint base.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Blocking client for an OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: Option<f32>,
    timeout: Duration,
}

impl ChatCompletionsClient {
    /// Creates a client whose requests give up after `timeout`.
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConverterError::Generation(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: model.to_string(),
            temperature: None,
            timeout,
        })
    }

    /// Points the client at another compatible endpoint.
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

/// Pulls the first choice's text out of a chat-completions response body.
fn extract_content(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ConverterError::Generation(format!("Malformed response body: {}", e)))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ConverterError::Generation("Response has no message content".to_string()))
}

impl TextGenerator for ChatCompletionsClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint();
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };
        debug!("Chat completions request to {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ConverterError::Timeout(self.timeout)
                } else {
                    ConverterError::Generation(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| ConverterError::Generation(format!("Failed to read response: {}", e)))?;
        debug!("Chat completions response ({}): {}", status, text);

        if !status.is_success() {
            return Err(ConverterError::Generation(format!(
                "Service returned {}: {}",
                status, text
            )));
        }
        extract_content(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"[main_rate] 1 USD = 150.25 JPY"}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "[main_rate] 1 USD = 150.25 JPY");
    }

    #[test]
    fn test_extract_content_without_choices() {
        let err = extract_content(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, ConverterError::Generation(_)));
        let err = extract_content(r#"{"error":{"message":"bad key"}}"#).unwrap_err();
        assert!(matches!(err, ConverterError::Generation(_)));
    }

    #[test]
    fn test_extract_content_rejects_garbage() {
        assert!(extract_content("<html>502</html>").is_err());
        let body = r#"{"choices":[{"message":{"content":null}}]}"#;
        assert!(extract_content(body).is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_api_base_trailing_slash() {
        let client = ChatCompletionsClient::new("key", "m", Duration::from_secs(1))
            .unwrap()
            .with_api_base("http://localhost:8080/v1/");
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_unreachable_endpoint_is_call_failure() {
        let client = ChatCompletionsClient::new("key", "m", Duration::from_secs(2))
            .unwrap()
            .with_api_base("http://127.0.0.1:1");
        let err = client.generate("hello").unwrap_err();
        assert!(err.is_retryable());
    }
}
