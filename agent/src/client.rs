//! Blocking client for an OpenAI-compatible chat-completions endpoint.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::AgentError;
use crate::wire::{FunctionSpec, ResponseMessage};

/// Model requested when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default API root; override for proxies and compatible servers.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Request timeout (milliseconds).
const REQUEST_TIMEOUT_MS: u64 = 60_000;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Connection settings for the remote model.
///
/// Credential handling stays at this boundary: the key is read from the
/// environment once, carried here, and never logged.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
        }
    }

    /// Reads the API key from `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self, AgentError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(&key)),
            _ => Err(AgentError::MissingApiKey),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Remote capability-invocation collaborator.
pub struct RemoteClient {
    http: reqwest::blocking::Client,
    config: RemoteConfig,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Result<Self, AgentError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// Offers one capability spec alongside a natural-language request
    /// and returns the assistant's message.
    pub fn request_capability(
        &self,
        spec: &FunctionSpec,
        prompt: &str,
    ) -> Result<ResponseMessage, AgentError> {
        let body = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": prompt }],
            "functions": [spec],
        });

        debug!(
            model = %self.config.model,
            capability = %spec.name,
            prompt_len = prompt.len(),
            "Sending capability request"
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(AgentError::Api {
                status: status.as_u16(),
                detail: truncate_detail(&detail),
            });
        }

        let completion: ChatCompletion = response.json()?;
        let message = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| AgentError::RemoteProtocolViolation {
                detail: "response contains no choices".to_string(),
            })?;

        debug!(
            has_content = message.content.is_some(),
            has_function_call = message.function_call.is_some(),
            "Received capability response"
        );
        Ok(message)
    }
}

fn truncate_detail(raw: &str) -> String {
    const MAX: usize = 512;
    let trimmed = raw.trim();
    if trimmed.len() <= MAX {
        trimmed.to_string()
    } else {
        let mut end = MAX;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}…", &trimmed[..end])
    }
}
