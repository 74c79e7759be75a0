//! Inference Backend
//!
//! HTTP client for a local llama.cpp-style chat completions endpoint,
//! behind a trait so the pipeline never knows it is talking to HTTP.
//!
//! ## Architecture
//!
//! - `CompletionBackend`: trait every backend implements
//! - `HttpBackend`: the production implementation (reqwest)
//! - `extract`: pulls JSON out of raw completion text
//! - `schema`: response schemas sent as a `response_format` hint
//! - `validate`: strict local validation of the final summary

pub mod extract;
pub mod schema;
pub mod validate;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::constants::inference;
use crate::types::{CredError, Result};

pub use extract::extract_json;
pub use schema::ResponseSchemas;
pub use validate::validate_summary;

/// Trait for structured-completion backends
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run one chat completion and return the parsed JSON content.
    ///
    /// `schema` is forwarded as a response-format hint; callers still
    /// validate the returned value themselves.
    async fn complete(&self, system: &str, user: &str, schema: &Value) -> Result<Value>;

    /// Backend name for logging
    fn name(&self) -> &str;

    /// Check that the backend is reachable and ready
    async fn health_check(&self) -> Result<bool>;
}

/// Shared backend handle passed to the pipeline
pub type SharedBackend = Arc<dyn CompletionBackend>;

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Base URL of the completion server
    pub endpoint: String,
    /// Model name advertised in each request
    pub model: String,
    /// Per-request deadline in seconds
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: inference::DEFAULT_ENDPOINT.to_string(),
            model: inference::DEFAULT_MODEL.to_string(),
            timeout_secs: inference::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// HTTP chat-completions backend (llama.cpp server, OpenAI-compatible)
pub struct HttpBackend {
    endpoint: String,
    model: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: InferenceConfig) -> Result<Self> {
        let endpoint = Self::validate_endpoint(&config.endpoint)?;
        let timeout = Duration::from_secs(config.timeout_secs);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CredError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            model: config.model,
            timeout,
            client,
        })
    }

    /// Validate endpoint URL for security (SSRF prevention)
    ///
    /// Only allows http/https schemes and warns for non-localhost endpoints.
    fn validate_endpoint(endpoint: &str) -> Result<String> {
        let url = url::Url::parse(endpoint).map_err(|e| {
            CredError::Config(format!("Invalid inference endpoint '{}': {}", endpoint, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(CredError::Config(format!(
                "Inference endpoint must use http or https scheme, got: {}",
                url.scheme()
            )));
        }

        if let Some(host) = url.host_str() {
            if !matches!(host, "localhost" | "127.0.0.1" | "::1") {
                warn!(
                    "Inference endpoint is not localhost: {}. Ensure this is intentional.",
                    host
                );
            }
        }

        // Remove trailing slash for consistency
        let mut result = url.to_string();
        if result.ends_with('/') {
            result.pop();
        }
        Ok(result)
    }

    fn build_request(&self, system: &str, user: &str, schema: &Value) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: inference::TEMPERATURE,
            top_k: inference::TOP_K,
            top_p: inference::TOP_P,
            stream: false,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
                schema: schema.clone(),
            },
        }
    }
}

#[async_trait]
impl CompletionBackend for HttpBackend {
    async fn complete(&self, system: &str, user: &str, schema: &Value) -> Result<Value> {
        let url = format!("{}{}", self.endpoint, inference::COMPLETIONS_PATH);
        let request = self.build_request(system, user, schema);

        debug!(model = %self.model, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(inference::PLACEHOLDER_API_KEY)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CredError::timeout("chat completion", self.timeout)
                } else if e.is_connect() {
                    CredError::InferenceUnavailable {
                        endpoint: self.endpoint.clone(),
                        message: format!(
                            "failed to connect: {}. Is the completion server running?",
                            e
                        ),
                    }
                } else {
                    CredError::InferenceUnavailable {
                        endpoint: self.endpoint.clone(),
                        message: e.to_string(),
                    }
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CredError::InferenceRequestFailed {
                status,
                message: body.chars().take(500).collect(),
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| CredError::malformed(format!("unreadable response body: {}", e)))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CredError::malformed("response contains no choices"))?;

        // The content field is itself a JSON document, parsed separately.
        extract_json(&choice.message.content)
    }

    fn name(&self) -> &str {
        "llama-server"
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}{}", self.endpoint, inference::HEALTH_PATH);

        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("Inference server is available at {}", self.endpoint);
                Ok(true)
            }
            Ok(resp) => {
                warn!("Inference server health check failed: {}", resp.status());
                Ok(false)
            }
            Err(e) => {
                warn!("Inference server not available: {}", e);
                Ok(false)
            }
        }
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    top_k: u32,
    top_p: f32,
    stream: bool,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
    schema: Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let backend = HttpBackend::new(InferenceConfig::default()).unwrap();
        assert_eq!(backend.endpoint, "http://127.0.0.1:8080");
        assert_eq!(backend.model, "phi-3.5");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = InferenceConfig {
            endpoint: "file:///etc/passwd".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpBackend::new(config),
            Err(CredError::Config(_))
        ));
    }

    #[test]
    fn test_strips_trailing_slash() {
        let config = InferenceConfig {
            endpoint: "http://127.0.0.1:8080/".to_string(),
            ..Default::default()
        };
        let backend = HttpBackend::new(config).unwrap();
        assert_eq!(backend.endpoint, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_request_shape() {
        let backend = HttpBackend::new(InferenceConfig::default()).unwrap();
        let request = backend.build_request("sys", "usr", &json!({"type": "object"}));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["stream"], false);
        assert_eq!(value["response_format"]["type"], "json_object");
        assert!((value["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }
}
