//! Client for the Google Generative Language API
//!
//! One `generateContent` call per form submission. The client owns the
//! request and response wire types and maps transport failures, non-success
//! statuses and empty payloads onto `TripForgeError::Api` values so callers
//! decide presentation without unwinding.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::config::GeminiConfig;
use crate::error::TripForgeError;
use crate::Result;

/// Fixed prompt for the connectivity self-test
const SELF_TEST_PROMPT: &str =
    "Respond with 'API test successful' if you can read this message.";

/// Temperature for the self-test call; kept low for a short, stable reply
const SELF_TEST_TEMPERATURE: f32 = 0.1;

/// Something that can turn a prompt into generated text
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Generate text for a prompt at the given sampling temperature
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String>;

    /// Cheap connectivity and credential check
    async fn self_test(&self) -> Result<String> {
        self.generate(SELF_TEST_PROMPT, SELF_TEST_TEMPERATURE).await
    }
}

/// `generateContent` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// `generateContent` response body, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate. Empty text is a hard
    /// failure for the submission.
    fn into_text(self) -> Result<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(TripForgeError::api("No response received from API"));
        }
        Ok(text)
    }
}

/// HTTP client for the Generative Language API
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

impl GeminiClient {
    /// Create a new client from validated configuration
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                TripForgeError::config("GOOGLE_API_KEY not found in environment or config file")
            })?;

        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("TripForge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripForgeError::general(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Model resource name this client talks to
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Call `generateContent` and return the generated text
    #[instrument(skip(self, prompt), fields(model = %self.config.model, prompt_len = prompt.len()))]
    pub async fn generate_content(&self, prompt: &str, temperature: f32) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig { temperature },
        };

        debug!("Requesting plan generation from {}", self.config.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Network error calling model API: {e}");
                TripForgeError::api(format!("Network error calling model API: {e}"))
            })?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            error!("Model API rejected the credential (HTTP {status})");
            return Err(TripForgeError::api(format!(
                "Invalid API key (HTTP {status}). Please check your GOOGLE_API_KEY."
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Model API request failed with status {status}");
            return Err(TripForgeError::api(format!(
                "Model API request failed with status {status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!("Failed to parse model response: {e}");
            TripForgeError::api("Invalid response received from the model API")
        })?;

        let text = parsed.into_text()?;
        info!("Received {} characters of generated text", text.len());
        Ok(text)
    }
}

#[async_trait]
impl PlanGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
        self.generate_content(prompt, temperature).await
    }
}
