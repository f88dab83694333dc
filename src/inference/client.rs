use super::types::*;
use crate::{Error, Result, config::GeminiConfig};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Header carrying the API key; keeps the credential out of URLs and bodies.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends one image to the model and returns the decoded envelope.
    async fn generate_content(
        &self,
        api_key: &str,
        image_base64: &str,
    ) -> Result<GenerateContentResponse>;
}

pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    async fn generate_content(
        &self,
        api_key: &str,
        image_base64: &str,
    ) -> Result<GenerateContentResponse> {
        debug!(
            "Sending generateContent request with {} bytes of image data",
            image_base64.len()
        );

        let request = GenerateContentRequest::diagnosis(image_base64);

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Gemini returned HTTP {}", status.as_u16());
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&body)?;

        debug!(
            "Received generateContent response with {} candidates",
            envelope.candidates.len()
        );

        Ok(envelope)
    }
}
