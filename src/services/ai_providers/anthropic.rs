use async_trait::async_trait;
use reqwest::Client;
use crate::config::constants::{timeout_duration_secs, ANTHROPIC_VERSION};
use crate::enums::ai_provider_error::AiProviderError;
use crate::structs::ai::anthropic::anthropic_message_response::AnthropicMessageResponse;
use crate::structs::ai::api_error::ApiErrorEnvelope;
use crate::structs::config::ai_config::AiConfig;
use crate::structs::outbound_payload::OutboundPayload;
use crate::traits::ai_provider::AiProvider;

#[derive(Clone)]
pub struct AnthropicProvider {
    api_key: Option<String>,
    base_url: String,
    client: Client,
    timeout_secs: u64,
}

impl AnthropicProvider {
    pub fn new(api_key: Option<String>, base_url: String, timeout_secs: u64) -> Result<Self, AiProviderError> {
        let client = Client::builder()
            .timeout(timeout_duration_secs(timeout_secs))
            .build()
            .map_err(|e| AiProviderError::NetworkError(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn from_config(ai_config: &AiConfig) -> Result<Self, AiProviderError> {
        let api_key = std::env::var(&ai_config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            log::warn!("⚠️ {} is not set, sending requests without an API key", ai_config.api_key_env);
        }

        Self::new(api_key, ai_config.base_url.clone(), ai_config.timeout_secs)
    }

    fn transport_error(&self, error: reqwest::Error) -> AiProviderError {
        if error.is_timeout() {
            AiProviderError::Timeout(self.timeout_secs)
        } else {
            AiProviderError::NetworkError(error.to_string())
        }
    }

    async fn make_request(&self, url: String, payload: &OutboundPayload) -> Result<reqwest::Response, AiProviderError> {
        log::info!("📦 Request model: {}", payload.model);

        let mut request = self.client
            .post(&url)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(payload);

        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }

        request.send().await.map_err(|e| self.transport_error(e))
    }

    fn error_message(body: &str) -> String {
        serde_json::from_str::<ApiErrorEnvelope>(body)
            .map(|envelope| format!("{}: {}", envelope.error.error_type, envelope.error.message))
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.to_string()
                }
            })
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    async fn send(&self, payload: &OutboundPayload) -> Result<AnthropicMessageResponse, AiProviderError> {
        let url = format!("{}/messages", self.base_url);
        let response = self.make_request(url, payload).await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = Self::error_message(&error_text);

            log::error!("❌ API Error Response: {}", error_text);

            return Err(match status.as_u16() {
                401 => AiProviderError::AuthenticationError(message),
                code => AiProviderError::ApiError { status_code: code, message },
            });
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        log::debug!("📨 Received {} bytes from provider", body.len());

        serde_json::from_str::<AnthropicMessageResponse>(&body)
            .map_err(|e| AiProviderError::SerializationError(e.to_string()))
    }
}
