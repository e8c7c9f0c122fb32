use async_trait::async_trait;
use crate::enums::ai_provider_error::AiProviderError;
use crate::structs::ai::anthropic::anthropic_message_response::AnthropicMessageResponse;
use crate::structs::outbound_payload::OutboundPayload;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// One request/response round-trip with the model.
    async fn send(&self, payload: &OutboundPayload) -> Result<AnthropicMessageResponse, AiProviderError>;
}
