use serde::Serialize;
use crate::structs::ai::anthropic::anthropic_message::AnthropicMessage;

/// Body of the single POST sent to the model provider.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OutboundPayload {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<AnthropicMessage>,
}

impl OutboundPayload {
    /// Prompt text of the first (and only) user message.
    pub fn prompt(&self) -> &str {
        self.messages
            .first()
            .map(|message| message.content.as_str())
            .unwrap_or("")
    }
}
