use serde::Deserialize;
use crate::structs::ai::anthropic::anthropic_content_block::AnthropicContentBlock;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnthropicMessageResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub content: Vec<AnthropicContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl AnthropicMessageResponse {
    /// First part typed `text`, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|block| block.content_type == "text")
            .and_then(|block| block.text.as_deref())
    }
}
