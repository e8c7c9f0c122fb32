use serde::Deserialize;

/// One typed part of a message reply. Unknown part types are kept so the
/// text extractor can skip past them.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnthropicContentBlock {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: Option<String>,
}
