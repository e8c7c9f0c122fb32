use std::sync::Arc;
use crate::enums::ai_provider_error::AiProviderError;
use crate::errors::analysis_error::{AnalysisError, AnalysisOutcome};
use crate::services::ai_providers::anthropic::AnthropicProvider;
use crate::services::error_classifier::ErrorClassifier;
use crate::services::request_builder::RequestBuilder;
use crate::services::response_validator::ResponseValidator;
use crate::structs::ai::anthropic::anthropic_message_response::AnthropicMessageResponse;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::analysis_result::AnalysisResult;
use crate::structs::config::ai_config::AiConfig;
use crate::traits::ai_provider::AiProvider;

/// Runs one analysis end to end: build the payload, call the model, extract
/// the reply text and validate it.
#[derive(Clone)]
pub struct CodeReviewer {
    provider: Arc<dyn AiProvider>,
    request_builder: RequestBuilder,
}

impl CodeReviewer {
    pub fn new(provider: Arc<dyn AiProvider>, request_builder: RequestBuilder) -> Self {
        Self {
            provider,
            request_builder,
        }
    }

    pub fn from_config(ai_config: &AiConfig) -> Result<Self, AiProviderError> {
        let provider = AnthropicProvider::from_config(ai_config)?;
        Ok(Self::new(Arc::new(provider), RequestBuilder::from_config(ai_config)))
    }

    pub async fn review(&self, request: &AnalysisRequest) -> AnalysisOutcome<AnalysisResult> {
        let payload = self.request_builder.build(request)?;
        log::debug!("🔍 Reviewing {} snippet ({} chars)", request.language(), request.source_code().len());

        let reply = self
            .provider
            .send(&payload)
            .await
            .map_err(ErrorClassifier::from_provider_error)?;

        let raw_text = extract_reply_text(&reply)?;
        log::debug!("📝 Model reply: {} chars", raw_text.len());

        ResponseValidator::parse(&raw_text)
    }
}

/// First text part of the provider reply.
pub fn extract_reply_text(reply: &AnthropicMessageResponse) -> AnalysisOutcome<String> {
    reply
        .first_text()
        .map(str::to_string)
        .ok_or_else(|| AnalysisError::malformed("", "reply contains no text part"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::complexity::Complexity;
    use crate::enums::language::Language;
    use crate::structs::ai::anthropic::anthropic_content_block::AnthropicContentBlock;
    use crate::traits::ai_provider::MockAiProvider;

    fn reply_with(blocks: Vec<(&str, Option<&str>)>) -> AnthropicMessageResponse {
        AnthropicMessageResponse {
            id: Some("msg_1".to_string()),
            model: None,
            content: blocks
                .into_iter()
                .map(|(content_type, text)| AnthropicContentBlock {
                    content_type: content_type.to_string(),
                    text: text.map(str::to_string),
                })
                .collect(),
            stop_reason: Some("end_turn".to_string()),
        }
    }

    fn reviewer(provider: MockAiProvider) -> CodeReviewer {
        CodeReviewer::new(Arc::new(provider), RequestBuilder::new("test-model".to_string(), 100))
    }

    #[tokio::test]
    async fn empty_input_never_reaches_provider() {
        let mut provider = MockAiProvider::new();
        provider.expect_send().times(0);

        let result = reviewer(provider)
            .review(&AnalysisRequest::new("   \n", Language::Go))
            .await;

        assert_eq!(result, Err(AnalysisError::EmptyInput));
    }

    #[tokio::test]
    async fn validates_first_text_part() {
        let mut provider = MockAiProvider::new();
        provider
            .expect_send()
            .withf(|payload| payload.model == "test-model" && payload.prompt().contains("x := 1"))
            .times(1)
            .returning(|_| {
                Ok(reply_with(vec![
                    ("thinking", None),
                    ("text", Some(r#"{"quality_score":72,"complexity":"medium"}"#)),
                    ("text", Some("ignored")),
                ]))
            });

        let result = reviewer(provider)
            .review(&AnalysisRequest::new("x := 1", Language::Go))
            .await
            .unwrap();

        assert_eq!(result.quality_score(), 72);
        assert_eq!(result.complexity(), Complexity::Medium);
    }

    #[tokio::test]
    async fn reply_without_text_part_is_malformed() {
        let mut provider = MockAiProvider::new();
        provider
            .expect_send()
            .returning(|_| Ok(reply_with(vec![("tool_use", None)])));

        let result = reviewer(provider)
            .review(&AnalysisRequest::new("int main() {}", Language::Cpp))
            .await;

        assert!(matches!(result, Err(AnalysisError::MalformedJson { .. })));
    }

    #[tokio::test]
    async fn provider_failure_is_network_error() {
        let mut provider = MockAiProvider::new();
        provider
            .expect_send()
            .returning(|_| Err(AiProviderError::NetworkError("connection refused".to_string())));

        let result = reviewer(provider)
            .review(&AnalysisRequest::new("class A {}", Language::Java))
            .await;

        assert_eq!(result, Err(AnalysisError::network("connection refused", None)));
    }
}
