use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use tokio::sync::Notify;
use snippet_review::enums::ai_provider_error::AiProviderError;
use snippet_review::services::code_reviewer::CodeReviewer;
use snippet_review::services::request_builder::RequestBuilder;
use snippet_review::structs::ai::anthropic::anthropic_content_block::AnthropicContentBlock;
use snippet_review::structs::ai::anthropic::anthropic_message_response::AnthropicMessageResponse;
use snippet_review::structs::outbound_payload::OutboundPayload;
use snippet_review::traits::ai_provider::AiProvider;

pub const VALID_REPORT: &str = r#"{
  "quality_score": 85,
  "issues": [{"severity": "low", "issue": "Missing docstring", "line": "def f(x):"}],
  "suggestions": ["Add a docstring"],
  "complexity": "low",
  "best_practices": ["Clear naming"],
  "security_concerns": []
}"#;

/// Provider double that answers every request with the same canned reply.
/// A gated stub holds the reply until the test releases it.
#[derive(Clone)]
pub struct StubProvider {
    reply: Result<AnthropicMessageResponse, AiProviderError>,
    gate: Option<Arc<Notify>>,
    calls: Arc<AtomicUsize>,
    last_payload: Arc<Mutex<Option<OutboundPayload>>>,
}

impl StubProvider {
    pub fn replying(reply: Result<AnthropicMessageResponse, AiProviderError>) -> Self {
        Self {
            reply,
            gate: None,
            calls: Arc::new(AtomicUsize::new(0)),
            last_payload: Arc::new(Mutex::new(None)),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::replying(Ok(text_reply(text)))
    }

    pub fn gated(text: &str, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::text(text)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_payload(&self) -> Option<OutboundPayload> {
        self.last_payload.lock().unwrap().clone()
    }

    pub fn reviewer(&self) -> CodeReviewer {
        CodeReviewer::new(Arc::new(self.clone()), RequestBuilder::default())
    }
}

#[async_trait]
impl AiProvider for StubProvider {
    async fn send(&self, payload: &OutboundPayload) -> Result<AnthropicMessageResponse, AiProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(payload.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.reply.clone()
    }
}

pub fn text_reply(text: &str) -> AnthropicMessageResponse {
    AnthropicMessageResponse {
        id: Some("msg_test".to_string()),
        model: Some("claude-test".to_string()),
        content: vec![AnthropicContentBlock {
            content_type: "text".to_string(),
            text: Some(text.to_string()),
        }],
        stop_reason: Some("end_turn".to_string()),
    }
}
