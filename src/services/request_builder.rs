use crate::errors::analysis_error::{AnalysisError, AnalysisOutcome};
use crate::prompts::code_review_prompt::code_review_prompt;
use crate::structs::ai::anthropic::anthropic_message::AnthropicMessage;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::config::ai_config::AiConfig;
use crate::structs::outbound_payload::OutboundPayload;

/// Turns a snippet into the payload sent to the model. Pure and deterministic.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    model: String,
    max_tokens: u32,
}

impl RequestBuilder {
    pub fn new(model: String, max_tokens: u32) -> Self {
        Self { model, max_tokens }
    }

    pub fn from_config(ai_config: &AiConfig) -> Self {
        Self::new(ai_config.model.clone(), ai_config.max_tokens)
    }

    pub fn build(&self, request: &AnalysisRequest) -> AnalysisOutcome<OutboundPayload> {
        if request.is_blank() {
            return Err(AnalysisError::EmptyInput);
        }

        let prompt = code_review_prompt(request.language(), request.source_code());

        Ok(OutboundPayload {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![AnthropicMessage::user(prompt)],
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::from_config(&AiConfig::default())
    }
}
